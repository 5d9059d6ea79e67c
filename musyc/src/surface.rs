use crate::{
    Error, Musyc, Parameters, Result, SurfaceGrid, assemble_grid, synergy, utils::replace_nan,
};
use log::warn;
use nalgebra::DVector;
use std::fmt::Display;

/// Axis title of drug 1 doses.
pub const X_TITLE: &str = "Drug 1";
/// Axis title of drug 2 doses.
pub const Y_TITLE: &str = "Drug 2";
/// Value replacing undefined combined effects before rendering.
pub const EFFECT_FALLBACK: f64 = 0.;

/// Surfaces that can be requested from one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Combined effect of the MuSyC model.
    Effect,
    /// Bliss excess.
    Bliss,
    /// Negative log of the Loewe index.
    Loewe,
}

impl SurfaceKind {
    /// Display style of the surface kind.
    pub fn style(&self) -> PlotStyle {
        match self {
            SurfaceKind::Effect => PlotStyle {
                title: "Dose Response",
                z_title: Some("E (MuSyC)"),
                zlim: (0., 1.1),
                clim: None,
                colorscale: ColorScale::Viridis,
                center_on_zero: false,
                opacity: 0.8,
            },
            SurfaceKind::Bliss => PlotStyle {
                title: "Bliss Excess",
                z_title: Some("Bliss Excess"),
                zlim: (-0.5, 0.5),
                clim: Some((-0.5, 0.5)),
                colorscale: ColorScale::PRGn,
                center_on_zero: true,
                opacity: 0.8,
            },
            SurfaceKind::Loewe => PlotStyle {
                title: "Loewe Synergy",
                z_title: Some("-log(loewe)"),
                zlim: (-3., 3.),
                clim: Some((-3., 3.)),
                colorscale: ColorScale::PRGn,
                center_on_zero: true,
                opacity: 0.8,
            },
        }
    }
}

/// Color scale identifier understood by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Sequential scale for effects.
    Viridis,
    /// Diverging purple-green scale for values centered on zero.
    PRGn,
}

impl Display for ColorScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorScale::Viridis => write!(f, "viridis"),
            ColorScale::PRGn => write!(f, "PRGn"),
        }
    }
}

/// Display metadata of a rendered surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Figure title.
    pub title: &'static str,
    /// Title of the value axis, see [PlotStyle::z_title].
    pub z_title: Option<&'static str>,
    /// Range of the value axis.
    pub zlim: (f64, f64),
    /// Value range mapped onto the color scale, see [PlotStyle::color_limits].
    pub clim: Option<(f64, f64)>,
    /// Color scale.
    pub colorscale: ColorScale,
    /// Values are centered on zero.
    pub center_on_zero: bool,
    /// Surface opacity.
    pub opacity: f64,
}

impl PlotStyle {
    /// Returns the explicit color limits or the default range of the style.
    pub fn color_limits(&self) -> (f64, f64) {
        match (self.clim, self.center_on_zero) {
            (Some(clim), _) => clim,
            (None, true) => (-0.4, 0.4),
            (None, false) => (0., 1.),
        }
    }

    /// Returns the explicit value axis title or the default title of the style.
    pub fn z_title(&self) -> &'static str {
        match (self.z_title, self.center_on_zero) {
            (Some(z_title), _) => z_title,
            (None, true) => "",
            (None, false) => "E",
        }
    }
}

/// Maps doses onto a log10 axis.
///
/// Zero doses cannot be shown on a log axis and are placed one decade below the smallest
/// positive dose.
pub fn log_axis(d: &DVector<f64>) -> Result<DVector<f64>> {
    let min_positive = d
        .iter()
        .copied()
        .filter(|v| *v > 0.)
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(Error::EmptyInput {
            name: "positive doses",
        })?;
    let zero = min_positive / 10.;
    Ok(d.map(|v| if v == 0. { zero.log10() } else { v.log10() }))
}

/// Maps a log10 axis back onto doses, the smallest axis value becomes the zero dose.
pub fn linear_axis(x: &DVector<f64>) -> DVector<f64> {
    let min = x.min();
    x.map(|v| if v == min { 0. } else { 10f64.powf(v) })
}

/// Combined effect and derived synergy surfaces of one evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Surfaces {
    /// Raw combined effect, possibly containing NaN.
    pub effect: DVector<f64>,
    /// Bliss excess if requested.
    pub bliss: Option<DVector<f64>>,
    /// Loewe index if requested.
    pub loewe: Option<DVector<f64>>,
}

impl Surfaces {
    /// Evaluates the combined effect and the requested synergy surfaces.
    pub fn compute(
        d1: &DVector<f64>,
        d2: &DVector<f64>,
        params: &Parameters,
        kinds: &[SurfaceKind],
    ) -> Result<Self> {
        let effect = Musyc::new(*params)?.surface(d1, d2)?;
        let bliss = if kinds.contains(&SurfaceKind::Bliss) {
            Some(synergy::bliss(d1, d2, &effect, params)?)
        } else {
            None
        };
        let loewe = if kinds.contains(&SurfaceKind::Loewe) {
            Some(synergy::loewe(d1, d2, &effect, params)?)
        } else {
            None
        };
        Ok(Self {
            effect,
            bliss,
            loewe,
        })
    }

    /// Combined effect with undefined points replaced by [EFFECT_FALLBACK].
    pub fn effect_cleaned(&self) -> DVector<f64> {
        let mut effect = self.effect.clone();
        let replaced = replace_nan(&mut effect, EFFECT_FALLBACK);
        if replaced > 0 {
            warn!("replaced {replaced} undefined effect values by {EFFECT_FALLBACK}");
        }
        effect
    }

    /// Values of `kind` as presented to the rendering layer, None if not computed.
    pub fn presented(&self, kind: SurfaceKind) -> Option<DVector<f64>> {
        match kind {
            SurfaceKind::Effect => Some(self.effect_cleaned()),
            SurfaceKind::Bliss => self.bliss.clone(),
            SurfaceKind::Loewe => self.loewe.as_ref().map(synergy::neg_log),
        }
    }
}

/// Surface payload for the rendering layer.
///
/// Doses are given on log10 axes. Undefined synergy values stay NaN and are drawn as gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfacePlot {
    /// Kind of the surface.
    pub kind: SurfaceKind,
    /// Display metadata.
    pub style: PlotStyle,
    /// log10 dose grids and values.
    pub grid: SurfaceGrid,
    /// Range of the drug 1 axis.
    pub x_range: (f64, f64),
    /// Range of the drug 2 axis.
    pub y_range: (f64, f64),
}

impl SurfacePlot {
    /// Creates plot from flat doses and values.
    pub fn new(
        kind: SurfaceKind,
        d1: &DVector<f64>,
        d2: &DVector<f64>,
        values: &DVector<f64>,
    ) -> Result<Self> {
        let x = log_axis(d1)?;
        let y = log_axis(d2)?;
        let grid = assemble_grid(&x, &y, values)?;
        Ok(Self {
            kind,
            style: kind.style(),
            x_range: (x.min(), x.max()),
            y_range: (y.min(), y.max()),
            grid,
        })
    }

    /// Flat doses `(d1, d2)` recovered from the log10 axes, ordered by `(d2, d1)`.
    pub fn doses(&self) -> (DVector<f64>, DVector<f64>) {
        let (x, y, _) = self.grid.flatten();
        (linear_axis(&x), linear_axis(&y))
    }
}
