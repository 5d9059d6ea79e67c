use crate::{
    DoseLattice, Error, LogParameters, Parameters, Result, SurfaceKind, SurfacePlot, Surfaces,
    params::{ALPHA_LOG_ZERO, get_beta, get_e3},
};
use log::{debug, trace};
use nalgebra::Vector3;
use std::{cell::Cell, rc::Rc};

/// Interactive control of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    /// Maximal effect of drug 1.
    E1,
    /// Maximal effect of drug 2.
    E2,
    /// log10 potency of drug 1.
    LogC1,
    /// log10 potency of drug 2.
    LogC2,
    /// log10 hill slope of drug 1.
    LogH1,
    /// log10 hill slope of drug 2.
    LogH2,
    /// log10 potency interaction alpha12.
    LogAlpha12,
    /// log10 potency interaction alpha21.
    LogAlpha21,
    /// log10 cooperativity gamma12.
    LogGamma12,
    /// log10 cooperativity gamma21.
    LogGamma21,
    /// Interaction strength.
    Beta,
}

/// Value range and step of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    /// Lowest value.
    pub min: f64,
    /// Highest value.
    pub max: f64,
    /// Step width.
    pub step: f64,
}

impl Slider {
    /// Every slider in display order.
    pub const ALL: [Slider; 11] = [
        Slider::LogH1,
        Slider::LogH2,
        Slider::E1,
        Slider::E2,
        Slider::LogC1,
        Slider::LogC2,
        Slider::LogAlpha12,
        Slider::LogAlpha21,
        Slider::LogGamma12,
        Slider::LogGamma21,
        Slider::Beta,
    ];

    /// Value range of the slider.
    pub fn range(&self) -> SliderRange {
        let (min, max, step) = match self {
            Slider::E1 | Slider::E2 => (0., 1., 0.05),
            Slider::LogC1 | Slider::LogC2 => (-2., 2., 0.2),
            Slider::LogH1 | Slider::LogH2 => (-1., 1., 0.2),
            Slider::LogAlpha12 | Slider::LogAlpha21 => (ALPHA_LOG_ZERO, 3., 0.2),
            Slider::LogGamma12 | Slider::LogGamma21 => (-1.4, 1.6, 0.2),
            Slider::Beta => (-1., 1., 0.05),
        };
        SliderRange { min, max, step }
    }

    /// Label of the slider.
    pub fn description(&self) -> &'static str {
        match self {
            Slider::E1 => "E1:",
            Slider::E2 => "E2:",
            Slider::LogC1 => "log(C1):",
            Slider::LogC2 => "log(C2):",
            Slider::LogH1 => "log(h1):",
            Slider::LogH2 => "log(h2):",
            Slider::LogAlpha12 => "log(alp12):",
            Slider::LogAlpha21 => "log(alp21):",
            Slider::LogGamma12 => "log(gam12):",
            Slider::LogGamma21 => "log(gam21):",
            Slider::Beta => "beta:",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Slider::E1 => "e1",
            Slider::E2 => "e2",
            Slider::LogC1 => "log_c1",
            Slider::LogC2 => "log_c2",
            Slider::LogH1 => "log_h1",
            Slider::LogH2 => "log_h2",
            Slider::LogAlpha12 => "log_alpha12",
            Slider::LogAlpha21 => "log_alpha21",
            Slider::LogGamma12 => "log_gamma12",
            Slider::LogGamma21 => "log_gamma21",
            Slider::Beta => "beta",
        }
    }

    fn clamp(&self, value: f64) -> f64 {
        let range = self.range();
        value.clamp(range.min, range.max)
    }

    fn get(&self, p: &LogParameters) -> f64 {
        match self {
            Slider::E1 => p.e1,
            Slider::E2 => p.e2,
            Slider::LogC1 => p.log_c1,
            Slider::LogC2 => p.log_c2,
            Slider::LogH1 => p.log_h1,
            Slider::LogH2 => p.log_h2,
            Slider::LogAlpha12 => p.log_alpha12,
            Slider::LogAlpha21 => p.log_alpha21,
            Slider::LogGamma12 => p.log_gamma12,
            Slider::LogGamma21 => p.log_gamma21,
            Slider::Beta => p.beta,
        }
    }

    fn get_mut<'a>(&self, p: &'a mut LogParameters) -> &'a mut f64 {
        match self {
            Slider::E1 => &mut p.e1,
            Slider::E2 => &mut p.e2,
            Slider::LogC1 => &mut p.log_c1,
            Slider::LogC2 => &mut p.log_c2,
            Slider::LogH1 => &mut p.log_h1,
            Slider::LogH2 => &mut p.log_h2,
            Slider::LogAlpha12 => &mut p.log_alpha12,
            Slider::LogAlpha21 => &mut p.log_alpha21,
            Slider::LogGamma12 => &mut p.log_gamma12,
            Slider::LogGamma21 => &mut p.log_gamma21,
            Slider::Beta => &mut p.beta,
        }
    }
}

/// Shared flag suspending event handling while state is mutated in batches.
#[derive(Debug, Clone, Default)]
pub struct Pause(Rc<Cell<bool>>);

impl Pause {
    /// Creates an unpaused flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while any guard is alive.
    pub fn is_paused(&self) -> bool {
        self.0.get()
    }

    /// Pauses event handling until the returned guard is dropped.
    pub fn suspend(&self) -> PauseGuard {
        let prev = self.0.replace(true);
        PauseGuard {
            flag: self.0.clone(),
            prev,
        }
    }
}

/// Restores the previous pause state on drop.
#[derive(Debug)]
#[must_use = "event handling resumes as soon as the guard is dropped"]
pub struct PauseGuard {
    flag: Rc<Cell<bool>>,
    prev: bool,
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        self.flag.set(self.prev);
    }
}

/// Camera orientation of a 3-D scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub eye: Vector3<f64>,
    /// Look-at point.
    pub center: Vector3<f64>,
    /// Up direction.
    pub up: Vector3<f64>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vector3::new(1.02, 2.15, 1.48),
            center: Vector3::zeros(),
            up: Vector3::z(),
        }
    }
}

/// Mirrors camera changes of one rendered surface onto all of its peers.
///
/// Writing a camera into a scene raises that scene's own change event. Those events are
/// ignored while a change is propagated.
#[derive(Debug, Clone)]
pub struct CameraSync {
    cameras: Vec<Camera>,
    pause: Pause,
    ignored: usize,
}

impl CameraSync {
    /// Creates `n` synchronized default cameras sharing the given pause flag.
    pub fn new(n: usize, pause: Pause) -> Self {
        Self {
            cameras: vec![Camera::default(); n],
            pause,
            ignored: 0,
        }
    }

    /// Cameras of all scenes.
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Number of change events ignored during propagation.
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Handles a camera change raised by scene `source` and returns the number of scenes
    /// written.
    pub fn on_change(&mut self, source: usize, camera: Camera) -> usize {
        if self.pause.is_paused() {
            trace!("ignoring camera change of scene {source}");
            self.ignored += 1;
            return 0;
        }
        let _guard = self.pause.suspend();
        trace!("propagating camera change of scene {source}");
        for idx in 0..self.cameras.len() {
            self.cameras[idx] = camera;
            self.on_change(idx, camera);
        }
        self.cameras.len()
    }
}

/// Composition of surfaces shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Combined effect only.
    Musyc,
    /// Combined effect and Bliss excess.
    MusycBliss,
    /// Combined effect and Loewe synergy.
    MusycLoewe,
    /// Combined effect, Bliss excess and Loewe synergy.
    All,
}

impl View {
    /// Requested surfaces in display order.
    pub fn kinds(&self) -> &'static [SurfaceKind] {
        match self {
            View::Musyc => &[SurfaceKind::Effect],
            View::MusycBliss => &[SurfaceKind::Effect, SurfaceKind::Bliss],
            View::MusycLoewe => &[SurfaceKind::Effect, SurfaceKind::Loewe],
            View::All => &[SurfaceKind::Effect, SurfaceKind::Bliss, SurfaceKind::Loewe],
        }
    }

    /// Initial parameters of the view.
    ///
    /// Loewe additivity requires equal maximal effects, so the Loewe view starts from
    /// `e1 = e2 = e3 = 0.5`.
    pub fn default_parameters(&self) -> Parameters {
        match self {
            View::MusycLoewe => Parameters::default().with_emax(0.5, 0.5).with_e3(0.5),
            _ => Parameters::default(),
        }
    }
}

/// Batched parameter assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Restores the initial parameters.
    Reset,
    /// No synergy of potency, cooperativity or efficacy.
    MusycNull,
    /// Combination effect of independent action, `e3 = e1 * e2`.
    BlissNull,
    /// Unit slopes without potency interaction.
    LoeweNull,
}

impl Preset {
    /// Slider writes of the preset for the current slider state.
    pub fn writes(&self, current: &LogParameters, defaults: &Parameters) -> Vec<(Slider, f64)> {
        let initial = LogParameters::from(defaults);
        match self {
            Preset::Reset => vec![
                (Slider::E1, initial.e1),
                (Slider::E2, initial.e2),
                (Slider::LogH1, initial.log_h1),
                (Slider::LogH2, initial.log_h2),
                (Slider::LogC1, initial.log_c1),
                (Slider::LogC2, initial.log_c2),
                (Slider::LogAlpha12, initial.log_alpha12),
                (Slider::LogAlpha21, initial.log_alpha21),
                (Slider::Beta, initial.beta),
                (Slider::LogGamma12, initial.log_gamma12),
                (Slider::LogGamma21, initial.log_gamma21),
            ],
            Preset::BlissNull => {
                let (e1, e2) = (current.e1, current.e2);
                let mut writes = vec![
                    (Slider::LogAlpha12, 0.),
                    (Slider::LogAlpha21, 0.),
                    (Slider::LogGamma12, 0.),
                    (Slider::LogGamma21, 0.),
                ];
                // undefined if the stronger single agent reaches the baseline
                let beta = get_beta(defaults.e0, e1, e2, e1 * e2);
                if beta.is_finite() {
                    writes.push((Slider::Beta, beta));
                }
                writes
            }
            Preset::LoeweNull => vec![
                (Slider::LogH1, 0.),
                (Slider::LogH2, 0.),
                (Slider::LogAlpha12, ALPHA_LOG_ZERO),
                (Slider::LogAlpha21, ALPHA_LOG_ZERO),
            ],
            Preset::MusycNull => vec![
                (Slider::Beta, 0.),
                (Slider::LogAlpha12, 0.),
                (Slider::LogAlpha21, 0.),
                (Slider::LogGamma12, 0.),
                (Slider::LogGamma21, 0.),
            ],
        }
    }
}

/// Surfaces of one recomputation, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Parameter snapshot the surfaces were computed from.
    pub parameters: Parameters,
    /// One plot per requested surface, in display order.
    pub plots: Vec<SurfacePlot>,
}

fn compute_frame(view: View, lattice: &DoseLattice, parameters: Parameters) -> Result<Frame> {
    let kinds = view.kinds();
    debug!(
        "recomputing {} surfaces over {} dose pairs",
        kinds.len(),
        lattice.len()
    );
    let (d1, d2) = (lattice.d1(), lattice.d2());
    let surfaces = Surfaces::compute(d1, d2, &parameters, kinds)?;
    let plots = kinds
        .iter()
        .filter_map(|&kind| {
            surfaces
                .presented(kind)
                .map(|values| SurfacePlot::new(kind, d1, d2, &values))
        })
        .collect::<Result<Vec<SurfacePlot>>>()?;
    Ok(Frame { parameters, plots })
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Headless counterpart of the interactive front-end
///
/// Owns the slider state, turns it into a parameter snapshot on every change and
/// recomputes all surfaces of its [View] over a fixed [DoseLattice].
///
/// ```mermaid
/// graph LR
///     S[Slider / Preset] --> C[Controller]
///     C --> P[Parameters]
///     L[DoseLattice] --> M[Musyc]
///     P --> M
///     M --> B[Bliss / Loewe]
///     M --> F[Frame]
///     B --> F
/// ```
///
/// Presets write several sliders at once. They suspend recomputation with a [PauseGuard]
/// and recompute exactly once afterwards.
///
/// ```
/// use musyc::{Controller, Preset, Slider, View};
///
/// let mut controller = Controller::new(View::All).unwrap();
/// controller.set(Slider::LogAlpha12, 1.).unwrap();
/// controller.apply(Preset::MusycNull).unwrap();
/// assert_eq!(controller.recomputations(), 3);
/// assert_eq!(controller.frame().plots.len(), 3);
/// ```
#[derive(Debug)]
pub struct Controller {
    view: View,
    defaults: Parameters,
    sliders: LogParameters,
    lattice: DoseLattice,
    pause: Pause,
    cameras: CameraSync,
    frame: Frame,
    recomputations: usize,
}

impl Controller {
    /// Creates controller with the default parameters of `view` and computes the first frame.
    pub fn new(view: View) -> Result<Self> {
        let defaults = view.default_parameters();
        let sliders = Self::initial_sliders(&defaults);
        let lattice = DoseLattice::default();
        let frame = compute_frame(view, &lattice, sliders.to_parameters(defaults.e0))?;
        let pause = Pause::new();
        Ok(Self {
            view,
            defaults,
            sliders,
            lattice,
            cameras: CameraSync::new(view.kinds().len(), pause.clone()),
            pause,
            frame,
            recomputations: 1,
        })
    }

    /// Returns controller starting from `defaults`, presets reset to them.
    pub fn with_defaults(mut self, defaults: Parameters) -> Result<Self> {
        defaults.validate()?;
        self.defaults = defaults;
        self.sliders = Self::initial_sliders(&defaults);
        self.refresh()?;
        Ok(self)
    }

    /// Returns controller evaluating on `lattice`.
    pub fn with_lattice(mut self, lattice: DoseLattice) -> Result<Self> {
        self.lattice = lattice;
        self.refresh()?;
        Ok(self)
    }

    fn initial_sliders(defaults: &Parameters) -> LogParameters {
        let mut sliders = LogParameters::from(defaults);
        for slider in Slider::ALL {
            let value = slider.get(&sliders);
            *slider.get_mut(&mut sliders) = slider.clamp(value);
        }
        sliders
    }

    /// Presented view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Dose lattice all surfaces are evaluated on.
    pub fn lattice(&self) -> &DoseLattice {
        &self.lattice
    }

    /// Pause flag shared by recomputation and camera synchronization.
    pub fn pause(&self) -> &Pause {
        &self.pause
    }

    /// Camera synchronization of the rendered surfaces.
    pub fn cameras_mut(&mut self) -> &mut CameraSync {
        &mut self.cameras
    }

    /// Current slider state.
    pub fn sliders(&self) -> &LogParameters {
        &self.sliders
    }

    /// Current value of `slider`.
    pub fn value(&self, slider: Slider) -> f64 {
        slider.get(&self.sliders)
    }

    /// Parameter snapshot of the current slider state.
    pub fn parameters(&self) -> Parameters {
        self.sliders.to_parameters(self.defaults.e0)
    }

    /// Interaction strength of `e3` for the current baseline and single agent effects.
    pub fn beta_of(&self, e3: f64) -> f64 {
        get_beta(self.defaults.e0, self.sliders.e1, self.sliders.e2, e3)
    }

    /// Combined maximal effect of `beta` for the current baseline and single agent effects.
    pub fn e3_of(&self, beta: f64) -> f64 {
        get_e3(self.defaults.e0, self.sliders.e1, self.sliders.e2, beta)
    }

    /// Last computed frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Number of recomputations so far, the initial one included.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Writes `value` clamped to the slider range.
    ///
    /// Returns true if the write changed the value and triggered a recomputation. Non-finite
    /// values are rejected and leave the slider untouched.
    pub fn set(&mut self, slider: Slider, value: f64) -> Result<bool> {
        if !value.is_finite() {
            return Err(Error::InvalidParameter {
                name: slider.name(),
                value,
                constraint: "finite",
            });
        }
        let value = slider.clamp(value);
        let current = slider.get_mut(&mut self.sliders);
        if *current == value {
            return Ok(false);
        }
        *current = value;
        self.refresh()
    }

    /// Recomputes all surfaces unless paused, returns true if recomputed.
    pub fn refresh(&mut self) -> Result<bool> {
        if self.pause.is_paused() {
            return Ok(false);
        }
        self.frame = compute_frame(self.view, &self.lattice, self.parameters())?;
        self.recomputations += 1;
        Ok(true)
    }

    /// Applies all writes of `preset` and recomputes once.
    pub fn apply(&mut self, preset: Preset) -> Result<()> {
        let writes = preset.writes(&self.sliders, &self.defaults);
        debug!("applying preset {preset:?} with {} writes", writes.len());
        {
            let _guard = self.pause.suspend();
            for (slider, value) in writes {
                self.set(slider, value)?;
            }
        }
        self.refresh()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EQ_EPS: f64 = 1e-12;

    fn small(view: View) -> Result<Controller> {
        Controller::new(view)?.with_lattice(DoseLattice::new(8, -3., 3.)?)
    }

    #[test]
    fn controller_views() -> Result<()> {
        for view in [View::Musyc, View::MusycBliss, View::MusycLoewe, View::All] {
            let c = small(view)?;
            let kinds: Vec<SurfaceKind> = c.frame().plots.iter().map(|p| p.kind).collect();
            assert_eq!(kinds, view.kinds());
            assert_eq!(c.cameras.cameras().len(), view.kinds().len());
            for plot in &c.frame().plots {
                assert_eq!(plot.grid.shape(), (9, 9));
            }
        }
        Ok(())
    }

    #[test]
    fn controller_initial_parameters() -> Result<()> {
        let c = small(View::Musyc)?;
        let p = c.parameters();
        let d = Parameters::default();
        assert!((p.h1 - d.h1).abs() < EQ_EPS);
        assert!((p.h2 - d.h2).abs() < EQ_EPS);
        assert!((p.e3 - d.e3).abs() < EQ_EPS);
        assert_eq!(p.alpha12, 1.);
        assert_eq!(p.gamma21, 1.);

        let c = small(View::MusycLoewe)?;
        assert_eq!(c.parameters().e1, 0.5);
        assert!((c.parameters().e3 - 0.5).abs() < EQ_EPS);
        Ok(())
    }

    #[test]
    fn controller_set() -> Result<()> {
        let mut c = small(View::Musyc)?;
        let n = c.recomputations();
        assert!(c.set(Slider::LogC1, 1.)?);
        assert_eq!(c.recomputations(), n + 1);
        assert!(!c.set(Slider::LogC1, 1.)?);
        assert_eq!(c.recomputations(), n + 1);
        assert!(c.set(Slider::LogC1, 10.)?);
        assert_eq!(c.value(Slider::LogC1), 2.);
        assert_eq!(c.frame().parameters.c1, 100.);
        Ok(())
    }

    #[test]
    fn controller_alpha_sentinel() -> Result<()> {
        let mut c = small(View::Musyc)?;
        c.set(Slider::LogAlpha12, -5.)?;
        assert_eq!(c.value(Slider::LogAlpha12), ALPHA_LOG_ZERO);
        assert_eq!(c.parameters().alpha12, 0.);
        Ok(())
    }

    #[test]
    fn controller_paused_set() -> Result<()> {
        let mut c = small(View::MusycBliss)?;
        let n = c.recomputations();
        {
            let _guard = c.pause().suspend();
            assert!(!c.set(Slider::E1, 0.2)?);
            assert!(!c.set(Slider::E2, 0.3)?);
            assert!(!c.refresh()?);
        }
        assert_eq!(c.recomputations(), n);
        assert!(!c.pause().is_paused());
        assert!(c.refresh()?);
        assert_eq!(c.frame().parameters.e1, 0.2);
        Ok(())
    }

    #[test]
    fn preset_single_recomputation() -> Result<()> {
        let mut c = small(View::All)?;
        c.set(Slider::LogAlpha12, 1.)?;
        c.set(Slider::LogGamma21, 0.6)?;
        c.set(Slider::Beta, 0.5)?;
        for preset in [
            Preset::MusycNull,
            Preset::BlissNull,
            Preset::LoeweNull,
            Preset::Reset,
        ] {
            let n = c.recomputations();
            c.apply(preset)?;
            assert_eq!(c.recomputations(), n + 1);
            assert!(!c.pause().is_paused());
        }
        Ok(())
    }

    #[test]
    fn preset_values() -> Result<()> {
        let mut c = small(View::All)?;
        c.set(Slider::LogAlpha21, 2.)?;
        c.set(Slider::Beta, 0.5)?;

        c.apply(Preset::MusycNull)?;
        let p = c.parameters();
        assert_eq!((p.alpha12, p.alpha21, p.gamma12, p.gamma21), (1., 1., 1., 1.));
        assert!((p.e3 - 0.4).abs() < EQ_EPS);

        c.apply(Preset::BlissNull)?;
        assert!((c.parameters().e3 - 0.4 * 0.5).abs() < EQ_EPS);

        c.apply(Preset::LoeweNull)?;
        let p = c.parameters();
        assert_eq!((p.h1, p.h2, p.alpha12, p.alpha21), (1., 1., 0., 0.));

        c.apply(Preset::Reset)?;
        assert_eq!(c.sliders(), &Controller::initial_sliders(&c.defaults));
        Ok(())
    }

    #[test]
    fn bliss_null_with_dominant_single_agents() -> Result<()> {
        let mut c = small(View::MusycBliss)?;
        c.set(Slider::Beta, 0.3)?;
        c.set(Slider::E1, 1.)?;
        c.set(Slider::E2, 1.)?;
        c.apply(Preset::BlissNull)?;
        assert_eq!(c.value(Slider::Beta), 0.3);
        assert!(c.set(Slider::E1, 0.5)?);
        assert!(c.parameters().e3.is_finite());
        Ok(())
    }

    #[test]
    fn set_rejects_non_finite() -> Result<()> {
        let mut c = small(View::Musyc)?;
        let n = c.recomputations();
        assert!(matches!(
            c.set(Slider::Beta, f64::NAN),
            Err(Error::InvalidParameter { name: "beta", .. })
        ));
        assert!(c.set(Slider::LogC2, f64::INFINITY).is_err());
        assert_eq!(c.value(Slider::Beta), 0.);
        assert_eq!(c.value(Slider::LogC2), 0.);
        assert_eq!(c.recomputations(), n);
        assert!(c.set(Slider::E1, 0.6)?);
        Ok(())
    }

    #[test]
    fn beta_exposure() -> Result<()> {
        let c = small(View::Musyc)?;
        let e3 = c.e3_of(0.25);
        assert!((c.beta_of(e3) - 0.25).abs() < EQ_EPS);
        Ok(())
    }

    #[test]
    fn with_defaults() -> Result<()> {
        let defaults = Parameters::default().with_potencies(10., 0.1);
        let mut c = small(View::Musyc)?.with_defaults(defaults)?;
        c.set(Slider::LogC1, 0.)?;
        c.apply(Preset::Reset)?;
        assert!((c.parameters().c1 - 10.).abs() < EQ_EPS);

        let defaults = Parameters::default()
            .with_alpha(0., 10.)
            .with_gamma(2., 0.5);
        let mut c = small(View::Musyc)?.with_defaults(defaults)?;
        c.set(Slider::LogAlpha12, 1.)?;
        c.set(Slider::LogAlpha21, 0.)?;
        c.set(Slider::LogGamma12, 0.)?;
        c.set(Slider::LogGamma21, 0.)?;
        c.apply(Preset::Reset)?;
        let p = c.parameters();
        assert_eq!(p.alpha12, 0.);
        assert!((p.alpha21 - 10.).abs() < EQ_EPS);
        assert!((p.gamma12 - 2.).abs() < EQ_EPS);
        assert!((p.gamma21 - 0.5).abs() < EQ_EPS);

        let invalid = Parameters::default().with_slopes(0., 1.);
        assert!(matches!(
            small(View::Musyc)?.with_defaults(invalid),
            Err(Error::InvalidParameter { name: "h1", .. })
        ));
        Ok(())
    }

    #[test]
    fn pause_guard_released_on_error() {
        let pause = Pause::new();
        let failing = |pause: &Pause| -> Result<()> {
            let _guard = pause.suspend();
            Err(Error::EmptyInput { name: "test" })
        };
        assert!(failing(&pause).is_err());
        assert!(!pause.is_paused());
    }

    #[test]
    fn pause_guard_nested() {
        let pause = Pause::new();
        let outer = pause.suspend();
        {
            let _inner = pause.suspend();
            assert!(pause.is_paused());
        }
        assert!(pause.is_paused());
        drop(outer);
        assert!(!pause.is_paused());
    }

    #[test]
    fn camera_sync() {
        let pause = Pause::new();
        let mut sync = CameraSync::new(3, pause.clone());
        let camera = Camera {
            eye: Vector3::new(2., 0., 1.),
            ..Camera::default()
        };
        assert_eq!(sync.on_change(1, camera), 3);
        assert!(sync.cameras().iter().all(|c| *c == camera));
        assert_eq!(sync.ignored(), 3);
        assert!(!pause.is_paused());

        let _guard = pause.suspend();
        assert_eq!(sync.on_change(0, Camera::default()), 0);
        assert_eq!(sync.cameras()[0], camera);
    }
}
