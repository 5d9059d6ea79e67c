use crate::{
    Parameters, Result,
    utils::{check_len, map_pairs},
};
use nalgebra::DVector;

/// Occupancy weights of the four reference states at one dose pair.
///
/// The weight of the fully affected combination state is `1 - (u + a1 + a2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateWeights {
    /// Unaffected state.
    pub u: f64,
    /// State affected by drug 1 only.
    pub a1: f64,
    /// State affected by drug 2 only.
    pub a2: f64,
}

impl StateWeights {
    /// Weight of the state affected by both drugs.
    pub fn a12(&self) -> f64 {
        1. - (self.u + self.a1 + self.a2)
    }
}

#[cfg_attr(doc, katexit::katexit)]
/// MuSyC combined response model of two drugs
///
/// The combined effect is the weighted mixture
///
/// $$E = U E_0 + A_1 E_1 + A_2 E_2 + (1 - U - A_1 - A_2) E_3$$
///
/// of four reference states, where $U$, $A_1$ and $A_2$ are the steady state occupancies of
/// a two-dimensional transition model between the unaffected state, both single drug
/// affected states and the combination state. Transition rates depend on doses $d_i$,
/// potencies $C_i$, hill slopes $h_i$, the potency interaction $\alpha_{ij}$ and the
/// cooperativity $\gamma_{ij}$.
///
/// The occupancies are evaluated in their expanded rational form with every cross term.
/// Nothing is cancelled beforehand, so edge cases like zero doses or $\alpha = 0$ resolve
/// numerically at evaluation time.
///
/// ```
/// use musyc::{Musyc, Parameters};
///
/// let params = Parameters::default().with_alpha(0., 0.);
/// let model = Musyc::new(params).unwrap();
/// assert_eq!(model.val(0., 0.), 1.);
/// assert!((model.val(1., 0.) - 0.7).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Musyc {
    params: Parameters,
}

impl Musyc {
    /// Creates model, fails if any parameter is outside of its domain.
    pub fn new(params: Parameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters of the model.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns the occupancy weights at dose pair `(d1, d2)`.
    pub fn weights(&self, d1: f64, d2: f64) -> StateWeights {
        let Parameters {
            h1,
            h2,
            c1,
            c2,
            alpha12,
            alpha21,
            gamma12,
            gamma21,
            ..
        } = self.params;

        let d1h1 = d1.powf(h1);
        let d2h2 = d2.powf(h2);
        let c1h1 = c1.powf(h1);
        let c2h2 = c2.powf(h2);
        let r1 = 100. / c1h1;
        let r2 = 100. / c2h2;

        let p21 = (r1 * c1h1).powf(gamma21);
        let p12 = (r2 * c2h2).powf(gamma12);
        let a21 = (alpha21 * d1).powf(gamma21 * h1);
        let a12 = (alpha12 * d2).powf(gamma12 * h2);
        let r1g = r1.powf(gamma21);
        let r2g = r2.powf(gamma12);
        let r1g1 = r1.powf(gamma21 + 1.);
        let r2g1 = r2.powf(gamma12 + 1.);

        let t01 = d1h1 * r1 * r2 * p21 * c2h2;
        let t02 = d1h1 * r1 * r2 * p12 * c2h2;
        let t03 = d1h1 * r1 * r2g1 * a12 * c2h2;
        let t04 = d1h1 * r1 * r2g * a12 * p21;
        let t05 = d1h1 * r1g1 * r2g * a21 * a12;
        let t06 = d1h1 * r1g1 * a21 * p12;
        let t07 = d2h2 * r1 * r2 * p21 * c1h1;
        let t08 = d2h2 * r1 * r2 * p12 * c1h1;
        let t09 = d2h2 * r1g1 * r2 * a21 * c1h1;
        let t10 = d2h2 * r1g * r2 * a21 * p12;
        let t11 = d2h2 * r1g * r2g1 * a21 * a12;
        let t12 = d2h2 * r2g1 * a12 * p21;
        let t13 = r1 * r2 * p21 * c1h1 * c2h2;
        let t14 = r1 * r2 * p12 * c1h1 * c2h2;
        let t15 = r1g1 * a21 * p12 * c1h1;
        let t16 = r2g1 * a12 * p21 * c2h2;

        let den = t01
            + t02
            + t03
            + t04
            + t05
            + t06
            + t07
            + t08
            + t09
            + t10
            + t11
            + t12
            + t13
            + t14
            + t15
            + t16;

        StateWeights {
            u: (t13 + t14 + t15 + t16) / den,
            a1: (t01 + t02 + t06 + t10) / den,
            a2: (t04 + t07 + t08 + t12) / den,
        }
    }

    /// Returns the combined effect at dose pair `(d1, d2)`.
    ///
    /// Yields NaN where all state weights vanish together, e.g. for infinite doses.
    #[inline]
    pub fn val(&self, d1: f64, d2: f64) -> f64 {
        let Parameters { e0, e1, e2, e3, .. } = self.params;
        let w = self.weights(d1, d2);
        w.u * e0 + w.a1 * e1 + w.a2 * e2 + (1. - (w.u + w.a1 + w.a2)) * e3
    }

    /// Returns the combined effect for each dose pair of the parallel arrays `d1` and `d2`.
    pub fn surface(&self, d1: &DVector<f64>, d2: &DVector<f64>) -> Result<DVector<f64>> {
        check_len("d1", d1.len(), "d2", d2.len())?;
        Ok(map_pairs(d1, d2, |a, b| self.val(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Hill};

    const EQ_EPS: f64 = 1e-12;

    fn no_interaction() -> Parameters {
        Parameters::default()
            .with_alpha(0., 0.)
            .with_gamma(1., 1.)
    }

    #[test]
    fn musyc_no_drug() -> Result<()> {
        let model = Musyc::new(no_interaction())?;
        assert_eq!(model.val(0., 0.), 1.);
        Ok(())
    }

    #[test]
    fn musyc_half_max() -> Result<()> {
        let model = Musyc::new(no_interaction())?;
        assert!((model.val(1., 0.) - 0.7).abs() < EQ_EPS);
        Ok(())
    }

    #[test]
    fn musyc_single_agent_edges() -> Result<()> {
        let p = no_interaction();
        let model = Musyc::new(p)?;
        let hill1 = Hill::new(p.e0, p.e1, p.h1, p.c1)?;
        let hill2 = Hill::new(p.e0, p.e2, p.h2, p.c2)?;
        for d in [1e-3, 0.1, 1., 7.5, 1e3] {
            assert!((model.val(d, 0.) - hill1.val(d)).abs() < 1e-10);
            assert!((model.val(0., d) - hill2.val(d)).abs() < 1e-10);
        }
        Ok(())
    }

    #[test]
    fn musyc_weights_sum() -> Result<()> {
        let model = Musyc::new(Parameters::default())?;
        let w = model.weights(0.3, 2.);
        assert!((w.u + w.a1 + w.a2 + w.a12() - 1.).abs() < EQ_EPS);
        assert!(w.u > 0. && w.a1 > 0. && w.a2 > 0. && w.a12() > 0.);
        let w = model.weights(0., 0.);
        assert_eq!((w.u, w.a1, w.a2), (1., 0., 0.));
        Ok(())
    }

    #[test]
    fn musyc_combination_max() -> Result<()> {
        let p = Parameters::default().with_e3(0.1);
        let model = Musyc::new(p)?;
        assert!((model.val(1e12, 1e12) - 0.1).abs() < 1e-4);
        Ok(())
    }

    #[test]
    fn musyc_zero_alpha_zero_dose() -> Result<()> {
        let p = no_interaction().with_gamma(0.3, 4.);
        let model = Musyc::new(p)?;
        for (d1, d2) in [(0., 0.), (0., 1.), (1., 0.), (1., 1.)] {
            assert!(model.val(d1, d2).is_finite());
        }
        Ok(())
    }

    #[test]
    fn musyc_infinite_dose_is_nan() -> Result<()> {
        let model = Musyc::new(Parameters::default())?;
        assert!(model.val(f64::INFINITY, 1.).is_nan());
        Ok(())
    }

    #[test]
    fn musyc_surface() -> Result<()> {
        let model = Musyc::new(no_interaction())?;
        let d1 = DVector::from_vec(vec![0., 1., 0.]);
        let d2 = DVector::from_vec(vec![0., 0., 1.]);
        let e = model.surface(&d1, &d2)?;
        assert_eq!(e.len(), 3);
        assert_eq!(e[0], 1.);
        assert!((e[1] - 0.7).abs() < EQ_EPS);
        assert!((e[2] - 0.75).abs() < EQ_EPS);

        let short = DVector::from_vec(vec![0.]);
        assert_eq!(
            model.surface(&d1, &short),
            Err(Error::ShapeMismatch {
                vec1: "d1",
                vec2: "d2",
                len1: 3,
                len2: 1,
            })
        );
        Ok(())
    }

    #[test]
    fn musyc_invalid() {
        let p = Parameters::default().with_slopes(-1., 1.);
        assert!(Musyc::new(p).is_err());
    }
}
