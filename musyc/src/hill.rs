use crate::{Error, Result};
use nalgebra::DVector;

#[cfg_attr(doc, katexit::katexit)]
/// Single drug dose-response curve given by the 4-parameter Hill equation
///
/// $$E(d) = E_0 + (E_{max} - E_0) \frac{d^h}{C^h + d^h}$$
///
/// with baseline effect $E_0$, maximal effect $E_{max}$, hill slope $h > 0$ and potency
/// $C > 0$.
///
/// ```
/// use musyc::Hill;
///
/// let hill = Hill::new(1., 0.4, 2., 1.).unwrap();
/// assert_eq!(hill.val(0.), 1.);
/// assert!((hill.val(1.) - 0.7).abs() < 1e-12);
/// assert!((hill.inv(0.7) - 1.).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hill {
    /// Baseline effect.
    pub e0: f64,
    /// Maximal effect.
    pub emax: f64,
    /// Hill slope.
    pub h: f64,
    /// Potency, the dose at half-maximal effect.
    pub c: f64,
}

impl Hill {
    /// Creates hill curve, fails if slope or potency is not positive.
    pub fn new(e0: f64, emax: f64, h: f64, c: f64) -> Result<Self> {
        if !h.is_finite() || h <= 0. {
            return Err(Error::InvalidParameter {
                name: "h",
                value: h,
                constraint: "finite and > 0",
            });
        }
        if !c.is_finite() || c <= 0. {
            return Err(Error::InvalidParameter {
                name: "c",
                value: c,
                constraint: "finite and > 0",
            });
        }
        Ok(Self { e0, emax, h, c })
    }

    /// Returns the effect at dose `d`.
    #[inline]
    pub fn val(&self, d: f64) -> f64 {
        let dh = d.powf(self.h);
        self.e0 + (self.emax - self.e0) * dh / (self.c.powf(self.h) + dh)
    }

    /// Returns the dose reaching effect `e`, `d = c * ((e - e0) / (emax - e))^(1/h)`.
    ///
    /// Effects outside of the reachable range between `e0` and `emax` yield a negative ratio
    /// and return NaN.
    #[inline]
    pub fn inv(&self, e: f64) -> f64 {
        let ratio = (e - self.e0) / (self.emax - e);
        if ratio < 0. {
            return f64::NAN;
        }
        ratio.powf(1. / self.h) * self.c
    }

    /// Returns the effect for each dose.
    pub fn val_vec(&self, d: &DVector<f64>) -> DVector<f64> {
        d.map(|v| self.val(v))
    }

    /// Returns the dose for each effect, NaN where the effect is unreachable.
    pub fn inv_vec(&self, e: &DVector<f64>) -> DVector<f64> {
        e.map(|v| self.inv(v))
    }
}
