use crate::{Error, Hill, Result};

/// Log-scaled interaction coefficient at or below which the coefficient is exactly zero.
pub const ALPHA_LOG_ZERO: f64 = -3.;

/// Returns the interaction strength beta of the combined maximal effect `e3`.
///
/// Beta measures how far `e3` goes beyond the stronger single agent, normalized by the
/// distance between that agent and the baseline `e0`.
pub fn get_beta(e0: f64, e1: f64, e2: f64, e3: f64) -> f64 {
    let min_e = e1.min(e2);
    (min_e - e3) / (e0 - min_e)
}

/// Returns the combined maximal effect for interaction strength `beta`, inverse of [get_beta].
pub fn get_e3(e0: f64, e1: f64, e2: f64, beta: f64) -> f64 {
    let min_e = e1.min(e2);
    min_e - beta * (e0 - min_e)
}

/// Immutable snapshot of all model parameters of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// Baseline effect without drug.
    pub e0: f64,
    /// Maximal effect of drug 1.
    pub e1: f64,
    /// Maximal effect of drug 2.
    pub e2: f64,
    /// Maximal effect of the combination.
    pub e3: f64,
    /// Hill slope of drug 1.
    pub h1: f64,
    /// Hill slope of drug 2.
    pub h2: f64,
    /// Potency of drug 1.
    pub c1: f64,
    /// Potency of drug 2.
    pub c2: f64,
    /// Potency scaling of drug 2 in presence of drug 1.
    pub alpha12: f64,
    /// Potency scaling of drug 1 in presence of drug 2.
    pub alpha21: f64,
    /// Cooperativity of drug 1 acting on drug 2.
    pub gamma12: f64,
    /// Cooperativity of drug 2 acting on drug 1.
    pub gamma21: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            e0: 1.,
            e1: 0.4,
            e2: 0.5,
            e3: 0.4,
            h1: 2.,
            h2: 0.5,
            c1: 1.,
            c2: 1.,
            alpha12: 1.,
            alpha21: 1.,
            gamma12: 1.,
            gamma21: 1.,
        }
    }
}

impl Parameters {
    /// Returns default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interaction strength derived from e0, e1, e2 and e3.
    pub fn beta(&self) -> f64 {
        get_beta(self.e0, self.e1, self.e2, self.e3)
    }

    /// Returns parameters with e3 derived from the interaction strength `beta`.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.e3 = get_e3(self.e0, self.e1, self.e2, beta);
        self
    }

    /// Returns parameters with given single agent maximal effects, keeping e3.
    pub fn with_emax(mut self, e1: f64, e2: f64) -> Self {
        self.e1 = e1;
        self.e2 = e2;
        self
    }

    /// Returns parameters with given combined maximal effect.
    pub fn with_e3(mut self, e3: f64) -> Self {
        self.e3 = e3;
        self
    }

    /// Returns parameters with given hill slopes.
    pub fn with_slopes(mut self, h1: f64, h2: f64) -> Self {
        self.h1 = h1;
        self.h2 = h2;
        self
    }

    /// Returns parameters with given potencies.
    pub fn with_potencies(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    /// Returns parameters with given interaction coefficients.
    pub fn with_alpha(mut self, alpha12: f64, alpha21: f64) -> Self {
        self.alpha12 = alpha12;
        self.alpha21 = alpha21;
        self
    }

    /// Returns parameters with given interaction exponents.
    pub fn with_gamma(mut self, gamma12: f64, gamma21: f64) -> Self {
        self.gamma12 = gamma12;
        self.gamma21 = gamma21;
        self
    }

    /// Single agent curve of drug 1.
    pub fn hill1(&self) -> Result<Hill> {
        Hill::new(self.e0, self.e1, self.h1, self.c1)
    }

    /// Single agent curve of drug 2.
    pub fn hill2(&self) -> Result<Hill> {
        Hill::new(self.e0, self.e2, self.h2, self.c2)
    }

    /// Checks the domain of every parameter.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("e0", self.e0),
            ("e1", self.e1),
            ("e2", self.e2),
            ("e3", self.e3),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name,
                    value,
                    constraint: "finite",
                });
            }
        }
        let positive = [
            ("h1", self.h1),
            ("h2", self.h2),
            ("c1", self.c1),
            ("c2", self.c2),
            ("gamma12", self.gamma12),
            ("gamma21", self.gamma21),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0. {
                return Err(Error::InvalidParameter {
                    name,
                    value,
                    constraint: "finite and > 0",
                });
            }
        }
        for (name, value) in [("alpha12", self.alpha12), ("alpha21", self.alpha21)] {
            if !value.is_finite() || value < 0. {
                return Err(Error::InvalidParameter {
                    name,
                    value,
                    constraint: "finite and >= 0",
                });
            }
        }
        Ok(())
    }
}

/// Parameters as handled by interactive controls.
///
/// Potencies, slopes, interaction coefficients and exponents are base 10 logarithms, the
/// combined maximal effect is given by the interaction strength beta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogParameters {
    /// Maximal effect of drug 1.
    pub e1: f64,
    /// Maximal effect of drug 2.
    pub e2: f64,
    /// log10 of c1.
    pub log_c1: f64,
    /// log10 of c2.
    pub log_c2: f64,
    /// log10 of h1.
    pub log_h1: f64,
    /// log10 of h2.
    pub log_h2: f64,
    /// log10 of alpha12, [ALPHA_LOG_ZERO] or lower means zero.
    pub log_alpha12: f64,
    /// log10 of alpha21, [ALPHA_LOG_ZERO] or lower means zero.
    pub log_alpha21: f64,
    /// log10 of gamma12.
    pub log_gamma12: f64,
    /// log10 of gamma21.
    pub log_gamma21: f64,
    /// Interaction strength.
    pub beta: f64,
}

impl From<&Parameters> for LogParameters {
    fn from(p: &Parameters) -> Self {
        let log_alpha = |alpha: f64| {
            if alpha > 0. {
                alpha.log10().max(ALPHA_LOG_ZERO)
            } else {
                ALPHA_LOG_ZERO
            }
        };
        Self {
            e1: p.e1,
            e2: p.e2,
            log_c1: p.c1.log10(),
            log_c2: p.c2.log10(),
            log_h1: p.h1.log10(),
            log_h2: p.h2.log10(),
            log_alpha12: log_alpha(p.alpha12),
            log_alpha21: log_alpha(p.alpha21),
            log_gamma12: p.gamma12.log10(),
            log_gamma21: p.gamma21.log10(),
            beta: p.beta(),
        }
    }
}

impl LogParameters {
    /// Converts into a linear parameter snapshot for baseline effect `e0`.
    pub fn to_parameters(&self, e0: f64) -> Parameters {
        let alpha = |log_alpha: f64| {
            if log_alpha <= ALPHA_LOG_ZERO {
                0.
            } else {
                10f64.powf(log_alpha)
            }
        };
        Parameters {
            e0,
            e1: self.e1,
            e2: self.e2,
            e3: get_e3(e0, self.e1, self.e2, self.beta),
            h1: 10f64.powf(self.log_h1),
            h2: 10f64.powf(self.log_h2),
            c1: 10f64.powf(self.log_c1),
            c2: 10f64.powf(self.log_c2),
            alpha12: alpha(self.log_alpha12),
            alpha21: alpha(self.log_alpha21),
            gamma12: 10f64.powf(self.log_gamma12),
            gamma21: 10f64.powf(self.log_gamma21),
        }
    }
}
