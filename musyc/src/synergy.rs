//! Synergy surfaces derived from a combined effect surface.
//!
//! Both metrics compare the combined effect `E` at `(d1, d2)` with the single agent hill
//! curves of the parameter snapshot. Where one of both doses is zero no interaction is
//! possible and each metric takes its neutral value.
use crate::{
    Parameters, Result,
    utils::{check_len, override_single_agent},
};
use nalgebra::DVector;

/// Neutral Bliss excess.
pub const BLISS_NEUTRAL: f64 = 0.;
/// Neutral Loewe index.
pub const LOEWE_NEUTRAL: f64 = 1.;

fn check_shapes(d1: &DVector<f64>, d2: &DVector<f64>, e: &DVector<f64>) -> Result<()> {
    check_len("d1", d1.len(), "d2", d2.len())?;
    check_len("d1", d1.len(), "e", e.len())
}

/// Bliss excess `E1(d1) * E2(d2) - E`.
///
/// `E1` and `E2` are the single agent hill curves evaluated at their own dose. The excess
/// is exactly [BLISS_NEUTRAL] wherever `d1 == 0` or `d2 == 0`.
pub fn bliss(
    d1: &DVector<f64>,
    d2: &DVector<f64>,
    e: &DVector<f64>,
    params: &Parameters,
) -> Result<DVector<f64>> {
    check_shapes(d1, d2, e)?;
    let e1_alone = params.hill1()?.val_vec(d1);
    let e2_alone = params.hill2()?.val_vec(d2);
    let mut synergy = e1_alone.component_mul(&e2_alone) - e;
    override_single_agent(d1, d2, &mut synergy, BLISS_NEUTRAL);
    Ok(synergy)
}

/// Loewe index `d1 / D1(E) + d2 / D2(E)`.
///
/// `D1` and `D2` are the inverse single agent hill curves, i.e. the dose each drug alone
/// needs to reach the combined effect. Unreachable effects propagate as NaN. Divisions by
/// zero and invalid powers along the axes are overridden, the index is exactly
/// [LOEWE_NEUTRAL] wherever `d1 == 0` or `d2 == 0`.
pub fn loewe(
    d1: &DVector<f64>,
    d2: &DVector<f64>,
    e: &DVector<f64>,
    params: &Parameters,
) -> Result<DVector<f64>> {
    check_shapes(d1, d2, e)?;
    let d1_alone = params.hill1()?.inv_vec(e);
    let d2_alone = params.hill2()?.inv_vec(e);
    let mut synergy = d1.component_div(&d1_alone) + d2.component_div(&d2_alone);
    override_single_agent(d1, d2, &mut synergy, LOEWE_NEUTRAL);
    Ok(synergy)
}

/// Elementwise `-ln(v)`, centering the additive Loewe index 1 at 0.
pub fn neg_log(values: &DVector<f64>) -> DVector<f64> {
    values.map(|v| -v.ln())
}
