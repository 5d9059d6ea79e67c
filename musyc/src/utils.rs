use crate::{Error, Result};
use nalgebra::DVector;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Checks that two parallel arrays have the same length.
pub(crate) fn check_len(
    vec1: &'static str,
    len1: usize,
    vec2: &'static str,
    len2: usize,
) -> Result<()> {
    if len1 != len2 {
        return Err(Error::ShapeMismatch {
            vec1,
            vec2,
            len1,
            len2,
        });
    }
    Ok(())
}

/// Evaluates `f` on every dose pair `(d1[i], d2[i])`.
///
/// The caller is responsible for equal lengths.
pub(crate) fn map_pairs<F>(d1: &DVector<f64>, d2: &DVector<f64>, f: F) -> DVector<f64>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    #[cfg(feature = "parallel")]
    let values: Vec<f64> = d1
        .as_slice()
        .par_iter()
        .zip(d2.as_slice().par_iter())
        .map(|(&a, &b)| f(a, b))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let values: Vec<f64> = d1.iter().zip(d2.iter()).map(|(&a, &b)| f(a, b)).collect();
    DVector::from_vec(values)
}

/// Replaces every NaN entry by `fallback` and returns how many entries were replaced.
pub fn replace_nan(values: &mut DVector<f64>, fallback: f64) -> usize {
    let mut replaced = 0;
    values.iter_mut().filter(|v| v.is_nan()).for_each(|v| {
        *v = fallback;
        replaced += 1;
    });
    replaced
}

/// Overrides `values[i]` with `value` wherever one of both doses is exactly zero.
pub(crate) fn override_single_agent(
    d1: &DVector<f64>,
    d2: &DVector<f64>,
    values: &mut DVector<f64>,
    value: f64,
) {
    values
        .iter_mut()
        .zip(d1.iter().zip(d2.iter()))
        .filter(|(_, (a, b))| **a == 0. || **b == 0.)
        .for_each(|(v, _)| *v = value);
}
