use crate::{Error, Result, utils::check_len};
use log::trace;
use nalgebra::{DMatrix, DVector};

/// Square dose lattice defined by a log-spaced range per drug plus an explicit zero dose.
///
/// Each axis consists of `0` followed by `n` log-spaced doses between `10^lower` and
/// `10^upper`. The flat dose arrays enumerate the cartesian product with drug 1 varying
/// fastest, which is already the `(d2, d1)` lexicographic order used by [assemble_grid].
#[derive(Debug, Clone, PartialEq)]
pub struct DoseLattice {
    /// Lower exponent (base 10) of the log-spaced doses.
    pub lower: f64,
    /// Upper exponent (base 10) of the log-spaced doses.
    pub upper: f64,
    /// Number of log-spaced doses per axis, the zero dose excluded.
    pub n: usize,
    axis: DVector<f64>,
    d1: DVector<f64>,
    d2: DVector<f64>,
}

impl Default for DoseLattice {
    fn default() -> Self {
        let n = 30;
        let axis = Self::build_axis(-3., 3., n);
        let (d1, d2) = Self::mesh(&axis);
        Self {
            lower: -3.,
            upper: 3.,
            n,
            axis,
            d1,
            d2,
        }
    }
}

impl DoseLattice {
    /// Creates lattice with `n` log-spaced doses on `[10^lower, 10^upper]` per axis.
    pub fn new(n: usize, lower: f64, upper: f64) -> Result<Self> {
        if n < 2 {
            return Err(Error::MinValue {
                name: "n",
                value: n,
                ge_value: 2,
            });
        }
        let distance = upper - lower;
        if distance.is_nan() || distance <= 0.0 {
            return Err(Error::MinDistance {
                lower: "lower",
                upper: "upper",
                distance,
                gt_distance: 0.0,
            });
        }
        let axis = Self::build_axis(lower, upper, n);
        let (d1, d2) = Self::mesh(&axis);
        Ok(Self {
            lower,
            upper,
            n,
            axis,
            d1,
            d2,
        })
    }

    fn build_axis(lower: f64, upper: f64, n: usize) -> DVector<f64> {
        let step = (upper - lower) / (n as f64 - 1.);
        let mut axis = DVector::zeros(n + 1);
        for i in 0..n {
            let exponent = if i == n - 1 {
                upper
            } else {
                i as f64 * step + lower
            };
            axis[i + 1] = 10f64.powf(exponent);
        }
        axis
    }

    fn mesh(axis: &DVector<f64>) -> (DVector<f64>, DVector<f64>) {
        let m = axis.len();
        let d1 = DVector::from_fn(m * m, |k, _| axis[k % m]);
        let d2 = DVector::from_fn(m * m, |k, _| axis[k / m]);
        (d1, d2)
    }

    /// Doses of one axis, starting with the zero dose.
    pub fn axis(&self) -> &DVector<f64> {
        &self.axis
    }

    /// Flat drug 1 doses of every lattice point.
    pub fn d1(&self) -> &DVector<f64> {
        &self.d1
    }

    /// Flat drug 2 doses of every lattice point.
    pub fn d2(&self) -> &DVector<f64> {
        &self.d2
    }

    /// Number of lattice points `(n+1)^2`.
    pub fn len(&self) -> usize {
        self.d1.len()
    }

    /// Returns true if the lattice holds no points.
    pub fn is_empty(&self) -> bool {
        self.d1.is_empty()
    }

    /// Grid shape `(n_d2, n_d1)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.axis.len(), self.axis.len())
    }

    /// Assembles the flat values `z` evaluated on this lattice into a grid.
    pub fn grid(&self, z: &DVector<f64>) -> Result<SurfaceGrid> {
        assemble_grid(&self.d1, &self.d2, z)
    }
}

/// Rectangular dose grid with one value per dose pair.
///
/// Rows follow drug 2 doses, columns follow drug 1 doses, both ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    /// Drug 1 doses of shape `(n_d2, n_d1)`.
    pub d1: DMatrix<f64>,
    /// Drug 2 doses of shape `(n_d2, n_d1)`.
    pub d2: DMatrix<f64>,
    /// Values of shape `(n_d2, n_d1)`.
    pub z: DMatrix<f64>,
}

impl SurfaceGrid {
    /// Grid shape `(n_d2, n_d1)`.
    pub fn shape(&self) -> (usize, usize) {
        self.z.shape()
    }

    /// Flattens the grid back into parallel arrays ordered by `(d2, d1)`.
    pub fn flatten(&self) -> (DVector<f64>, DVector<f64>, DVector<f64>) {
        let row_major = |m: &DMatrix<f64>| DVector::from_column_slice(m.transpose().as_slice());
        (row_major(&self.d1), row_major(&self.d2), row_major(&self.z))
    }
}

fn distinct(values: &DVector<f64>) -> Vec<f64> {
    let mut sorted = values.as_slice().to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup_by(|a, b| a.total_cmp(b).is_eq());
    sorted
}

/// Assembles flat `(d1, d2, z)` triples into `(n_d2, n_d1)` matrices.
///
/// The triples are stably sorted by `(d2, d1)`, the number of distinct doses per drug
/// defines the grid shape. Fails with [Error::NonRectangular] if the triples do not cover a
/// full rectangular grid, that is every row holds one drug 2 dose and every column one drug
/// 1 dose.
pub fn assemble_grid(
    d1: &DVector<f64>,
    d2: &DVector<f64>,
    z: &DVector<f64>,
) -> Result<SurfaceGrid> {
    check_len("d1", d1.len(), "d2", d2.len())?;
    check_len("d1", d1.len(), "z", z.len())?;
    if d1.is_empty() {
        return Err(Error::EmptyInput { name: "d1" });
    }

    let len = d1.len();
    let mut idx: Vec<usize> = (0..len).collect();
    idx.sort_by(|&a, &b| d2[a].total_cmp(&d2[b]).then(d1[a].total_cmp(&d1[b])));

    let axis1 = distinct(d1);
    let axis2 = distinct(d2);
    let (n_d1, n_d2) = (axis1.len(), axis2.len());
    if n_d1 * n_d2 != len {
        return Err(Error::NonRectangular { len, n_d1, n_d2 });
    }
    trace!("assembling {len} points into a {n_d2}x{n_d1} grid");

    let reshape = |v: &DVector<f64>| {
        let sorted: Vec<f64> = idx.iter().map(|&i| v[i]).collect();
        DMatrix::from_row_slice(n_d2, n_d1, &sorted)
    };
    let grid = SurfaceGrid {
        d1: reshape(d1),
        d2: reshape(d2),
        z: reshape(z),
    };
    // duplicated dose pairs pass the count check but shift later points out of place
    let complete = (0..n_d2).all(|r| {
        (0..n_d1).all(|c| {
            grid.d1[(r, c)].total_cmp(&axis1[c]).is_eq()
                && grid.d2[(r, c)].total_cmp(&axis2[r]).is_eq()
        })
    });
    if !complete {
        return Err(Error::NonRectangular { len, n_d1, n_d2 });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    #[test]
    fn lattice_default() -> Result<()> {
        let lattice = DoseLattice::default();
        assert_eq!(lattice, DoseLattice::new(30, -3., 3.)?);
        assert_eq!(lattice.len(), 31 * 31);
        assert_eq!(lattice.shape(), (31, 31));
        assert_eq!(lattice.axis()[0], 0.);
        assert_eq!(lattice.axis()[30], 1000.);
        assert!((lattice.axis()[1] - 1e-3).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn lattice_contains_zero_edges() -> Result<()> {
        let lattice = DoseLattice::new(3, 0., 2.)?;
        let d1 = lattice.d1();
        let d2 = lattice.d2();
        assert_eq!(lattice.axis(), &DVector::from_vec(vec![0., 1., 10., 100.]));
        assert_eq!((d1[0], d2[0]), (0., 0.));
        assert_eq!((d1[3], d2[3]), (100., 0.));
        assert_eq!((d1[4], d2[4]), (0., 1.));
        assert_eq!((d1[15], d2[15]), (100., 100.));
        Ok(())
    }

    #[test]
    fn lattice_bound() {
        assert_eq!(
            DoseLattice::new(10, 1., 1.),
            Err(Error::MinDistance {
                lower: "lower",
                upper: "upper",
                distance: 0.,
                gt_distance: 0.,
            })
        );
    }

    #[test]
    fn lattice_sample_size() {
        assert_eq!(
            DoseLattice::new(1, -1., 1.),
            Err(Error::MinValue {
                name: "n",
                value: 1,
                ge_value: 2,
            })
        );
    }

    #[test]
    fn lattice_grid_is_ordered() -> Result<()> {
        let lattice = DoseLattice::new(4, -1., 1.)?;
        let grid = lattice.grid(lattice.d1())?;
        assert_eq!(grid.shape(), (5, 5));
        assert_eq!(grid.z, grid.d1);
        for r in 0..5 {
            for c in 1..5 {
                assert!(grid.d1[(r, c)] > grid.d1[(r, c - 1)]);
                assert_eq!(grid.d2[(r, c)], grid.d2[(r, 0)]);
            }
        }
        Ok(())
    }

    #[test]
    fn grid_round_trip() -> Result<()> {
        let grid = SurfaceGrid {
            d1: dmatrix![0., 1., 2.; 0., 1., 2.],
            d2: dmatrix![0., 0., 0.; 5., 5., 5.],
            z: dmatrix![1., 2., 3.; 4., 5., 6.],
        };
        let (d1, d2, z) = grid.flatten();
        assert_eq!(z, DVector::from_vec(vec![1., 2., 3., 4., 5., 6.]));

        let rev = |v: &DVector<f64>| DVector::from_iterator(v.len(), v.iter().rev().copied());
        let assembled = assemble_grid(&rev(&d1), &rev(&d2), &rev(&z))?;
        assert_eq!(assembled, grid);
        Ok(())
    }

    #[test]
    fn grid_non_rectangular() {
        let d1 = DVector::from_vec(vec![0., 1., 0.]);
        let d2 = DVector::from_vec(vec![0., 0., 1.]);
        let z = DVector::from_vec(vec![1., 2., 3.]);
        assert_eq!(
            assemble_grid(&d1, &d2, &z),
            Err(Error::NonRectangular {
                len: 3,
                n_d1: 2,
                n_d2: 2,
            })
        );
    }

    #[test]
    fn grid_duplicated_pairs() {
        let d1 = DVector::from_vec(vec![0., 1., 1., 0.]);
        let d2 = DVector::from_vec(vec![0., 0., 0., 1.]);
        let z = DVector::from_vec(vec![1., 2., 3., 4.]);
        assert_eq!(
            assemble_grid(&d1, &d2, &z),
            Err(Error::NonRectangular {
                len: 4,
                n_d1: 2,
                n_d2: 2,
            })
        );
    }

    #[test]
    fn grid_shape_mismatch() {
        let d1 = DVector::from_vec(vec![0., 1.]);
        let d2 = DVector::from_vec(vec![0., 0.]);
        let z = DVector::from_vec(vec![1.]);
        assert_eq!(
            assemble_grid(&d1, &d2, &z),
            Err(Error::ShapeMismatch {
                vec1: "d1",
                vec2: "z",
                len1: 2,
                len2: 1,
            })
        );
        let empty = DVector::<f64>::zeros(0);
        assert_eq!(
            assemble_grid(&empty, &empty, &empty),
            Err(Error::EmptyInput { name: "d1" })
        );
    }
}
