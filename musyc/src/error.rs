/// Main error type
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// A count is lower than required.
    #[error("minimal value for {name} is {ge_value} but got {value}")]
    MinValue {
        /// Name of the count.
        name: &'static str,
        /// Given value.
        value: usize,
        /// Required minimum value.
        ge_value: usize,
    },
    /// Minimal distance between a lower and an upper bound is violated.
    #[error("distance between {lower} and {upper} is {distance} but should > {gt_distance}")]
    MinDistance {
        /// Name of the lower bound.
        lower: &'static str,
        /// Name of the upper bound.
        upper: &'static str,
        /// Found distance between both bounds.
        distance: f64,
        /// Minimal required distance.
        gt_distance: f64,
    },
    /// Two parallel arrays do not have the same length.
    #[error("array {vec1} with len {len1} and {vec2} with len {len2} must have equal len")]
    ShapeMismatch {
        /// Name of array 1.
        vec1: &'static str,
        /// Name of array 2.
        vec2: &'static str,
        /// Length of array 1.
        len1: usize,
        /// Length of array 2.
        len2: usize,
    },
    /// Flat dose-effect triples do not span a rectangular grid.
    #[error(
        "{len} points cannot be reshaped into a grid of {n_d2} distinct d2 by {n_d1} distinct d1 values"
    )]
    NonRectangular {
        /// Number of given points.
        len: usize,
        /// Number of distinct drug 1 doses.
        n_d1: usize,
        /// Number of distinct drug 2 doses.
        n_d2: usize,
    },
    /// An operation received no points at all.
    #[error("{name} must not be empty")]
    EmptyInput {
        /// Name of the input.
        name: &'static str,
    },
    /// A model parameter lies outside of its valid domain.
    #[error("parameter {name} = {value} violates constraint {constraint}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Given value.
        value: f64,
        /// Human readable constraint.
        constraint: &'static str,
    },
}

/// Main result type
pub type Result<T> = std::result::Result<T, Error>;
