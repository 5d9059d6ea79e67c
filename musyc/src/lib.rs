#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../../README.md")]
mod controller;
mod error;
mod hill;
mod lattice;
mod musyc;
mod params;
mod surface;
pub mod synergy;
mod utils;

pub use controller::{
    Camera, CameraSync, Controller, Frame, Pause, PauseGuard, Preset, Slider, SliderRange, View,
};
pub use error::{Error, Result};
pub use hill::Hill;
pub use lattice::{DoseLattice, SurfaceGrid, assemble_grid};
pub use musyc::{Musyc, StateWeights};
pub use params::{ALPHA_LOG_ZERO, LogParameters, Parameters, get_beta, get_e3};
pub use surface::{
    ColorScale, EFFECT_FALLBACK, PlotStyle, SurfaceKind, SurfacePlot, Surfaces, X_TITLE, Y_TITLE,
    linear_axis, log_axis,
};
pub use utils::replace_nan;
