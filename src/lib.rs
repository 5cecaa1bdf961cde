//! Pixel Evolver grows pictures which resemble a target image, using a genetic
//! algorithm. Every cell of a picture is a small gaussian color generator, and
//! square blocks of cells ("genes") are the unit of crossover and mutation.
//!
//! The [evolver::Evolver] owns the population and runs the generational loop.
//! Image files are read and written through [raster::ColorMatrix], and
//! survivors are handed to an [archive::Archive] at checkpoints.

pub mod archive;
pub mod config;
pub mod error;
pub mod evolver;
pub mod fitness;
pub mod gene;
pub mod picture;
pub mod pixel;
pub mod raster;

pub use config::EvolverConfig;
pub use error::{Error, Result};
pub use evolver::Evolver;
