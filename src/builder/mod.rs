//! Synthetic symbols for tests, benchmarks and demos.
//!
//! [`Grid`] lays out the function patterns of any version and leaves the data region to the
//! caller; nothing is encoded. Rendering supports arbitrary module scales and per-side
//! margins so detection can be checked against known geometry.

mod grid;

pub use grid::{Grid, Module};
