//! # qrgrid
//!
//! A Rust library for recovering the module grid of a rendered QR code: how many modules it
//! has per side, how wide its quiet zone is, and which modules belong to finder and alignment
//! patterns. The data region is never decoded.
//!
//! ## Features
//!
//! - **Geometry detection**: Module count and quiet zone from an axis aligned raster image
//! - **Finder validation**: Candidate sizes are checked against the 1:1:3:1:1 finder layout
//! - **Pattern classification**: Finder, alignment and data modules for any standard size
//! - **Module sampling**: Dark/light value of every module once the geometry is known
//! - **Synthetic symbols**: Function pattern grids rendered at any scale for testing
//!
//! ## Quick Start
//!
//! ### Detecting geometry
//!
//! ```rust,no_run
//! use qrgrid::detect;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("qr_code.png")?;
//! let est = detect(&img)?;
//! println!("{} modules, {}px quiet zone", est.module_count, est.quiet_zone);
//! # Ok(())
//! # }
//! ```
//!
//! ### Classifying modules
//!
//! ```rust
//! use qrgrid::{alignment_centers, is_alignment, is_finder, AlignmentCenter, ModuleKind};
//!
//! assert!(is_finder(0, 0, 25));
//! assert!(!is_finder(8, 8, 25));
//! assert_eq!(alignment_centers(25), vec![AlignmentCenter { x: 18, y: 18 }]);
//! assert!(is_alignment(16, 20, 25));
//! assert_eq!(ModuleKind::classify(12, 12, 25), ModuleKind::Data);
//! ```
//!
//! ### Tuning the detector
//!
//! ```rust
//! use qrgrid::{builder::Grid, sample_modules, Binarize, Color, GeometryDetector, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut grid = Grid::new(Version::new(3).unwrap());
//! grid.draw_all_function_patterns();
//! grid.fill_data(|r, c| Color::from((r + c) % 2 == 0));
//! let img = grid.to_image(4, 16);
//!
//! let bin = img.binarize(128);
//! let est = GeometryDetector::new().narrow_radius(2).wide_radius(4).detect_binary(&bin)?;
//! assert_eq!(est.module_count, 29);
//! assert_eq!(est.finder_score, 3);
//!
//! let modules = sample_modules(&bin, &est);
//! assert_eq!(modules.get(0, 0), Some(Color::Dark));
//! # Ok(())
//! # }
//! ```
//!
//! ## Detection stages
//!
//! 1. Binarize with a fixed luminance threshold (128 by default)
//! 2. Bound the dark pixels; the quiet zone is the mean of the four margins
//! 3. Estimate the module size from the shortest runs of the middle row
//! 4. Refine it from the top-left finder if its 1:1:3:1:1 ratio checks out
//! 5. Try standard sizes near the implied module count, scoring each by how many finders
//!    read correctly, and widen the search if none scores 3

#![allow(clippy::items_after_test_module)]

pub mod builder;
mod common;
pub mod layout;
pub mod reader;

pub use common::*;
pub use layout::Layout;
pub use reader::{
    binarize::{Binarize, BinaryImage},
    bounds::BoundingBox,
    detect,
    sample::{sample_modules, ModuleMatrix},
    GeometryDetector, GeometryEstimate,
};
