pub mod error;
pub mod metadata;
pub mod pattern;
pub mod version_db;

pub use error::*;
pub use metadata::*;
pub use pattern::*;
