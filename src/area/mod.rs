//! Area descriptors supplied by the codebase-analysis stage.
//!
//! An `Area` is read-only input to matching; the core never derives one.

mod manifest;
mod types;

pub use manifest::AreaManifest;
pub use types::{Area, Technology, TechnologyKind};
