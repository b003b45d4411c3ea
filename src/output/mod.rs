//! Machine-readable command output.
//!
//! - `OutputWriter`: emits results as JSON or unstyled text
//! - `CatalogOutput`, `DebugOutput`: serializable result shapes

mod writer;

pub use writer::{CatalogOutput, DebugOutput, ExplainedMatch, OutputWriter};
