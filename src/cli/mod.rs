//! Command-line interface definitions.
//!
//! Provides CLI structure and output formatting:
//! - `Cli`, `Commands`, `AreaArgs`: CLI argument definitions via clap
//! - `Display`: Styled terminal output for profiles, matches and warnings

mod commands;
mod display;

pub use commands::{AreaArgs, Cli, Commands, OutputFormat};
pub use display::Display;
