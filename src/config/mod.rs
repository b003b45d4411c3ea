//! Configuration types and loading.
//!
//! `ReviewConfig` is read from an optional `review-profiles.toml`; every
//! section falls back to defaults.

mod settings;

pub use settings::{CONFIG_FILE_NAME, ProfilesConfig, ResolverConfig, ReviewConfig};
