//! Review profile system.
//!
//! Profiles are markdown guideline documents selected per area and merged into
//! one guideline text:
//!
//! | Stage    | Type               | Role                                        |
//! |----------|--------------------|---------------------------------------------|
//! | Load     | `ProfileLoader`    | Parse and validate documents into a catalog |
//! | Match    | `ProfileMatcher`   | Select profiles for an area                 |
//! | Resolve  | `ProfileResolver`  | Expand `extends`, add language bases        |
//! | Merge    | `ProfileChain`     | Ordered chain and merged guideline text     |
//!
//! Only loading touches the filesystem. Matching and resolution borrow the
//! catalog immutably and can run concurrently for different areas.

mod catalog;
mod chain;
mod loader;
mod matcher;
mod resolver;
mod technology;
mod types;

pub use catalog::{ProfileCatalog, SkippedProfile};
pub use chain::{ProfileChain, ResolutionWarning};
pub use loader::ProfileLoader;
pub use matcher::{MatchReason, ProfileMatcher};
pub use resolver::{DEFAULT_BASE_FILE, DEFAULT_BASE_LANGUAGES, ProfileResolver};
pub use technology::{TechnologySet, normalize_token};
pub use types::{Profile, ProfileKind, ProfileMatches, UnknownProfileKind};
