pub mod area;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod review;

pub use area::{Area, AreaManifest, Technology, TechnologyKind};
pub use config::ReviewConfig;
pub use error::{Result, ReviewError};
pub use profile::{
    Profile, ProfileCatalog, ProfileChain, ProfileKind, ProfileLoader, ProfileMatcher,
    ProfileResolver, ResolutionWarning,
};
pub use review::{MatchInfo, ReviewEnhancer};
