//! Review prompt enhancement.
//!
//! Connects the profile pipeline to the prompts of the surrounding review
//! tool: enhanced prompt sections, a debug view and per-area match summaries.

mod enhancer;

pub use enhancer::{MatchInfo, MatchedProfile, ReviewEnhancer, guideline_count};
