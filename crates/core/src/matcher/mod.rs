//! Song-to-video matching.

mod engine;
mod types;

pub use engine::{MatchEngine, DEFAULT_MAX_RESULTS};
pub use types::*;
