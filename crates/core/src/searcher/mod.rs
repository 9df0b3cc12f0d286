//! Video search abstraction.
//!
//! A `VideoSearcher` runs one free-text query and returns the best-ranked
//! video, if any. Every call costs quota whether or not it finds something.

mod types;
mod youtube;

pub use types::*;
pub use youtube::YouTubeSearcher;
