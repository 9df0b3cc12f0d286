//! Run coordination.
//!
//! The coordinator walks a setlist through the match engine:
//! - **Admission**: a song starts only if one search plus one add still fits
//! - **Resolution**: sequential, one song at a time
//! - **Playlist writes**: skipped in preview mode, failures never abort the run

mod runner;
mod types;

pub use runner::{create_playlist, fetch_setlist, ProgressCallback, RunCoordinator};
pub use types::*;
