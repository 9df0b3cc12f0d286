//! Run coordinator implementation.
//!
//! Songs are processed strictly one after another. Before each song the
//! ledger must be able to cover one search plus one add; once it cannot, the
//! run halts and every remaining song is reported as skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::matcher::{MatchEngine, MatchResult, SkipReason};
use crate::playlist::{NewPlaylist, PlaylistPrivacy, PlaylistSink};
use crate::setlist::{SetlistInfo, SetlistSource, SongEntry};

use super::types::{
    AddOutcome, QuotaStatus, RunError, RunEstimate, RunProgress, RunReport, SongReport,
};

/// Callback invoked after each song is processed.
pub type ProgressCallback = Arc<dyn Fn(&RunProgress<'_>) + Send + Sync>;

/// Fetch a setlist, rejecting one with no songs.
pub async fn fetch_setlist(
    source: &dyn SetlistSource,
    url: &str,
) -> Result<SetlistInfo, RunError> {
    let setlist = source.fetch(url).await?;
    if setlist.songs.is_empty() {
        return Err(RunError::EmptySetlist);
    }
    info!(
        "Fetched setlist from {}: {} at {} ({} songs)",
        source.name(),
        setlist.artist,
        setlist.venue,
        setlist.songs.len()
    );
    Ok(setlist)
}

/// Create the target playlist for a setlist.
pub async fn create_playlist(
    sink: &dyn PlaylistSink,
    setlist: &SetlistInfo,
    privacy: PlaylistPrivacy,
) -> Result<String, RunError> {
    let request = NewPlaylist {
        title: setlist.playlist_title(),
        description: setlist.playlist_description(),
        privacy,
    };
    Ok(sink.create_playlist(&request).await?)
}

/// Drives song entries through the match engine and into the playlist.
pub struct RunCoordinator {
    engine: MatchEngine,
    sink: Option<(Arc<dyn PlaylistSink>, String)>,
    stop: Arc<AtomicBool>,
    on_progress: Option<ProgressCallback>,
}

impl RunCoordinator {
    /// Create a coordinator in preview mode (no playlist writes).
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            engine,
            sink: None,
            stop: Arc::new(AtomicBool::new(false)),
            on_progress: None,
        }
    }

    /// Add found videos to `playlist_id` through `sink`.
    pub fn with_playlist(mut self, sink: Arc<dyn PlaylistSink>, playlist_id: impl Into<String>) -> Self {
        self.sink = Some((sink, playlist_id.into()));
        self
    }

    /// Share an externally owned stop flag.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Register a progress callback.
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Flag that, once set, cancels the remaining songs.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn is_preview(&self) -> bool {
        self.sink.is_none()
    }

    /// Current quota and cache status.
    pub fn status(&self) -> QuotaStatus {
        QuotaStatus::collect(self.engine.ledger(), self.engine.cache().as_ref())
    }

    /// Worst-case cost of running `songs`, ignoring cache hits.
    pub fn estimate(&self, songs: &[SongEntry]) -> RunEstimate {
        let ledger = self.engine.ledger();
        let worst_case_units = ledger.limits().per_song_reserve() * songs.len() as u64;

        RunEstimate {
            song_count: songs.len(),
            worst_case_units,
            units_used: ledger.used(),
            affordable: ledger.can_afford(worst_case_units),
        }
    }

    /// Process every song and report the outcome set.
    pub async fn run(&self, songs: &[SongEntry]) -> RunReport {
        let ledger = Arc::clone(self.engine.ledger());
        let reserve = ledger.limits().per_song_reserve();
        let total = songs.len();

        info!(
            "Starting run: {} songs, {} units already used{}",
            total,
            ledger.used(),
            if self.is_preview() { " (preview)" } else { "" }
        );

        let mut report = RunReport::default();

        for (index, song) in songs.iter().enumerate() {
            if !report.cancelled && !report.halted {
                if self.stop.load(Ordering::SeqCst) {
                    warn!("Run cancelled before song {}/{}", index + 1, total);
                    report.cancelled = true;
                } else if !ledger.can_afford(reserve) {
                    warn!(
                        "Quota ceiling reached ({} units used), halting before song {}/{}",
                        ledger.used(),
                        index + 1,
                        total
                    );
                    report.halted = true;
                }
            }

            let (result, add) = if report.cancelled {
                (MatchResult::skipped(SkipReason::Cancelled), None)
            } else if report.halted {
                (MatchResult::skipped(SkipReason::QuotaExhausted), None)
            } else {
                let result = self.engine.resolve(song).await;
                let add = self.add_to_playlist(&result).await;
                (result, add)
            };

            if let Some(callback) = &self.on_progress {
                callback(&RunProgress {
                    index,
                    total,
                    song,
                    result: &result,
                    add: add.as_ref(),
                    units_used: ledger.used(),
                });
            }

            report.songs.push(SongReport {
                index,
                song: song.clone(),
                result,
                add,
            });
        }

        report.units_used = ledger.used();
        info!(
            "Run finished: {} found, {} not found, {} skipped, {} added, {} units used",
            report.found_count(),
            report.not_found_count(),
            report.skipped_count(),
            report.added_count(),
            report.units_used
        );
        report
    }

    async fn add_to_playlist(&self, result: &MatchResult) -> Option<AddOutcome> {
        let (sink, playlist_id) = self.sink.as_ref()?;
        let video = result.video()?;
        let ledger = self.engine.ledger();
        let cost = ledger.playlist_add_cost();

        if !ledger.can_afford(cost) {
            warn!("Not enough quota to add {} to the playlist", video.video_id);
            return Some(AddOutcome::SkippedQuota);
        }

        ledger.charge(cost);
        match sink.add_video(playlist_id, &video.video_id).await {
            Ok(()) => {
                debug!("Added {} to playlist {}", video.video_id, playlist_id);
                Some(AddOutcome::Added)
            }
            Err(e) => {
                warn!(
                    "Failed to add {} to playlist via {}: {}",
                    video.video_id,
                    sink.name(),
                    e
                );
                Some(AddOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
