//! Run lifecycle integration tests.
//!
//! These tests drive whole setlists through the coordinator:
//! cache lookup -> query planning -> admission -> search -> playlist add

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tempfile::TempDir;

use setlist2tube_core::{
    coordinator::ProgressCallback,
    quota::UsageJournal,
    testing::{fixtures, MockPlaylistSink, MockSearcher},
    AddOutcome, CacheKey, JsonVideoCache, MatchEngine, MatchResult, QuotaLedger, QuotaLimits,
    RunCoordinator, RunProgress, SkipReason, SongEntry, VideoCache,
};

/// Test helper wiring a file-backed cache, a ledger and the mocks.
struct TestHarness {
    cache: Arc<JsonVideoCache>,
    ledger: Arc<QuotaLedger>,
    searcher: Arc<MockSearcher>,
    sink: Arc<MockPlaylistSink>,
    temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cache = Arc::new(JsonVideoCache::open(temp_dir.path().join("video_cache.json"), 7));

        Self {
            cache,
            ledger: Arc::new(QuotaLedger::new(QuotaLimits::default())),
            searcher: Arc::new(MockSearcher::new()),
            sink: Arc::new(MockPlaylistSink::new()),
            temp_dir,
        }
    }

    fn engine(&self) -> MatchEngine {
        MatchEngine::new(self.cache.clone(), self.ledger.clone(), self.searcher.clone())
    }

    fn preview(&self) -> RunCoordinator {
        RunCoordinator::new(self.engine())
    }

    fn publishing(&self) -> RunCoordinator {
        RunCoordinator::new(self.engine()).with_playlist(self.sink.clone(), "PL-test")
    }
}

/// Collects the ledger reading after each song.
fn usage_recorder() -> (ProgressCallback, Arc<Mutex<Vec<u64>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback: ProgressCallback = Arc::new(move |progress: &RunProgress<'_>| {
        sink.lock().unwrap().push(progress.units_used);
    });
    (callback, seen)
}

#[tokio::test]
async fn test_cached_cover_and_unmatched_scenario() {
    let h = TestHarness::new();

    // Song A is already cached
    let song_a = SongEntry::new("Creep", "Radiohead");
    h.cache
        .store(
            &CacheKey::for_song(&song_a),
            fixtures::cache_entry("XFkzRNyygfk", "Creep Radiohead"),
        )
        .unwrap();

    // Song B matches on its first planned query
    let song_b = SongEntry::cover("Hallelujah", "Radiohead", "Leonard Cohen");
    h.searcher
        .set_result("Hallelujah Leonard Cohen", fixtures::video("YrLk4vdY28Q", "Hallelujah"))
        .await;

    // Song C is a cover nobody uploaded: 4 planned queries, all empty
    let song_c = SongEntry::cover("Lost Demo", "Radiohead", "Nobody");

    let (callback, usage) = usage_recorder();
    let report = h
        .publishing()
        .on_progress(callback)
        .run(&[song_a, song_b, song_c.clone()])
        .await;

    // A: cache hit, add only
    let a = report.songs[0].result.video().unwrap();
    assert!(a.from_cache);
    assert_eq!(report.songs[0].add, Some(AddOutcome::Added));

    // B: found on the first query
    let b = report.songs[1].result.video().unwrap();
    assert_eq!(b.video_id, "YrLk4vdY28Q");
    assert_eq!(b.query, "Hallelujah Leonard Cohen");

    // C: not found after every planned query
    assert_eq!(report.songs[2].result, MatchResult::NotFound);
    assert_eq!(report.songs[2].add, None);

    // B costs 100 + 50 and C costs 4 x 100: 550 on top of A's add
    let usage = usage.lock().unwrap().clone();
    assert_eq!(usage, vec![50, 200, 600]);
    assert_eq!(usage[2] - usage[0], 550);
    assert_eq!(report.units_used, 600);

    assert_eq!(
        h.searcher.recorded_queries().await,
        vec![
            "Hallelujah Leonard Cohen",
            "Lost Demo Nobody",
            "Lost Demo - Nobody",
            "Lost Demo Radiohead",
            "Lost Demo official",
        ]
    );
    assert_eq!(h.sink.added_videos().await, vec!["XFkzRNyygfk", "YrLk4vdY28Q"]);
    assert_eq!(report.not_found().collect::<Vec<_>>(), vec![&song_c]);

    // B was written to the cache, C was not
    assert_eq!(h.cache.stats().total_entries, 2);
}

#[tokio::test]
async fn test_preview_scenario_charges_searches_only() {
    let h = TestHarness::new();
    let song_a = SongEntry::new("Creep", "Radiohead");
    h.cache
        .store(
            &CacheKey::for_song(&song_a),
            fixtures::cache_entry("XFkzRNyygfk", "Creep Radiohead"),
        )
        .unwrap();
    h.searcher
        .set_result("Hallelujah Leonard Cohen", fixtures::video("YrLk4vdY28Q", "Hallelujah"))
        .await;

    let report = h
        .preview()
        .run(&[
            song_a,
            SongEntry::cover("Hallelujah", "Radiohead", "Leonard Cohen"),
            SongEntry::cover("Lost Demo", "Radiohead", "Nobody"),
        ])
        .await;

    assert_eq!(report.units_used, 500);
    assert!(report.songs.iter().all(|s| s.add.is_none()));
    assert_eq!(h.sink.add_count().await, 0);
}

#[tokio::test]
async fn test_halt_propagates_to_remaining_songs() {
    let h = TestHarness::new();
    h.searcher
        .set_query_handler(|q| Some(fixtures::video(&q.replace(' ', "-"), q)))
        .await;
    // Song 1: 9200 + 150 < 9500, then search (9300) and add (9350).
    // Song 2: 9350 + 150 is not below 9500, so the run halts.
    h.ledger.charge(9_200);

    let songs = fixtures::songs(&["One", "Two", "Three"], "Band");
    let report = h.publishing().run(&songs).await;

    assert!(report.halted);
    assert!(report.songs[0].result.is_found());
    assert_eq!(
        report.songs[1].result,
        MatchResult::skipped(SkipReason::QuotaExhausted)
    );
    assert_eq!(
        report.songs[2].result,
        MatchResult::skipped(SkipReason::QuotaExhausted)
    );
    assert_eq!(report.skipped_for(SkipReason::QuotaExhausted), 2);

    assert_eq!(h.searcher.search_count().await, 1);
    assert_eq!(h.sink.add_count().await, 1);
    assert_eq!(h.ledger.used(), 9_350);
}

#[tokio::test]
async fn test_exhausted_ledger_makes_no_calls() {
    let h = TestHarness::new();
    h.ledger.charge(9_500);

    let songs = fixtures::songs(&["One", "Two"], "Band");
    let report = h.publishing().run(&songs).await;

    assert!(report.halted);
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(h.searcher.search_count().await, 0);
    assert_eq!(h.sink.add_count().await, 0);
    assert_eq!(report.units_used, 9_500);
}

#[tokio::test]
async fn test_sink_failure_does_not_stop_run() {
    let h = TestHarness::new();
    h.searcher
        .set_result("One Band", fixtures::video("vid-one", "One"))
        .await;
    h.searcher
        .set_result("Two Band", fixtures::video("vid-two", "Two"))
        .await;
    h.sink.fail_video("vid-one").await;

    let songs = fixtures::songs(&["One", "Two"], "Band");
    let report = h.publishing().run(&songs).await;

    assert!(matches!(report.songs[0].add, Some(AddOutcome::Failed { .. })));
    assert_eq!(report.songs[1].add, Some(AddOutcome::Added));
    assert_eq!(report.failed_add_count(), 1);
    assert_eq!(report.added_count(), 1);
    // Failed adds are charged like successful ones
    assert_eq!(report.units_used, 300);
    assert_eq!(h.sink.added_videos().await, vec!["vid-two"]);

    let attempts = h.sink.recorded_adds().await;
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| a.playlist_id == "PL-test"));
    assert_eq!(attempts[0].video_id, "vid-one");
    assert!(!attempts[0].success);
    assert!(attempts[1].success);
}

#[tokio::test]
async fn test_stop_flag_cancels_remaining_songs() {
    let h = TestHarness::new();
    h.searcher
        .set_query_handler(|q| Some(fixtures::video("any", q)))
        .await;

    let coordinator = h.preview();
    let stop = coordinator.stop_flag();
    let callback: ProgressCallback = Arc::new(move |progress: &RunProgress<'_>| {
        if progress.index == 0 {
            stop.store(true, Ordering::SeqCst);
        }
    });

    let songs = fixtures::songs(&["One", "Two", "Three"], "Band");
    let report = coordinator.on_progress(callback).run(&songs).await;

    assert!(report.cancelled);
    assert!(!report.halted);
    assert!(report.songs[0].result.is_found());
    assert_eq!(report.skipped_for(SkipReason::Cancelled), 2);
    assert_eq!(h.searcher.search_count().await, 1);
}

#[tokio::test]
async fn test_cache_survives_reopen_and_saves_quota() {
    let h = TestHarness::new();
    h.searcher
        .set_result("Creep Radiohead", fixtures::video("XFkzRNyygfk", "Creep"))
        .await;
    let songs = vec![SongEntry::new("Creep", "Radiohead")];

    let first = h.preview().run(&songs).await;
    assert_eq!(first.units_used, 100);

    // A second process reads the same file
    let reopened: Arc<JsonVideoCache> = Arc::new(JsonVideoCache::open(
        h.temp_dir.path().join("video_cache.json"),
        7,
    ));
    let ledger = Arc::new(QuotaLedger::new(QuotaLimits::default()));
    let searcher = Arc::new(MockSearcher::new());
    let engine = MatchEngine::new(reopened.clone(), ledger.clone(), searcher.clone());

    let second = RunCoordinator::new(engine).run(&songs).await;

    let video = second.songs[0].result.video().unwrap();
    assert!(video.from_cache);
    assert_eq!(video.query, "Creep Radiohead");
    assert_eq!(ledger.used(), 0);
    assert_eq!(searcher.search_count().await, 0);
    assert_eq!(reopened.lookup(&CacheKey::new("creep", "radiohead")).unwrap().video_id, "XFkzRNyygfk");
}

#[tokio::test]
async fn test_daily_journal_carries_usage_between_runs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("quota_usage.json");
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let songs = fixtures::songs(&["Unreleased"], "Band");

    let ledger = Arc::new(QuotaLedger::with_journal(
        QuotaLimits::default(),
        UsageJournal::new(&path),
        today,
    ));
    let engine = MatchEngine::new(
        Arc::new(JsonVideoCache::in_memory()),
        ledger.clone(),
        Arc::new(MockSearcher::new()),
    );
    RunCoordinator::new(engine).run(&songs).await;
    assert_eq!(ledger.used(), 300);

    let resumed = QuotaLedger::with_journal(QuotaLimits::default(), UsageJournal::new(&path), today);
    assert_eq!(resumed.used(), 300);
    assert_eq!(resumed.remaining(), 9_700);

    let tomorrow = today.succ_opt().unwrap();
    let next_day = QuotaLedger::with_journal(QuotaLimits::default(), UsageJournal::new(&path), tomorrow);
    assert_eq!(next_day.used(), 0);
}
