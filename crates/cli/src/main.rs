mod cli;
mod report;

use std::io::{self, BufRead, Write};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use setlist2tube_core::{
    coordinator::ProgressCallback, create_playlist, fetch_setlist, load_config, validate_config,
    JsonVideoCache, MatchEngine, PlaylistSink, QuotaLedger, QuotaStatus, RunCoordinator,
    SanitizedConfig, SetlistFmClient, VideoCache, YouTubePlaylistSink, YouTubeSearcher,
};

use cli::Args;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Loading configuration from {:?}", args.config);
    let mut config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    if let Some(privacy) = args.privacy {
        config.playlist.privacy = privacy;
    }
    validate_config(&config).context("Configuration validation failed")?;
    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let cache = Arc::new(JsonVideoCache::open(
        &config.cache.path,
        config.cache.freshness_days,
    ));
    let ledger = Arc::new(QuotaLedger::from_config(&config.quota));

    // Maintenance commands
    if args.clear_cache {
        cache.clear().context("Failed to clear the video cache")?;
        println!("Video cache cleared.");
    }
    if args.purge_expired {
        let removed = cache
            .purge_expired()
            .context("Failed to purge the video cache")?;
        println!("Removed {} expired cache entries.", removed);
    }
    if args.quota_status {
        report::print_quota_status(&QuotaStatus::collect(&ledger, &*cache));
        return Ok(());
    }

    let Some(url) = args.url.as_deref() else {
        return Ok(());
    };

    // Fetch the setlist
    let setlist_source = SetlistFmClient::new(&config.setlistfm)
        .context("Failed to initialize setlist.fm client")?;
    let setlist = fetch_setlist(&setlist_source, url)
        .await
        .context("Failed to fetch setlist")?;

    report::print_setlist(&setlist);
    if args.show_tracks {
        report::print_tracks(&setlist);
    }

    // Wire up the match engine
    let searcher = Arc::new(
        YouTubeSearcher::new(&config.youtube).context("Failed to initialize YouTube search")?,
    );
    let engine = MatchEngine::new(cache.clone(), ledger.clone(), searcher)
        .with_max_results(config.youtube.max_results);

    let progress: ProgressCallback = Arc::new(report::print_progress);
    let mut coordinator = RunCoordinator::new(engine).on_progress(progress);

    let estimate = coordinator.estimate(&setlist.songs);
    report::print_estimate(&estimate);
    if !estimate.affordable {
        warn!(
            "Worst-case cost {} exceeds the remaining quota ({} used)",
            estimate.worst_case_units, estimate.units_used
        );
    }

    if !args.dry_run && !args.yes && !confirm("Create the playlist?")? {
        println!("Aborted.");
        return Ok(());
    }

    // Create the playlist
    let mut playlist_url = None;
    if !args.dry_run {
        let sink = Arc::new(
            YouTubePlaylistSink::new(&config.youtube)
                .context("Failed to initialize YouTube playlist access")?,
        );
        let playlist_id = create_playlist(&*sink, &setlist, config.playlist.privacy)
            .await
            .context("Failed to create playlist")?;
        playlist_url = Some(sink.playlist_url(&playlist_id));
        coordinator = coordinator.with_playlist(sink, playlist_id);
    } else {
        info!("Dry run: no playlist will be created");
    }

    // Ctrl-C stops after the current song
    let stop = coordinator.stop_flag();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing the current song");
            stop.store(true, Ordering::SeqCst);
        }
    });

    let run_report = coordinator.run(&setlist.songs).await;
    report::print_summary(&run_report, playlist_url.as_deref());

    Ok(())
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
