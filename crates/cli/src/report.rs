//! Terminal rendering for setlists, progress and run summaries.

use setlist2tube_core::{
    AddOutcome, MatchResult, QuotaStatus, RunEstimate, RunProgress, RunReport, SetlistInfo,
    SkipReason,
};

const RULE: &str = "============================================================";

pub fn print_setlist(setlist: &SetlistInfo) {
    println!("{}", RULE);
    println!("{}", setlist.artist);
    println!("{}, {} ({})", setlist.venue, setlist.city, setlist.date);
    println!("{} songs", setlist.songs.len());
    println!("{}", RULE);
}

pub fn print_tracks(setlist: &SetlistInfo) {
    for (i, song) in setlist.songs.iter().enumerate() {
        match song.cover_of() {
            Some(original) => println!("{:>3}. {} ({} cover)", i + 1, song.title, original),
            None => println!("{:>3}. {}", i + 1, song.title),
        }
    }
    println!();
}

pub fn print_estimate(estimate: &RunEstimate) {
    println!(
        "Worst case: {} units for {} songs ({} already used today)",
        estimate.worst_case_units, estimate.song_count, estimate.units_used
    );
    if !estimate.affordable {
        println!("Warning: the remaining quota may not cover every song; the run stops early if needed.");
    }
}

/// One line per processed song.
pub fn print_progress(progress: &RunProgress<'_>) {
    let position = format!("[{}/{}]", progress.index + 1, progress.total);
    let status = match progress.result {
        MatchResult::Found(video) => {
            let source = if video.from_cache { " (cached)" } else { "" };
            format!("found {}{}", video.watch_url(), source)
        }
        MatchResult::NotFound => "not found".to_string(),
        MatchResult::Skipped { reason } => format!("skipped ({})", reason),
    };
    let add = match progress.add {
        Some(AddOutcome::Added) => "",
        Some(AddOutcome::Failed { .. }) => " - add failed",
        Some(AddOutcome::SkippedQuota) => " - not added (quota)",
        None => "",
    };

    println!("{:<9} {}: {}{}", position, progress.song.title, status, add);
}

pub fn print_summary(report: &RunReport, playlist_url: Option<&str>) {
    println!();
    println!("{}", RULE);
    println!("Found:     {}/{}", report.found_count(), report.songs.len());
    println!("Not found: {}", report.not_found_count());
    if report.skipped_count() > 0 {
        println!(
            "Skipped:   {} (quota {}, cancelled {})",
            report.skipped_count(),
            report.skipped_for(SkipReason::QuotaExhausted),
            report.skipped_for(SkipReason::Cancelled)
        );
    }
    if let Some(url) = playlist_url {
        println!("Added:     {}", report.added_count());
        if report.failed_add_count() > 0 {
            println!("Failed:    {}", report.failed_add_count());
        }
        println!("Playlist:  {}", url);
    }
    println!("Quota used: {} units", report.units_used);

    let missing: Vec<_> = report.not_found().collect();
    if !missing.is_empty() {
        println!();
        println!("Songs not found:");
        for song in missing {
            println!("  - {} ({})", song.title, song.display_artist());
        }
    }

    if report.halted {
        println!();
        println!("Stopped early: daily quota reserve reached. Try again tomorrow.");
    }
    println!("{}", RULE);
}

pub fn print_quota_status(status: &QuotaStatus) {
    println!("Quota used today:     {} / {}", status.units_used, status.daily_limit);
    println!("Estimated remaining:  {}", status.estimated_remaining);
    println!(
        "Cached videos:        {} ({} from the last 24h)",
        status.cache_entry_count, status.recent_cache_entry_count
    );
    println!(
        "Cache file size:      {:.1} KB",
        status.cache_file_size_bytes as f64 / 1024.0
    );
}
