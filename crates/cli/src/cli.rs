//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use setlist2tube_core::PlaylistPrivacy;

/// Create a YouTube playlist from a setlist.fm setlist
#[derive(Parser, Debug)]
#[command(name = "setlist2tube")]
#[command(version)]
#[command(about = "Create a YouTube playlist from a setlist.fm setlist")]
pub struct Args {
    /// setlist.fm setlist URL
    #[arg(required_unless_present_any = ["quota_status", "clear_cache", "purge_expired"])]
    pub url: Option<String>,

    /// Playlist privacy (private, unlisted, public); overrides the config file
    #[arg(long, value_parser = parse_privacy)]
    pub privacy: Option<PlaylistPrivacy>,

    /// Search for videos without creating a playlist
    #[arg(long)]
    pub dry_run: bool,

    /// Print the track list before searching
    #[arg(long)]
    pub show_tracks: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Remove every cached search result
    #[arg(long)]
    pub clear_cache: bool,

    /// Remove cached search results older than the freshness window
    #[arg(long)]
    pub purge_expired: bool,

    /// Show quota usage and cache statistics, then exit
    #[arg(long)]
    pub quota_status: bool,

    /// Configuration file
    #[arg(long, env = "SETLIST2TUBE_CONFIG", default_value = "setlist2tube.toml")]
    pub config: PathBuf,
}

fn parse_privacy(value: &str) -> Result<PlaylistPrivacy, String> {
    value.parse().map_err(|e| format!("{}", e))
}
