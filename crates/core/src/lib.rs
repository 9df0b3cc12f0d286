pub mod cache;
pub mod config;
pub mod coordinator;
pub mod matcher;
pub mod planner;
pub mod playlist;
pub mod quota;
pub mod searcher;
pub mod setlist;
pub mod testing;
mod persist;
mod youtube;

pub use cache::{CacheEntry, CacheKey, CacheStats, JsonVideoCache, VideoCache};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use coordinator::{
    create_playlist, fetch_setlist, AddOutcome, QuotaStatus, RunCoordinator, RunError,
    RunEstimate, RunProgress, RunReport,
};
pub use matcher::{MatchEngine, MatchResult, SkipReason, VideoMatch};
pub use planner::QueryPlanner;
pub use playlist::{PlaylistPrivacy, PlaylistSink, YouTubePlaylistSink};
pub use quota::{QuotaLedger, QuotaLimits};
pub use searcher::{VideoSearcher, YouTubeSearcher};
pub use setlist::{SetlistFmClient, SetlistInfo, SetlistSource, SongEntry};
pub use youtube::resolve_access_token;
