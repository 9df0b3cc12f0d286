use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::playlist::PlaylistPrivacy;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub setlistfm: SetlistFmConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub playlist: PlaylistConfig,
}

/// setlist.fm API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetlistFmConfig {
    /// setlist.fm API key (required to fetch setlists)
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL (default: https://api.setlist.fm/rest/1.0)
    #[serde(default = "default_setlistfm_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for SetlistFmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_setlistfm_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_setlistfm_base_url() -> String {
    "https://api.setlist.fm/rest/1.0".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// YouTube Data API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YouTubeConfig {
    /// API key, enough for searching.
    #[serde(default)]
    pub api_key: Option<String>,
    /// OAuth access token, required for playlist writes.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Authorized-user token file; its `token` field is used when
    /// `access_token` is not set.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    /// Region hint for search ranking (e.g., "US").
    #[serde(default = "default_region_code")]
    pub region_code: Option<String>,
    /// API base URL (default: https://www.googleapis.com/youtube/v3)
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// maxResults hint passed to search (default: 5)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            token_file: default_token_file(),
            region_code: default_region_code(),
            base_url: default_youtube_base_url(),
            timeout_secs: default_timeout(),
            max_results: default_max_results(),
        }
    }
}

fn default_token_file() -> PathBuf {
    PathBuf::from("youtube_token.json")
}

fn default_region_code() -> Option<String> {
    Some("US".to_string())
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_max_results() -> u32 {
    5
}

/// Video cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Entries older than this many days are treated as stale.
    #[serde(default = "default_freshness_days")]
    pub freshness_days: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            freshness_days: default_freshness_days(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("video_cache.json")
}

fn default_freshness_days() -> u32 {
    7
}

/// Quota budget configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuotaConfig {
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u64,
    #[serde(default = "default_safety_buffer")]
    pub safety_buffer: u64,
    #[serde(default = "default_search_cost")]
    pub search_cost: u64,
    #[serde(default = "default_playlist_add_cost")]
    pub playlist_add_cost: u64,
    /// Daily usage journal. `None` or a blank path keeps the ledger
    /// process-local.
    #[serde(default = "default_usage_path")]
    pub usage_path: Option<PathBuf>,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            daily_limit: default_daily_limit(),
            safety_buffer: default_safety_buffer(),
            search_cost: default_search_cost(),
            playlist_add_cost: default_playlist_add_cost(),
            usage_path: default_usage_path(),
        }
    }
}

impl QuotaConfig {
    /// Journal location, if the daily journal is enabled.
    pub fn journal_path(&self) -> Option<&Path> {
        self.usage_path
            .as_deref()
            .filter(|p| !p.as_os_str().to_string_lossy().trim().is_empty())
    }
}

fn default_daily_limit() -> u64 {
    10_000
}

fn default_safety_buffer() -> u64 {
    500
}

fn default_search_cost() -> u64 {
    100
}

fn default_playlist_add_cost() -> u64 {
    50
}

fn default_usage_path() -> Option<PathBuf> {
    Some(PathBuf::from("quota_usage.json"))
}

/// Playlist defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaylistConfig {
    #[serde(default)]
    pub privacy: PlaylistPrivacy,
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub setlistfm: SanitizedSetlistFmConfig,
    pub youtube: SanitizedYouTubeConfig,
    pub cache: CacheConfig,
    pub quota: QuotaConfig,
    pub playlist: PlaylistConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSetlistFmConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized YouTube config (credentials hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedYouTubeConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub access_token_configured: bool,
    pub token_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
    pub timeout_secs: u32,
    pub max_results: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            setlistfm: SanitizedSetlistFmConfig {
                base_url: config.setlistfm.base_url.clone(),
                api_key_configured: is_set(&config.setlistfm.api_key),
                timeout_secs: config.setlistfm.timeout_secs,
            },
            youtube: SanitizedYouTubeConfig {
                base_url: config.youtube.base_url.clone(),
                api_key_configured: is_set(&config.youtube.api_key),
                access_token_configured: is_set(&config.youtube.access_token),
                token_file: config.youtube.token_file.clone(),
                region_code: config.youtube.region_code.clone(),
                timeout_secs: config.youtube.timeout_secs,
                max_results: config.youtube.max_results,
            },
            cache: config.cache.clone(),
            quota: config.quota.clone(),
            playlist: config.playlist.clone(),
        }
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.quota.daily_limit, 10_000);
        assert_eq!(config.quota.safety_buffer, 500);
        assert_eq!(config.quota.search_cost, 100);
        assert_eq!(config.quota.playlist_add_cost, 50);
        assert_eq!(config.cache.freshness_days, 7);
        assert_eq!(config.cache.path.to_str().unwrap(), "video_cache.json");
        assert_eq!(config.youtube.region_code.as_deref(), Some("US"));
        assert_eq!(config.youtube.max_results, 5);
        assert_eq!(config.playlist.privacy, PlaylistPrivacy::Private);
        assert!(config.setlistfm.api_key.is_none());
    }

    #[test]
    fn test_deserialize_quota_overrides() {
        let toml = r#"
[quota]
daily_limit = 2000
safety_buffer = 100
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.quota.daily_limit, 2000);
        assert_eq!(config.quota.safety_buffer, 100);
        assert_eq!(config.quota.search_cost, 100); // default
    }

    #[test]
    fn test_journal_path_blank_disables() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.quota.journal_path(), Some(Path::new("quota_usage.json")));

        let config: Config = toml::from_str("[quota]\nusage_path = \"\"").unwrap();
        assert!(config.quota.usage_path.is_some());
        assert!(config.quota.journal_path().is_none());
    }

    #[test]
    fn test_deserialize_playlist_privacy() {
        let toml = r#"
[playlist]
privacy = "unlisted"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.playlist.privacy, PlaylistPrivacy::Unlisted);
    }

    #[test]
    fn test_sanitized_config_hides_credentials() {
        let mut config = Config::default();
        config.setlistfm.api_key = Some("setlist-secret".to_string());
        config.youtube.access_token = Some("ya29.secret".to_string());
        config.youtube.api_key = Some("   ".to_string());

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.setlistfm.api_key_configured);
        assert!(sanitized.youtube.access_token_configured);
        assert!(!sanitized.youtube.api_key_configured); // blank doesn't count

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("setlist-secret"));
        assert!(!json.contains("ya29.secret"));
    }
}
