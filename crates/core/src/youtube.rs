//! Shared plumbing for the YouTube Data API v3 clients.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::YouTubeConfig;

/// Build the HTTP client used by both YouTube backends.
pub(crate) fn http_client(config: &YouTubeConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format!("setlist2tube/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
        .build()
}

/// Resolve the OAuth access token.
///
/// An explicit `access_token` wins; otherwise the token file is read. A
/// missing or unreadable token file yields `None`.
pub fn resolve_access_token(config: &YouTubeConfig) -> Option<String> {
    if let Some(token) = non_blank(config.access_token.as_deref()) {
        return Some(token);
    }
    read_token_file(&config.token_file)
}

fn read_token_file(path: &Path) -> Option<String> {
    if !path.exists() {
        debug!("No YouTube token file at {}", path.display());
        return None;
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read YouTube token file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<TokenFile>(&contents) {
        Ok(file) => non_blank(file.token.as_deref().or(file.access_token.as_deref())),
        Err(e) => {
            warn!("Invalid YouTube token file {}: {}", path.display(), e);
            None
        }
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Token file as written by the Google OAuth helpers.
#[derive(Debug, Deserialize)]
struct TokenFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
}

/// A parsed YouTube API error body.
#[derive(Debug, Default)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    pub reasons: Vec<String>,
}

impl ApiErrorBody {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self {
                message: envelope.error.message.unwrap_or_default(),
                reasons: envelope
                    .error
                    .errors
                    .into_iter()
                    .filter_map(|e| e.reason)
                    .collect(),
            },
            Err(_) => Self {
                message: body.to_string(),
                reasons: Vec::new(),
            },
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        self.reasons
            .iter()
            .any(|r| r == "quotaExceeded" || r == "dailyLimitExceeded")
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_with_token_file(path: &Path) -> YouTubeConfig {
        YouTubeConfig {
            token_file: path.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_token_wins() {
        let config = YouTubeConfig {
            access_token: Some(" ya29.abc ".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_access_token(&config).as_deref(), Some("ya29.abc"));
    }

    #[test]
    fn test_token_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"token": "ya29.file", "refresh_token": "r"}}"#).unwrap();

        let config = config_with_token_file(file.path());
        assert_eq!(resolve_access_token(&config).as_deref(), Some("ya29.file"));
    }

    #[test]
    fn test_token_file_access_token_field() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"access_token": "ya29.alt"}}"#).unwrap();

        let config = config_with_token_file(file.path());
        assert_eq!(resolve_access_token(&config).as_deref(), Some("ya29.alt"));
    }

    #[test]
    fn test_missing_or_corrupt_token_file() {
        let config = config_with_token_file(Path::new("/nonexistent/token.json"));
        assert!(resolve_access_token(&config).is_none());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let config = config_with_token_file(file.path());
        assert!(resolve_access_token(&config).is_none());
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"error": {"code": 403, "message": "Quota exceeded.",
            "errors": [{"reason": "quotaExceeded", "domain": "youtube.quota"}]}}"#;
        let parsed = ApiErrorBody::parse(body);
        assert_eq!(parsed.message, "Quota exceeded.");
        assert!(parsed.is_quota_exceeded());

        let plain = ApiErrorBody::parse("Bad Gateway");
        assert_eq!(plain.message, "Bad Gateway");
        assert!(!plain.is_quota_exceeded());
    }
}
