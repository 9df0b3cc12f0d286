//! setlist.fm API client.
//!
//! setlist.fm requires:
//! - `x-api-key` header with a registered API key
//! - `Accept: application/json` (XML is the default)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::types::{SetlistInfo, SongEntry};
use super::{parse_setlist_url, SetlistError, SetlistSource};
use crate::config::SetlistFmConfig;

/// setlist.fm API client.
pub struct SetlistFmClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SetlistFmClient {
    /// Create a new client. Fails if no API key is configured.
    pub fn new(config: &SetlistFmConfig) -> Result<Self, SetlistError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                SetlistError::NotConfigured(
                    "setlist.fm API key is required (SETLIST2TUBE_SETLISTFM__API_KEY)".to_string(),
                )
            })?
            .to_string();

        let client = Client::builder()
            .user_agent(format!("setlist2tube/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetch the raw setlist by ID.
    async fn get_setlist(&self, setlist_id: &str) -> Result<FmSetlist, SetlistError> {
        let url = format!(
            "{}/setlist/{}",
            self.base_url,
            urlencoding::encode(setlist_id)
        );

        debug!("setlist.fm get setlist: id={}", setlist_id);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_LANGUAGE, "en")
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => return Err(SetlistError::NotFound(setlist_id.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SetlistError::Unauthorized)
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(SetlistError::RateLimitExceeded),
            _ => {}
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SetlistError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            SetlistError::ParseError(format!("Failed to parse setlist response: {}", e))
        })
    }
}

#[async_trait]
impl SetlistSource for SetlistFmClient {
    fn name(&self) -> &str {
        "setlist.fm"
    }

    async fn fetch(&self, url: &str) -> Result<SetlistInfo, SetlistError> {
        let setlist_id = parse_setlist_url(url)?;
        let raw = self.get_setlist(&setlist_id).await?;
        Ok(raw.into_setlist(url))
    }
}

// ============================================================================
// setlist.fm API Response Types (private)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmSetlist {
    #[serde(default)]
    artist: Option<FmNamed>,
    #[serde(default)]
    venue: Option<FmVenue>,
    #[serde(default)]
    event_date: Option<String>,
    #[serde(default)]
    sets: Option<FmSets>,
}

#[derive(Debug, Deserialize)]
struct FmNamed {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FmVenue {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    city: Option<FmCity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmCity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state_province: Option<String>,
    #[serde(default)]
    country: Option<FmNamed>,
}

#[derive(Debug, Deserialize)]
struct FmSets {
    #[serde(default)]
    set: Vec<FmSet>,
}

#[derive(Debug, Deserialize)]
struct FmSet {
    #[serde(default)]
    song: Vec<FmSong>,
}

#[derive(Debug, Deserialize)]
struct FmSong {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tape: bool,
    #[serde(default)]
    cover: Option<FmNamed>,
}

impl FmSetlist {
    fn into_setlist(self, url: &str) -> SetlistInfo {
        let artist = self
            .artist
            .and_then(|a| a.name)
            .unwrap_or_else(|| "Unknown Artist".to_string());

        let (venue, city) = match self.venue {
            Some(venue) => (venue.name, venue.city),
            None => (None, None),
        };
        let city = match city {
            Some(city) => {
                let region = city
                    .state_province
                    .or_else(|| city.country.and_then(|c| c.name))
                    .unwrap_or_default();
                format!(
                    "{}, {}",
                    city.name.unwrap_or_else(|| "Unknown City".to_string()),
                    region
                )
            }
            None => "Unknown City".to_string(),
        };

        let songs = self
            .sets
            .map(|s| s.set)
            .unwrap_or_default()
            .into_iter()
            .flat_map(|set| set.song)
            .filter(|song| !song.tape)
            .filter_map(|song| {
                let title = song.name.filter(|n| !n.trim().is_empty())?;
                Some(match song.cover {
                    Some(cover) => SongEntry {
                        title,
                        performing_artist: artist.clone(),
                        is_cover: true,
                        original_artist: cover.name,
                    },
                    None => SongEntry::new(title, artist.clone()),
                })
            })
            .collect();

        SetlistInfo {
            artist,
            venue: venue.unwrap_or_else(|| "Unknown Venue".to_string()),
            city,
            date: self.event_date.unwrap_or_else(|| "Unknown Date".to_string()),
            url: url.to_string(),
            songs,
        }
    }
}
