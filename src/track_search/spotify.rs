//! Spotify Web API client for track search.
//!
//! Authenticates with the client-credentials flow. The access token is cached
//! and refreshed shortly before it expires.

use super::{SearchError, SearchedTrack, TrackSearch};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Spotify caps `limit` for search at 50.
pub const MAX_SEARCH_LIMIT: usize = 50;

struct AccessToken {
    value: String,
    expires_at: Instant,
}

pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
    api_base: String,
    token: Mutex<Option<AccessToken>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TracksPage>,
}

#[derive(Deserialize)]
struct TracksPage {
    #[serde(default)]
    items: Vec<SpotifyTrack>,
}

#[derive(Deserialize)]
struct SpotifyTrack {
    name: String,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
    #[serde(default)]
    external_urls: ExternalUrls,
    preview_url: Option<String>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Deserialize, Default)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl From<SpotifyTrack> for SearchedTrack {
    fn from(track: SpotifyTrack) -> Self {
        SearchedTrack {
            name: track.name,
            artist: track
                .artists
                .into_iter()
                .next()
                .map(|a| a.name)
                .unwrap_or_default(),
            url: track.external_urls.spotify.unwrap_or_default(),
            preview_url: track.preview_url,
        }
    }
}

impl SpotifyClient {
    pub fn new(client_id: &str, client_secret: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            api_base: SPOTIFY_API_BASE.to_string(),
            token: Mutex::new(None),
        })
    }

    /// Point the client at different endpoints (e.g. a local fake server).
    pub fn with_endpoints(mut self, token_url: &str, api_base: &str) -> Self {
        self.token_url = token_url.to_string();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    async fn access_token(&self) -> Result<String, SearchError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        debug!("Requesting Spotify access token");
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Auth(format!(
                "token request failed with status {}: {}",
                status, body
            )));
        }

        let body: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(AccessToken {
            value: body.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(body.access_token)
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }
}

#[async_trait]
impl TrackSearch for SpotifyClient {
    fn name(&self) -> &str {
        "spotify"
    }

    async fn search_tracks(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchedTrack>, SearchError> {
        let token = self.access_token().await?;
        let limit = limit.clamp(1, MAX_SEARCH_LIMIT).to_string();
        let url = format!("{}/search", self.api_base);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                warn!("Spotify rejected the access token, dropping it");
                self.invalidate_token().await;
                return Err(SearchError::Auth("access token rejected".to_string()));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(SearchError::RateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(SearchError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }
            _ => {}
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            SearchError::InvalidResponse(format!("Failed to parse Spotify response: {}", e))
        })?;

        let tracks = body
            .tracks
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .map(SearchedTrack::from)
            .collect();

        Ok(tracks)
    }
}
