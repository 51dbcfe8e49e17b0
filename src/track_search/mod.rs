//! Track search against an external streaming catalog.
//!
//! The resolvers only see the [`TrackSearch`] trait; the Spotify client is
//! the production implementation.

mod spotify;

pub use spotify::{SpotifyClient, MAX_SEARCH_LIMIT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A track returned by a live catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchedTrack {
    pub name: String,
    pub artist: String,
    pub url: String,
    /// Preview clips are not guaranteed by the catalog.
    #[serde(rename = "preview")]
    pub preview_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request timeout")]
    Timeout,
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Timeout
        } else if e.is_decode() {
            SearchError::InvalidResponse(e.to_string())
        } else {
            SearchError::Connection(e.to_string())
        }
    }
}

#[async_trait]
pub trait TrackSearch: Send + Sync {
    /// Get the backend's name (e.g., "spotify").
    fn name(&self) -> &str;

    /// Search tracks matching `query`, returning at most `limit` results.
    async fn search_tracks(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchedTrack>, SearchError>;
}
