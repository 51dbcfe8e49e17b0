//! Mood resolution pipelines.
//!
//! - [`TextMoodResolver`]: free text → mood → one curated track
//! - [`CatalogMoodResolver`]: mood → live catalog search results
//!
//! Both are total: every failure is converted into a degraded but valid
//! result and reported as a [`DegradeReason`] in the logs (and, for text
//! resolution, on the result itself).

mod catalog;
mod text;

pub use catalog::{CatalogMoodResolver, DEFAULT_SEARCH_LIMIT};
pub use text::{ClassificationSource, TextMoodResolver, TextResolution};

use crate::mood::{ClassificationError, Mood};
use crate::track_search::{SearchError, SearchedTrack};
use thiserror::Error;

/// Why a resolver fell back to a lower-quality answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegradeReason {
    #[error("capability not configured")]
    CapabilityUnconfigured,

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("no results")]
    NoResults,
}

impl From<&ClassificationError> for DegradeReason {
    fn from(e: &ClassificationError) -> Self {
        match e {
            ClassificationError::Transport(inner) => {
                DegradeReason::TransportFailure(inner.to_string())
            }
            ClassificationError::Malformed(msg) => DegradeReason::MalformedResponse(msg.clone()),
        }
    }
}

impl From<&SearchError> for DegradeReason {
    fn from(e: &SearchError) -> Self {
        match e {
            SearchError::InvalidResponse(msg) => DegradeReason::MalformedResponse(msg.clone()),
            other => DegradeReason::TransportFailure(other.to_string()),
        }
    }
}

/// Boundary entry point: free text to a single recommendation.
pub async fn resolve_text_to_music(resolver: &TextMoodResolver, text: &str) -> TextResolution {
    resolver.resolve(text).await
}

/// Boundary entry point: mood to live search results (possibly empty).
pub async fn resolve_mood_to_catalog(
    resolver: &CatalogMoodResolver,
    mood: Mood,
) -> Vec<SearchedTrack> {
    resolver.resolve(mood).await
}
