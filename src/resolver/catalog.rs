use super::DegradeReason;
use crate::mood::Mood;
use crate::track_search::{SearchedTrack, TrackSearch};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Resolves a mood to live search results from an external catalog.
pub struct CatalogMoodResolver {
    search: Option<Arc<dyn TrackSearch>>,
    limit: usize,
}

impl CatalogMoodResolver {
    pub fn new(search: Option<Arc<dyn TrackSearch>>, limit: usize) -> Self {
        Self { search, limit }
    }

    pub fn is_available(&self) -> bool {
        self.search.is_some()
    }

    /// Search query tuned for a mood. Moods without a tuned query search for
    /// their bare label.
    pub fn query_for(mood: Mood) -> &'static str {
        match mood {
            Mood::Happy => "upbeat joyful pop",
            Mood::Sad => "melancholic reflective acoustic",
            Mood::Energetic => "high energy workout electronic",
            Mood::Focused => "instrumental ambient study",
            Mood::Calm | Mood::Neutral => mood.as_str(),
        }
    }

    /// Search tracks for `mood`. Returns an empty list when the search
    /// backend is missing or fails.
    pub async fn resolve(&self, mood: Mood) -> Vec<SearchedTrack> {
        let Some(search) = &self.search else {
            info!(
                reason = %DegradeReason::CapabilityUnconfigured,
                "Track search not available, returning no songs"
            );
            return Vec::new();
        };

        let query = Self::query_for(mood);
        match search.search_tracks(query, self.limit).await {
            Ok(tracks) => {
                if tracks.is_empty() {
                    debug!(mood = %mood, query, reason = %DegradeReason::NoResults, "Empty search");
                }
                tracks
            }
            Err(e) => {
                warn!(
                    backend = search.name(),
                    mood = %mood,
                    query,
                    reason = %DegradeReason::from(&e),
                    "Track search failed, returning no songs"
                );
                Vec::new()
            }
        }
    }
}
