//! Moodtunes Server Library
//!
//! Maps free-form text or a mood label to music recommendations. This library
//! exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod llm;
pub mod mood;
pub mod resolver;
pub mod server;
pub mod track_search;

// Re-export commonly used types for convenience
pub use mood::{ClassificationResult, Mood, MoodCatalog, TrackReference};
pub use resolver::{
    resolve_mood_to_catalog, resolve_text_to_music, CatalogMoodResolver, TextMoodResolver,
    TextResolution,
};
pub use server::{run_server, RequestsLoggingLevel};
pub use track_search::{SearchedTrack, TrackSearch};
