//! Mood taxonomy shared by the text and catalog resolvers.
//!
//! This module provides:
//! - The closed `Mood` enumeration and its label parsing
//! - The curated `MoodCatalog` used as answer source and fallback
//! - Keyword-based classification (no external calls)
//! - LLM-backed classification on top of an `LlmProvider`

mod catalog;
mod classifier;
pub mod keywords;

pub use catalog::{CatalogError, MoodCatalog, TrackReference};
pub use classifier::{ClassificationError, ClassificationResult, MoodClassifier};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Emotional/energy tone used as the key between text input and tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Focused,
    Calm,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown mood label: {0:?}")]
pub struct UnknownMood(pub String);

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Focused,
        Mood::Calm,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Focused => "focused",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
        }
    }

    /// Lenient parse: anything that is not one of the six labels is `Neutral`.
    pub fn from_label_or_neutral(label: &str) -> Mood {
        label.parse().unwrap_or(Mood::Neutral)
    }

    /// Short music-vibe description reported when no LLM description exists.
    pub fn default_vibe(&self) -> &'static str {
        match self {
            Mood::Happy => "upbeat, joyful pop",
            Mood::Sad => "melancholic, reflective acoustic",
            Mood::Energetic => "high-energy anthems",
            Mood::Focused => "instrumental ambient for concentration",
            Mood::Calm => "soft, relaxing soundscapes",
            Mood::Neutral => "easy-going background music",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
