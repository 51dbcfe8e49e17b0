use super::DegradeReason;
use crate::mood::{
    keywords, ClassificationResult, Mood, MoodCatalog, MoodClassifier, TrackReference,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which classifier produced the mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Llm,
    KeywordFallback,
}

#[derive(Debug, Clone)]
pub struct TextResolution {
    pub mood: Mood,
    pub title: String,
    pub reference: TrackReference,
    pub vibe: String,
    pub source: ClassificationSource,
    /// Set when the LLM path was skipped or failed.
    pub degraded: Option<DegradeReason>,
}

/// Resolves free text to a mood and a curated track.
///
/// The LLM classifier is optional; without it every call uses the keyword
/// fallback. Any classifier failure also falls through to keywords, so
/// `resolve` always produces a result.
pub struct TextMoodResolver {
    catalog: Arc<MoodCatalog>,
    classifier: Option<MoodClassifier>,
}

impl TextMoodResolver {
    pub fn new(catalog: Arc<MoodCatalog>, classifier: Option<MoodClassifier>) -> Self {
        Self {
            catalog,
            classifier,
        }
    }

    pub fn catalog(&self) -> &MoodCatalog {
        &self.catalog
    }

    pub fn has_llm(&self) -> bool {
        self.classifier.is_some()
    }

    pub async fn resolve(&self, text: &str) -> TextResolution {
        let (classification, source, degraded) = self.classify(text).await;

        let reference = self.catalog.pick_one(classification.mood).clone();
        debug!(
            mood = %classification.mood,
            source = ?source,
            title = %reference.title,
            "Resolved text to track"
        );

        TextResolution {
            mood: classification.mood,
            title: reference.title.clone(),
            reference,
            vibe: classification.vibe_description,
            source,
            degraded,
        }
    }

    async fn classify(
        &self,
        text: &str,
    ) -> (ClassificationResult, ClassificationSource, Option<DegradeReason>) {
        let Some(classifier) = &self.classifier else {
            info!("LLM not configured, using keyword fallback");
            return (
                keywords::classify(text),
                ClassificationSource::KeywordFallback,
                Some(DegradeReason::CapabilityUnconfigured),
            );
        };

        match classifier.classify(text).await {
            Ok(result) => (result, ClassificationSource::Llm, None),
            Err(e) => {
                warn!(
                    provider = classifier.provider().name(),
                    error = %e,
                    "LLM classification failed, using keyword fallback"
                );
                (
                    keywords::classify(text),
                    ClassificationSource::KeywordFallback,
                    Some(DegradeReason::from(&e)),
                )
            }
        }
    }
}
