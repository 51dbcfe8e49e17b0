//! Deterministic keyword classification, used when the LLM is unavailable.
//!
//! Groups are checked in order and the first group with a matching cue wins,
//! so text containing both a happy and a sad cue is classified as happy.

use super::{ClassificationResult, Mood};

const TRIGGER_GROUPS: &[(Mood, &[&str])] = &[
    (Mood::Happy, &["happy", "good day", "feeling good"]),
    (Mood::Sad, &["sad", "rough day", "down"]),
    (Mood::Energetic, &["energetic", "energy"]),
    (Mood::Focused, &["focused", "focus", "study"]),
    (Mood::Calm, &["calm", "relax", "chill"]),
];

/// First mood whose cue appears in `text` (case-insensitive substring match).
pub fn detect_mood(text: &str) -> Mood {
    let lowered = text.to_lowercase();
    TRIGGER_GROUPS
        .iter()
        .find(|(_, cues)| cues.iter().any(|cue| lowered.contains(cue)))
        .map(|(mood, _)| *mood)
        .unwrap_or(Mood::Neutral)
}

pub fn classify(text: &str) -> ClassificationResult {
    let mood = detect_mood(text);
    ClassificationResult {
        mood,
        vibe_description: mood.default_vibe().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_checked_before_sad() {
        assert_eq!(
            detect_mood("I'm feeling happy but also kind of sad"),
            Mood::Happy
        );
        assert_eq!(detect_mood("Had a rough day but a good day overall"), Mood::Happy);
    }

    #[test]
    fn test_no_cues_is_neutral() {
        assert_eq!(detect_mood("The weather report for today"), Mood::Neutral);
        assert_eq!(detect_mood(""), Mood::Neutral);
    }

    #[test]
    fn test_single_group_cues() {
        assert_eq!(detect_mood("I need to study and focus"), Mood::Focused);
        assert_eq!(detect_mood("Feeling DOWN tonight"), Mood::Sad);
        assert_eq!(detect_mood("So much energy right now"), Mood::Energetic);
        assert_eq!(detect_mood("time to chill on the couch"), Mood::Calm);
        assert_eq!(detect_mood("Feeling good!"), Mood::Happy);
    }

    #[test]
    fn test_substring_matching_is_plain() {
        // "download" contains "down"
        assert_eq!(detect_mood("waiting for the download"), Mood::Sad);
        // energetic is checked before focused
        assert_eq!(detect_mood("energetic study session"), Mood::Energetic);
    }

    #[test]
    fn test_classify_reports_default_vibe() {
        let result = classify("let me relax");
        assert_eq!(result.mood, Mood::Calm);
        assert_eq!(result.vibe_description, Mood::Calm.default_vibe());
    }
}
