//! Curated mood → track table.
//!
//! The catalog is built once at startup and never mutated afterwards. Lookups
//! are total: any mood without its own entry resolves to the `neutral` list,
//! which is guaranteed non-empty at construction.

use super::{Mood, UnknownMood};
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Pointer to a playable track on an external platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackReference {
    pub title: String,
    /// Platform-specific identifier (a YouTube video id for the curated table).
    #[serde(rename(serialize = "videoId"), alias = "videoId")]
    pub external_id: String,
}

impl TrackReference {
    pub fn new(title: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            external_id: external_id.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog has no tracks for the neutral mood")]
    MissingNeutral,

    #[error(transparent)]
    UnknownMood(#[from] UnknownMood),
}

#[derive(Debug, Clone)]
pub struct MoodCatalog {
    neutral: Vec<TrackReference>,
    entries: HashMap<Mood, Vec<TrackReference>>,
}

impl MoodCatalog {
    /// Build a catalog from explicit entries.
    ///
    /// Moods mapped to an empty list are dropped so that they resolve to
    /// `neutral`. Fails if `neutral` itself is missing or empty.
    pub fn from_entries(
        mut entries: HashMap<Mood, Vec<TrackReference>>,
    ) -> Result<Self, CatalogError> {
        let neutral = entries
            .remove(&Mood::Neutral)
            .filter(|tracks| !tracks.is_empty())
            .ok_or(CatalogError::MissingNeutral)?;
        entries.retain(|_, tracks| !tracks.is_empty());
        Ok(Self { neutral, entries })
    }

    /// Load a catalog from a TOML file with one array of tables per mood:
    ///
    /// ```toml
    /// [[happy]]
    /// title = "Pharrell Williams - Happy"
    /// external_id = "y6Sxv-sUYtM"
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        let raw: HashMap<String, Vec<TrackReference>> = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (label, tracks) in raw {
            let mood = label.parse::<Mood>().map_err(CatalogError::from)?;
            entries.insert(mood, tracks);
        }

        Self::from_entries(entries).with_context(|| format!("Invalid catalog file: {:?}", path))
    }

    /// The built-in curated table.
    pub fn curated() -> Self {
        let entry = |title: &str, id: &str| TrackReference::new(title, id);
        let mut entries = HashMap::new();
        entries.insert(
            Mood::Happy,
            vec![
                entry("Pharrell Williams - Happy", "y6Sxv-sUYtM"),
                entry("Katrina & The Waves - Walking On Sunshine", "iGxT3rbn_E0"),
                entry(
                    "Bruno Mars - Uptown Funk (Official Video) ft. Mark Ronson",
                    "OPf0RTx1p6Y",
                ),
                entry("Queen - Don't Stop Me Now", "HgzGwrmLg9M"),
            ],
        );
        entries.insert(
            Mood::Sad,
            vec![
                entry("Adele - Someone Like You", "hLQl3WcQWKQ"),
                entry("Billie Eilish - when the party's over", "pbMwTqkKSFI"),
                entry("Coldplay - Fix You", "k4D4vQd2c6c"),
                entry("Mad World - Gary Jules", "4N3N1MlvVc4"),
            ],
        );
        entries.insert(
            Mood::Energetic,
            vec![
                entry("Don't Stop Me Now - Queen", "HgzGwrmLg9M"),
                entry("Eye of the Tiger - Survivor", "QEjgX_O2EwY"),
                entry("Thunderstruck - AC/DC", "v2AC41dglnM"),
                entry("Dua Lipa - Don't Start Now", "U7sdC3k_w5c"),
            ],
        );
        entries.insert(
            Mood::Focused,
            vec![
                entry("Lofi Hip Hop Radio - Beats to Relax/Study", "jfKfPfyJRdk"),
                entry("Deep Focus - Study Music", "Wj1qJ4dMhgs"),
                entry("Weightless - Marconi Union", "UfcAVejslrU"),
                entry("Ambient Study Music - Concentration", "x_eI2-790qQ"),
            ],
        );
        entries.insert(
            Mood::Calm,
            vec![
                entry("Weightless - Marconi Union", "UfcAVejslrU"),
                entry("Enya - Orinoco Flow", "Lg7o8I5B0q8"),
                entry("Relaxing Music for Stress Relief", "S_vJ0q0_1_Y"),
                entry("Peaceful Piano Music", "O9-D7Kj6C2U"),
            ],
        );
        let neutral = vec![
            entry("Background Music for Videos", "N3b-Q_yYg2Y"),
            entry("Chillhop Music", "5qap5aO4i9A"),
            entry("Relaxing Jazz Music", "H_a4O2k-x7A"),
        ];
        Self { neutral, entries }
    }

    /// Tracks for `mood`, or the neutral tracks if the mood has no entry.
    /// Never empty.
    pub fn lookup(&self, mood: Mood) -> &[TrackReference] {
        self.entries
            .get(&mood)
            .map(Vec::as_slice)
            .unwrap_or(&self.neutral)
    }

    /// Same as [`lookup`](Self::lookup) for a raw label; unknown labels get
    /// the neutral tracks.
    pub fn lookup_label(&self, label: &str) -> &[TrackReference] {
        self.lookup(Mood::from_label_or_neutral(label))
    }

    /// Uniformly random track for `mood`. Unseeded on purpose: repeated calls
    /// may return different tracks.
    pub fn pick_one(&self, mood: Mood) -> &TrackReference {
        let tracks = self.lookup(mood);
        &tracks[rand::rng().random_range(0..tracks.len())]
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self::curated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_curated_lookup_is_non_empty_for_every_mood() {
        let catalog = MoodCatalog::curated();
        let neutral = catalog.lookup(Mood::Neutral);
        for mood in Mood::ALL {
            assert!(!catalog.lookup(mood).is_empty(), "{} is empty", mood);
            if mood != Mood::Neutral {
                assert_ne!(catalog.lookup(mood), neutral, "{} borrows neutral", mood);
            }
        }
    }

    #[test]
    fn test_unrecognized_labels_resolve_to_neutral() {
        let catalog = MoodCatalog::curated();
        let neutral = catalog.lookup(Mood::Neutral);
        for label in ["", "ecstatic", "HAPPY!", "null"] {
            assert_eq!(catalog.lookup_label(label), neutral);
        }
        assert_eq!(catalog.lookup_label("Sad"), catalog.lookup(Mood::Sad));
    }

    #[test]
    fn test_pick_one_draws_from_lookup() {
        let catalog = MoodCatalog::curated();
        for mood in Mood::ALL {
            for _ in 0..20 {
                let picked = catalog.pick_one(mood);
                assert!(catalog.lookup(mood).contains(picked));
            }
        }
    }

    #[test]
    fn test_from_entries_requires_neutral() {
        let mut entries = HashMap::new();
        entries.insert(Mood::Happy, vec![TrackReference::new("a", "1")]);
        assert!(matches!(
            MoodCatalog::from_entries(entries.clone()),
            Err(CatalogError::MissingNeutral)
        ));

        entries.insert(Mood::Neutral, vec![]);
        assert!(matches!(
            MoodCatalog::from_entries(entries),
            Err(CatalogError::MissingNeutral)
        ));
    }

    #[test]
    fn test_from_entries_empty_mood_falls_back_to_neutral() {
        let mut entries = HashMap::new();
        entries.insert(Mood::Neutral, vec![TrackReference::new("n", "0")]);
        entries.insert(Mood::Sad, vec![]);
        let catalog = MoodCatalog::from_entries(entries).unwrap();

        assert_eq!(catalog.lookup(Mood::Sad), catalog.lookup(Mood::Neutral));
        assert_eq!(catalog.pick_one(Mood::Calm).external_id, "0");
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[neutral]]
title = "Quiet"
external_id = "q1"

[[focused]]
title = "Deep Work"
external_id = "f1"

[[focused]]
title = "Deeper Work"
videoId = "f2"
"#
        )
        .unwrap();

        let catalog = MoodCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.lookup(Mood::Focused).len(), 2);
        assert_eq!(catalog.lookup(Mood::Focused)[1].external_id, "f2");
        assert_eq!(catalog.lookup(Mood::Happy)[0].title, "Quiet");
    }

    #[test]
    fn test_load_rejects_unknown_mood_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[neutral]]
title = "Quiet"
external_id = "q1"

[[grumpy]]
title = "Nope"
external_id = "x"
"#
        )
        .unwrap();

        let err = MoodCatalog::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("grumpy"));
    }

    #[test]
    fn test_track_reference_wire_format() {
        let json = serde_json::to_value(TrackReference::new("Fix You", "k4D4vQd2c6c")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Fix You", "videoId": "k4D4vQd2c6c"})
        );
    }
}
