use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::store::schema::CatalogueData;

const WORDS_EN: &str = include_str!("../assets/words-en.json");

/// One catalogue entry. Immutable for the lifetime of a training session:
/// sessions copy the words they need, so catalogue edits mid-session cannot
/// corrupt in-flight state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub translation: String,
    #[serde(default)]
    pub phonetics: String,
    #[serde(rename = "type", default)]
    pub word_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

pub struct Catalogue {
    words: Vec<Word>,
}

impl Catalogue {
    /// Load the bundled catalogue, then overlay the learner's persisted
    /// edits: favorite flags and deletions survive restarts, the base word
    /// data always comes fresh from the asset.
    pub fn load(overrides: &CatalogueData) -> Self {
        let mut words: Vec<Word> = serde_json::from_str(WORDS_EN).unwrap_or_default();

        let deleted: HashSet<&str> = overrides.deleted.iter().map(String::as_str).collect();
        let favorites: HashSet<&str> = overrides.favorites.iter().map(String::as_str).collect();

        words.retain(|w| !deleted.contains(w.text.as_str()));
        for word in &mut words {
            word.favorite = favorites.contains(word.text.as_str());
        }

        Self { words }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn get(&self, text: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.text == text)
    }

    pub fn toggle_favorite(&mut self, text: &str) {
        if let Some(word) = self.words.iter_mut().find(|w| w.text == text) {
            word.favorite = !word.favorite;
        }
    }

    /// Remove a word from the catalogue. The deletion is recorded in the
    /// overrides snapshot so it persists across restarts.
    pub fn delete(&mut self, text: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w.text != text);
        self.words.len() != before
    }

    /// Snapshot of learner edits for persistence. Deletions are computed
    /// against the bundled asset so re-added asset words stay deletable.
    pub fn overrides(&self) -> CatalogueData {
        let bundled: Vec<Word> = serde_json::from_str(WORDS_EN).unwrap_or_default();
        let present: HashSet<&str> = self.words.iter().map(|w| w.text.as_str()).collect();

        CatalogueData {
            favorites: self
                .words
                .iter()
                .filter(|w| w.favorite)
                .map(|w| w.text.clone())
                .collect(),
            deleted: bundled
                .iter()
                .filter(|w| !present.contains(w.text.as_str()))
                .map(|w| w.text.clone())
                .collect(),
            ..CatalogueData::default()
        }
    }
}
