use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::session::modes::{ModeKind, ModeRunner};

const MISMATCH_REVERT: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Words,
    Translations,
}

/// Two independently shuffled columns of the same word set; one pick from
/// each column per turn. A correct pair locks both cards, a wrong pair
/// reverts after a fixed delay with input ignored meanwhile.
pub struct MatchingRunner {
    pub words_column: Vec<usize>,
    pub translations_column: Vec<usize>,
    pub selected_word: Option<usize>,
    pub selected_translation: Option<usize>,
    matched: HashSet<usize>,
    pending_revert: Option<Instant>,
    word_count: usize,
}

impl MatchingRunner {
    pub fn new(word_count: usize, rng: &mut SmallRng) -> Self {
        let mut words_column: Vec<usize> = (0..word_count).collect();
        let mut translations_column: Vec<usize> = (0..word_count).collect();
        words_column.shuffle(rng);
        translations_column.shuffle(rng);

        Self {
            words_column,
            translations_column,
            selected_word: None,
            selected_translation: None,
            matched: HashSet::new(),
            pending_revert: None,
            word_count,
        }
    }

    /// Select the card at `pos` in a column. Re-selecting within the same
    /// column moves the selection; once both columns have a pick the turn
    /// resolves.
    pub fn select(&mut self, column: Column, pos: usize, now: Instant) {
        if self.pending_revert.is_some() {
            return;
        }
        let list = match column {
            Column::Words => &self.words_column,
            Column::Translations => &self.translations_column,
        };
        let Some(&word_idx) = list.get(pos) else {
            return;
        };
        if self.matched.contains(&word_idx) {
            return;
        }

        match column {
            Column::Words => self.selected_word = Some(pos),
            Column::Translations => self.selected_translation = Some(pos),
        }

        if let (Some(w), Some(t)) = (self.selected_word, self.selected_translation) {
            let word_idx = self.words_column[w];
            let translation_idx = self.translations_column[t];
            if word_idx == translation_idx {
                self.matched.insert(word_idx);
                self.selected_word = None;
                self.selected_translation = None;
            } else {
                self.pending_revert = Some(now + MISMATCH_REVERT);
            }
        }
    }

    pub fn is_matched(&self, word_idx: usize) -> bool {
        self.matched.contains(&word_idx)
    }

    pub fn found(&self) -> usize {
        self.matched.len()
    }

    pub fn is_locked(&self) -> bool {
        self.pending_revert.is_some()
    }
}

impl ModeRunner for MatchingRunner {
    fn kind(&self) -> ModeKind {
        ModeKind::Matching
    }

    fn item_count(&self) -> usize {
        self.word_count
    }

    fn is_complete(&self) -> bool {
        self.matched.len() == self.word_count
    }

    fn correct_count(&self) -> usize {
        self.matched.len()
    }

    fn poll_timers(&mut self, now: Instant) {
        if let Some(at) = self.pending_revert
            && now >= at
        {
            self.selected_word = None;
            self.selected_translation = None;
            self.pending_revert = None;
        }
    }
}
