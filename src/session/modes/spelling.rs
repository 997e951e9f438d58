use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalogue::Word;
use crate::session::modes::{ModeKind, ModeRunner};

const REVEAL_DELAY: Duration = Duration::from_millis(1500);

pub struct SpellingItem {
    pub pool: Vec<char>,
    pub used: Vec<bool>,
    pub slots: Vec<usize>,
    pub answer: String,
    pub translation: String,
    pub answered: Option<bool>,
    pub revealed: bool,
}

impl SpellingItem {
    pub fn is_answered(&self) -> bool {
        self.answered.is_some()
    }

    pub fn assembled(&self) -> String {
        self.slots.iter().map(|&i| self.pool[i]).collect()
    }
}

/// The word's letters, shuffled into a pool; the learner toggles letters
/// into answer slots and checks once the slot count matches the word
/// length. A wrong check reveals the correct spelling after a short delay.
pub struct SpellingRunner {
    items: Vec<SpellingItem>,
    pub current: usize,
    pending_reveal: Option<(usize, Instant)>,
}

impl SpellingRunner {
    pub fn new(words: &[Word], rng: &mut SmallRng) -> Self {
        let items = words
            .iter()
            .map(|word| {
                let mut pool: Vec<char> = word.text.chars().collect();
                pool.shuffle(rng);
                let used = vec![false; pool.len()];
                SpellingItem {
                    pool,
                    used,
                    slots: Vec::new(),
                    answer: word.text.clone(),
                    translation: word.translation.clone(),
                    answered: None,
                    revealed: false,
                }
            })
            .collect();

        Self {
            items,
            current: 0,
            pending_reveal: None,
        }
    }

    pub fn current_item(&self) -> &SpellingItem {
        &self.items[self.current]
    }

    pub fn items(&self) -> &[SpellingItem] {
        &self.items
    }

    /// Toggle a pool letter in or out of the answer slots.
    pub fn toggle(&mut self, pool_idx: usize) {
        let item = &mut self.items[self.current];
        if item.answered.is_some() || pool_idx >= item.pool.len() {
            return;
        }
        if item.used[pool_idx] {
            item.used[pool_idx] = false;
            item.slots.retain(|&i| i != pool_idx);
        } else {
            item.used[pool_idx] = true;
            item.slots.push(pool_idx);
        }
    }

    /// Return all slotted letters to the pool.
    pub fn reset_slots(&mut self) {
        let item = &mut self.items[self.current];
        if item.answered.is_some() {
            return;
        }
        item.slots.clear();
        item.used.fill(false);
    }

    /// Check is only available once every letter has been placed.
    pub fn can_check(&self) -> bool {
        let item = self.current_item();
        item.answered.is_none() && item.slots.len() == item.pool.len()
    }

    /// Case-insensitive exact match of the assembled letters. Wrong answers
    /// schedule a reveal of the correct spelling.
    pub fn check(&mut self, now: Instant) -> Option<bool> {
        if !self.can_check() {
            return None;
        }
        let idx = self.current;
        let item = &mut self.items[idx];
        let correct = item.assembled().to_lowercase() == item.answer.to_lowercase();
        item.answered = Some(correct);
        if !correct {
            self.pending_reveal = Some((idx, now + REVEAL_DELAY));
        }
        Some(correct)
    }

    /// Move forward regardless of answer state. Returns false on the last
    /// item (the caller exits the mode).
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.items.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn at_exit(&self) -> bool {
        self.current + 1 == self.items.len()
    }
}

impl ModeRunner for SpellingRunner {
    fn kind(&self) -> ModeKind {
        ModeKind::Spelling
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn is_complete(&self) -> bool {
        self.items.iter().all(SpellingItem::is_answered)
    }

    fn correct_count(&self) -> usize {
        self.items.iter().filter(|i| i.answered == Some(true)).count()
    }

    fn poll_timers(&mut self, now: Instant) {
        if let Some((idx, at)) = self.pending_reveal
            && now >= at
        {
            self.items[idx].revealed = true;
            self.pending_reveal = None;
        }
    }
}
