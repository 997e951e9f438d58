use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::session::modes::{ModeKind, ModeRunner};

const MISMATCH_REVERT: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Word,
    Translation,
}

#[derive(Clone, Copy, Debug)]
pub struct MemoryCard {
    pub word_idx: usize,
    pub face: CardFace,
    pub flipped: bool,
    pub matched: bool,
}

/// Concentration-style board: one word card and one translation card per
/// selected word, shuffled face-down. A pair is found when two flipped
/// cards share a word index; mismatches auto-revert after a fixed delay,
/// during which input is ignored.
pub struct MemoryRunner {
    pub cards: Vec<MemoryCard>,
    flipped: Vec<usize>,
    pending_revert: Option<(usize, usize, Instant)>,
    found: usize,
    pub moves: usize,
    word_count: usize,
}

impl MemoryRunner {
    pub fn new(word_count: usize, rng: &mut SmallRng) -> Self {
        let mut cards = Vec::with_capacity(word_count * 2);
        for word_idx in 0..word_count {
            for face in [CardFace::Word, CardFace::Translation] {
                cards.push(MemoryCard {
                    word_idx,
                    face,
                    flipped: false,
                    matched: false,
                });
            }
        }
        cards.shuffle(rng);

        Self {
            cards,
            flipped: Vec::new(),
            pending_revert: None,
            found: 0,
            moves: 0,
            word_count,
        }
    }

    /// Flip a card face-up, or a flipped card back down. Ignored while a
    /// mismatch revert is pending and for matched cards.
    pub fn flip(&mut self, card_idx: usize, now: Instant) {
        if self.pending_revert.is_some() || card_idx >= self.cards.len() {
            return;
        }
        if self.cards[card_idx].matched {
            return;
        }

        if self.cards[card_idx].flipped {
            self.cards[card_idx].flipped = false;
            self.flipped.retain(|&i| i != card_idx);
            return;
        }

        if self.flipped.len() >= 2 {
            return;
        }

        self.cards[card_idx].flipped = true;
        self.flipped.push(card_idx);

        if self.flipped.len() == 2 {
            self.moves += 1;
            let (a, b) = (self.flipped[0], self.flipped[1]);
            if self.cards[a].word_idx == self.cards[b].word_idx {
                self.cards[a].matched = true;
                self.cards[b].matched = true;
                self.found += 1;
                self.flipped.clear();
            } else {
                self.pending_revert = Some((a, b, now + MISMATCH_REVERT));
            }
        }
    }

    pub fn found(&self) -> usize {
        self.found
    }

    /// True while a mismatch is waiting to flip back.
    pub fn is_locked(&self) -> bool {
        self.pending_revert.is_some()
    }
}

impl ModeRunner for MemoryRunner {
    fn kind(&self) -> ModeKind {
        ModeKind::Memory
    }

    fn item_count(&self) -> usize {
        self.word_count
    }

    fn is_complete(&self) -> bool {
        self.found == self.word_count
    }

    fn correct_count(&self) -> usize {
        self.found
    }

    /// Memory is all-or-nothing: leaving before every pair is found
    /// forfeits the mode's contribution.
    fn advance_credit(&self) -> usize {
        if self.is_complete() { self.found } else { 0 }
    }

    /// Completion credit is earned the moment the last pair is found, so a
    /// retreat after finishing keeps it.
    fn retreat_credit(&self) -> usize {
        self.advance_credit()
    }

    fn poll_timers(&mut self, now: Instant) {
        if let Some((a, b, at)) = self.pending_revert
            && now >= at
        {
            self.cards[a].flipped = false;
            self.cards[b].flipped = false;
            self.flipped.clear();
            self.pending_revert = None;
        }
    }
}
