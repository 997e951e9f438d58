pub mod fillblanks;
pub mod flashcards;
pub mod matching;
pub mod memory;
pub mod spelling;
pub mod translation;

use std::time::Instant;

use rand::rngs::SmallRng;

use crate::catalogue::Word;
use crate::session::modes::fillblanks::FillBlanksRunner;
use crate::session::modes::flashcards::FlashcardsRunner;
use crate::session::modes::matching::MatchingRunner;
use crate::session::modes::memory::MemoryRunner;
use crate::session::modes::spelling::SpellingRunner;
use crate::session::modes::translation::TranslationRunner;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Flashcards,
    Memory,
    Translation,
    FillBlanks,
    Matching,
    Spelling,
}

impl ModeKind {
    /// The order modes run in is fixed; toggles only decide membership.
    pub const CANONICAL_ORDER: [ModeKind; 6] = [
        ModeKind::Flashcards,
        ModeKind::Memory,
        ModeKind::Translation,
        ModeKind::FillBlanks,
        ModeKind::Matching,
        ModeKind::Spelling,
    ];

    /// Flashcards have no right/wrong answer and never enter the score
    /// denominator.
    pub fn is_scorable(self) -> bool {
        !matches!(self, ModeKind::Flashcards)
    }

    pub fn title(self) -> &'static str {
        match self {
            ModeKind::Flashcards => "Flashcards",
            ModeKind::Memory => "Memory Game",
            ModeKind::Translation => "Pick the Translation",
            ModeKind::FillBlanks => "Fill in the Blanks",
            ModeKind::Matching => "Match the Pairs",
            ModeKind::Spelling => "Spell the Word",
        }
    }
}

/// Contract every mini-game fulfils towards the session engine. A runner is
/// one cold-started entry into a mode: all per-item bookkeeping lives here
/// and dies with it, so re-entering a mode always restarts from scratch.
pub trait ModeRunner {
    fn kind(&self) -> ModeKind;

    fn item_count(&self) -> usize;

    /// Every item answered (or, for flashcards, stepped past the last card).
    fn is_complete(&self) -> bool;

    /// Correct answers recorded so far in this mode entry.
    fn correct_count(&self) -> usize;

    /// Score credited to the session ledger when the mode is left forward
    /// (completion or explicit close).
    fn advance_credit(&self) -> usize {
        self.correct_count()
    }

    /// Score credited when the mode is left backward. Normally nothing: a
    /// retreat abandons the entry.
    fn retreat_credit(&self) -> usize {
        0
    }

    /// Fire any due delayed reversion/reveal. Deadlines live in runner
    /// state, so dropping the runner cancels them.
    fn poll_timers(&mut self, _now: Instant) {}
}

/// The active mode entry, dispatched by `ModeKind`. An enum rather than a
/// boxed trait object so the presentation layer can match on the concrete
/// game state.
pub enum ActiveMode {
    Flashcards(FlashcardsRunner),
    Memory(MemoryRunner),
    Translation(TranslationRunner),
    FillBlanks(FillBlanksRunner),
    Matching(MatchingRunner),
    Spelling(SpellingRunner),
}

impl ActiveMode {
    /// Cold-start a fresh runner for `kind`. Shuffles draw from the session
    /// RNG so every entry sees freshly reshuffled content.
    pub fn start(kind: ModeKind, words: &[Word], rng: &mut SmallRng) -> Self {
        match kind {
            ModeKind::Flashcards => ActiveMode::Flashcards(FlashcardsRunner::new(words.len())),
            ModeKind::Memory => ActiveMode::Memory(MemoryRunner::new(words.len(), rng)),
            ModeKind::Translation => ActiveMode::Translation(TranslationRunner::new(words, rng)),
            ModeKind::FillBlanks => ActiveMode::FillBlanks(FillBlanksRunner::new(words)),
            ModeKind::Matching => ActiveMode::Matching(MatchingRunner::new(words.len(), rng)),
            ModeKind::Spelling => ActiveMode::Spelling(SpellingRunner::new(words, rng)),
        }
    }

    fn runner(&self) -> &dyn ModeRunner {
        match self {
            ActiveMode::Flashcards(r) => r,
            ActiveMode::Memory(r) => r,
            ActiveMode::Translation(r) => r,
            ActiveMode::FillBlanks(r) => r,
            ActiveMode::Matching(r) => r,
            ActiveMode::Spelling(r) => r,
        }
    }

    fn runner_mut(&mut self) -> &mut dyn ModeRunner {
        match self {
            ActiveMode::Flashcards(r) => r,
            ActiveMode::Memory(r) => r,
            ActiveMode::Translation(r) => r,
            ActiveMode::FillBlanks(r) => r,
            ActiveMode::Matching(r) => r,
            ActiveMode::Spelling(r) => r,
        }
    }
}

impl ModeRunner for ActiveMode {
    fn kind(&self) -> ModeKind {
        self.runner().kind()
    }

    fn item_count(&self) -> usize {
        self.runner().item_count()
    }

    fn is_complete(&self) -> bool {
        self.runner().is_complete()
    }

    fn correct_count(&self) -> usize {
        self.runner().correct_count()
    }

    fn advance_credit(&self) -> usize {
        self.runner().advance_credit()
    }

    fn retreat_credit(&self) -> usize {
        self.runner().retreat_credit()
    }

    fn poll_timers(&mut self, now: Instant) {
        self.runner_mut().poll_timers(now);
    }
}
