use std::time::Instant;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalogue::Word;
use crate::session::modes::{ActiveMode, ModeKind, ModeRunner};
use crate::session::result::SessionResult;

/// The six mode toggles. Membership only: the running order is always the
/// canonical one, regardless of the order toggles were set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    #[serde(default = "default_on")]
    pub flashcards: bool,
    #[serde(default = "default_on")]
    pub memory: bool,
    #[serde(default = "default_on")]
    pub translation: bool,
    #[serde(default = "default_on")]
    pub fillblanks: bool,
    #[serde(default = "default_on")]
    pub matching: bool,
    #[serde(default = "default_on")]
    pub spelling: bool,
}

fn default_on() -> bool {
    true
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            flashcards: true,
            memory: true,
            translation: true,
            fillblanks: true,
            matching: true,
            spelling: true,
        }
    }
}

impl ModeConfig {
    pub fn enabled(&self, kind: ModeKind) -> bool {
        match kind {
            ModeKind::Flashcards => self.flashcards,
            ModeKind::Memory => self.memory,
            ModeKind::Translation => self.translation,
            ModeKind::FillBlanks => self.fillblanks,
            ModeKind::Matching => self.matching,
            ModeKind::Spelling => self.spelling,
        }
    }

    pub fn toggle(&mut self, kind: ModeKind) {
        let flag = match kind {
            ModeKind::Flashcards => &mut self.flashcards,
            ModeKind::Memory => &mut self.memory,
            ModeKind::Translation => &mut self.translation,
            ModeKind::FillBlanks => &mut self.fillblanks,
            ModeKind::Matching => &mut self.matching,
            ModeKind::Spelling => &mut self.spelling,
        };
        *flag = !*flag;
    }

    pub fn enabled_count(&self) -> usize {
        ModeKind::CANONICAL_ORDER
            .iter()
            .filter(|&&kind| self.enabled(kind))
            .count()
    }

    /// The session's mode sequence. Never empty: with every toggle off the
    /// session falls back to flashcards alone.
    pub fn sequence(&self) -> Vec<ModeKind> {
        let mut sequence: Vec<ModeKind> = ModeKind::CANONICAL_ORDER
            .into_iter()
            .filter(|&kind| self.enabled(kind))
            .collect();
        if sequence.is_empty() {
            sequence.push(ModeKind::Flashcards);
        }
        sequence
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no words selected for training")]
    EmptySelection,
}

/// One training run: a fixed word snapshot sequenced through the enabled
/// modes. Ephemeral; lives only while the training screen is open.
///
/// The score ledger is append-only across navigation: leaving a mode
/// forward credits it, retreating back in restarts it cold without
/// subtracting what was already credited. The final summary clamps the
/// ledger to one credit per item.
pub struct TrainingSession {
    words: Vec<Word>,
    sequence: Vec<ModeKind>,
    mode_index: usize,
    total_correct: usize,
    active: Option<ActiveMode>,
    result: Option<SessionResult>,
    rng: SmallRng,
}

impl TrainingSession {
    /// Starting with nothing selected is a caller error; the UI is
    /// expected to have blocked it already.
    pub fn start(
        words: Vec<Word>,
        config: &ModeConfig,
        rng: SmallRng,
    ) -> Result<Self, SessionError> {
        if words.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let mut session = Self {
            words,
            sequence: config.sequence(),
            mode_index: 0,
            total_correct: 0,
            active: None,
            result: None,
            rng,
        };
        session.enter_mode();
        Ok(session)
    }

    fn enter_mode(&mut self) {
        let kind = self.sequence[self.mode_index];
        self.active = Some(ActiveMode::start(kind, &self.words, &mut self.rng));
    }

    /// Leave the active mode forward — on completion or explicit close.
    /// Credits the mode and either cold-starts the next one or, past the
    /// end of the sequence, computes the final result exactly once.
    pub fn advance(&mut self) {
        if self.result.is_some() {
            return;
        }
        if let Some(runner) = self.active.take() {
            self.total_correct += runner.advance_credit();
        }
        self.mode_index += 1;
        if self.mode_index >= self.sequence.len() {
            self.result = Some(SessionResult::from_ledger(
                self.total_correct,
                &self.sequence,
                self.words.len(),
            ));
        } else {
            self.enter_mode();
        }
    }

    /// Step back to the previous mode, restarting it from scratch. A no-op
    /// on the first mode and after completion.
    pub fn retreat(&mut self) {
        if self.result.is_some() || self.mode_index == 0 {
            return;
        }
        if let Some(runner) = self.active.take() {
            self.total_correct += runner.retreat_credit();
        }
        self.mode_index -= 1;
        self.enter_mode();
    }

    pub fn poll_timers(&mut self, now: Instant) {
        if let Some(runner) = self.active.as_mut() {
            runner.poll_timers(now);
        }
    }

    pub fn active(&self) -> Option<&ActiveMode> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveMode> {
        self.active.as_mut()
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, idx: usize) -> &Word {
        &self.words[idx]
    }

    pub fn sequence(&self) -> &[ModeKind] {
        &self.sequence
    }

    /// 0-based position of the active mode and the sequence length.
    pub fn mode_position(&self) -> (usize, usize) {
        (self.mode_index, self.sequence.len())
    }

    pub fn can_retreat(&self) -> bool {
        self.mode_index > 0 && self.result.is_none()
    }

    /// Raw append-only ledger, before the final clamp.
    pub fn total_correct(&self) -> usize {
        self.total_correct
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use rand::SeedableRng;

    use super::*;
    use crate::session::modes::spelling::SpellingRunner;

    fn word(text: &str, translation: &str) -> Word {
        Word {
            text: text.to_string(),
            translation: translation.to_string(),
            phonetics: String::new(),
            word_type: String::new(),
            category: String::new(),
            level: String::new(),
            example: String::new(),
            image: None,
            favorite: false,
        }
    }

    fn words(n: usize) -> Vec<Word> {
        (0..n)
            .map(|i| word(&format!("word{i}"), &format!("слово{i}")))
            .collect()
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn config_with(kinds: &[ModeKind]) -> ModeConfig {
        let mut config = ModeConfig {
            flashcards: false,
            memory: false,
            translation: false,
            fillblanks: false,
            matching: false,
            spelling: false,
        };
        for &kind in kinds {
            config.toggle(kind);
        }
        config
    }

    /// Slot pool letters so the answer area spells `target`.
    fn spell(runner: &mut SpellingRunner, target: &str) {
        for ch in target.chars() {
            let item = runner.current_item();
            let pool_idx = item
                .pool
                .iter()
                .enumerate()
                .find(|(i, c)| **c == ch && !item.used[*i])
                .map(|(i, _)| i)
                .unwrap();
            runner.toggle(pool_idx);
        }
    }

    /// The answer with its first two letters swapped — a full-length but
    /// wrong assembly for the `wordN` test words.
    fn misspelled(answer: &str) -> String {
        let mut chars: Vec<char> = answer.chars().collect();
        chars.swap(0, 1);
        chars.into_iter().collect()
    }

    /// Work through the active spelling mode, answering the first
    /// `correct_items` items right and the rest wrong, then leave forward.
    fn play_spelling(session: &mut TrainingSession, correct_items: usize) {
        let now = Instant::now();
        for item_idx in 0..session.words().len() {
            let answer = session.word(item_idx).text.clone();
            let Some(ActiveMode::Spelling(runner)) = session.active_mut() else {
                panic!("spelling mode expected");
            };
            if item_idx < correct_items {
                spell(runner, &answer);
            } else {
                spell(runner, &misspelled(&answer));
            }
            assert!(runner.check(now).is_some());
            runner.next();
        }
        session.advance();
    }

    /// Flip every pair on the active memory board.
    fn complete_memory(session: &mut TrainingSession) {
        let now = Instant::now();
        let Some(ActiveMode::Memory(runner)) = session.active_mut() else {
            panic!("memory mode expected");
        };
        for word_idx in 0..runner.item_count() {
            let positions: Vec<usize> = runner
                .cards
                .iter()
                .enumerate()
                .filter(|(_, c)| c.word_idx == word_idx)
                .map(|(i, _)| i)
                .collect();
            runner.flip(positions[0], now);
            runner.flip(positions[1], now);
        }
        assert!(runner.is_complete());
    }

    #[test]
    fn all_toggles_off_falls_back_to_flashcards() {
        let config = config_with(&[]);
        assert_eq!(config.sequence(), vec![ModeKind::Flashcards]);
    }

    #[test]
    fn sequence_follows_canonical_order_regardless_of_toggles() {
        let config = config_with(&[ModeKind::Spelling, ModeKind::Memory, ModeKind::FillBlanks]);
        assert_eq!(
            config.sequence(),
            vec![ModeKind::Memory, ModeKind::FillBlanks, ModeKind::Spelling]
        );
    }

    #[test]
    fn every_toggle_combination_yields_nonempty_canonical_sequence() {
        for bits in 0u32..64 {
            let config = ModeConfig {
                flashcards: bits & 1 != 0,
                memory: bits & 2 != 0,
                translation: bits & 4 != 0,
                fillblanks: bits & 8 != 0,
                matching: bits & 16 != 0,
                spelling: bits & 32 != 0,
            };
            let sequence = config.sequence();
            assert!(!sequence.is_empty());
            let positions: Vec<usize> = sequence
                .iter()
                .map(|k| {
                    ModeKind::CANONICAL_ORDER
                        .iter()
                        .position(|c| c == k)
                        .unwrap()
                })
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn empty_selection_refuses_to_start() {
        let err = TrainingSession::start(Vec::new(), &ModeConfig::default(), rng());
        assert_eq!(err.err(), Some(SessionError::EmptySelection));
    }

    #[test]
    fn advancing_past_the_last_mode_completes_once() {
        let config = config_with(&[ModeKind::Flashcards]);
        let mut session = TrainingSession::start(words(2), &config, rng()).unwrap();
        assert_eq!(session.mode_position(), (0, 1));
        assert!(!session.can_retreat());

        session.advance();
        assert!(session.is_completed());
        assert!(session.active().is_none());

        let result = *session.result().unwrap();
        // Advancing or retreating after completion must not move anything.
        session.advance();
        session.retreat();
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn retreat_on_first_mode_is_noop() {
        let mut session = TrainingSession::start(words(2), &ModeConfig::default(), rng()).unwrap();
        session.retreat();
        assert_eq!(session.mode_position(), (0, 6));
        assert!(session.active().is_some());
    }

    #[test]
    fn retreat_cold_starts_the_previous_mode() {
        let config = config_with(&[ModeKind::Flashcards, ModeKind::Translation]);
        let mut session = TrainingSession::start(words(2), &config, rng()).unwrap();

        if let Some(ActiveMode::Flashcards(runner)) = session.active_mut() {
            runner.next();
            runner.next();
            assert!(runner.is_complete());
        }
        session.advance();
        assert_eq!(session.mode_position(), (1, 2));

        session.retreat();
        assert_eq!(session.mode_position(), (0, 2));
        match session.active() {
            Some(ActiveMode::Flashcards(runner)) => {
                assert_eq!(runner.current, 0);
                assert!(!runner.is_complete());
            }
            _ => panic!("flashcards expected after retreat"),
        }
    }

    #[test]
    fn retreat_forfeits_unharvested_answers() {
        let config = config_with(&[ModeKind::Flashcards, ModeKind::Spelling]);
        let mut session = TrainingSession::start(words(3), &config, rng()).unwrap();
        session.advance();

        // Answer 2 of 3 in spelling, then go back instead of forward.
        let now = Instant::now();
        for item_idx in 0..2 {
            let answer = session.word(item_idx).text.clone();
            let Some(ActiveMode::Spelling(runner)) = session.active_mut() else {
                panic!("spelling mode expected");
            };
            spell(runner, &answer);
            runner.check(now);
            runner.next();
        }
        session.retreat();
        assert_eq!(session.total_correct(), 0);

        // Second entry is a clean slate; a perfect run scores 100%.
        session.advance();
        play_spelling(&mut session, 3);
        let result = session.result().unwrap();
        assert_eq!(result.actual_correct, 3);
        assert_eq!(result.success_percentage, 100);
        assert!(result.passed);
    }

    #[test]
    fn memory_completion_credit_survives_retreat_and_ledger_clamps() {
        let config = config_with(&[ModeKind::Flashcards, ModeKind::Memory]);
        let mut session = TrainingSession::start(words(3), &config, rng()).unwrap();
        session.advance();

        complete_memory(&mut session);
        session.retreat();
        // Completion credit was earned before the retreat and is kept.
        assert_eq!(session.total_correct(), 3);

        // Redo the board and finish the session: the ledger appends.
        session.advance();
        complete_memory(&mut session);
        session.advance();

        assert_eq!(session.total_correct(), 6);
        let result = session.result().unwrap();
        assert_eq!(result.total_possible, 3);
        assert_eq!(result.actual_correct, 3);
        assert_eq!(result.success_percentage, 100);
    }

    #[test]
    fn total_possible_counts_scorable_modes_only() {
        let config = config_with(&[ModeKind::Flashcards, ModeKind::Translation, ModeKind::Spelling]);
        let mut session = TrainingSession::start(words(5), &config, rng()).unwrap();
        session.advance();
        session.advance();
        session.advance();
        let result = session.result().unwrap();
        assert_eq!(result.total_possible, 10);
        assert_eq!(result.success_percentage, 0);
        assert!(!result.passed);
    }

    #[test]
    fn partial_spelling_run_scores_proportionally() {
        let config = config_with(&[ModeKind::Spelling]);
        let mut session = TrainingSession::start(words(3), &config, rng()).unwrap();
        play_spelling(&mut session, 2);
        let result = session.result().unwrap();
        assert_eq!(result.actual_correct, 2);
        assert_eq!(result.success_percentage, 67);
        assert!(!result.passed);
    }
}
