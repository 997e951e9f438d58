use crate::session::modes::{ModeKind, ModeRunner};

/// Front/back reveal over the selected words. No correctness concept:
/// contributes nothing to the score ledger or denominator.
pub struct FlashcardsRunner {
    count: usize,
    pub current: usize,
    pub revealed: bool,
    finished: bool,
}

impl FlashcardsRunner {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: 0,
            revealed: false,
            finished: false,
        }
    }

    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Step forward; stepping past the last card completes the mode.
    pub fn next(&mut self) {
        if self.current + 1 < self.count {
            self.current += 1;
            self.revealed = false;
        } else {
            self.finished = true;
        }
    }

    pub fn prev(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.revealed = false;
        }
    }
}

impl ModeRunner for FlashcardsRunner {
    fn kind(&self) -> ModeKind {
        ModeKind::Flashcards
    }

    fn item_count(&self) -> usize {
        self.count
    }

    fn is_complete(&self) -> bool {
        self.finished
    }

    fn correct_count(&self) -> usize {
        0
    }

    fn advance_credit(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_past_last_card_completes() {
        let mut runner = FlashcardsRunner::new(2);
        assert!(!runner.is_complete());
        runner.next();
        assert_eq!(runner.current, 1);
        assert!(!runner.is_complete());
        runner.next();
        assert!(runner.is_complete());
    }

    #[test]
    fn flip_resets_on_navigation() {
        let mut runner = FlashcardsRunner::new(3);
        runner.flip();
        assert!(runner.revealed);
        runner.next();
        assert!(!runner.revealed);
        runner.flip();
        runner.prev();
        assert!(!runner.revealed);
    }

    #[test]
    fn prev_stops_at_first_card() {
        let mut runner = FlashcardsRunner::new(2);
        runner.prev();
        assert_eq!(runner.current, 0);
    }

    #[test]
    fn never_contributes_to_score() {
        let mut runner = FlashcardsRunner::new(1);
        runner.next();
        assert!(runner.is_complete());
        assert_eq!(runner.correct_count(), 0);
        assert_eq!(runner.advance_credit(), 0);
        assert_eq!(runner.retreat_credit(), 0);
    }
}
