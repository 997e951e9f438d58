use serde::{Deserialize, Serialize};

use crate::engine::scoring;
use crate::session::modes::ModeKind;

/// Session summary, computed exactly once when the mode sequence is
/// exhausted. This is what the summary screen renders and what decides the
/// learning-state mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub success_percentage: u32,
    pub actual_correct: usize,
    pub total_possible: usize,
    pub passed: bool,
}

impl SessionResult {
    pub fn from_ledger(
        total_correct: usize,
        sequence: &[ModeKind],
        word_count: usize,
    ) -> Self {
        let total_possible = scoring::total_possible(sequence, word_count);
        let actual_correct = scoring::clamp_correct(total_correct, total_possible);
        let rate = scoring::success_rate(actual_correct, total_possible);

        Self {
            success_percentage: scoring::success_percentage(rate),
            actual_correct,
            total_possible,
            passed: scoring::is_pass(rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_ledger_is_a_pass() {
        let sequence = [ModeKind::Translation];
        let result = SessionResult::from_ledger(2, &sequence, 2);
        assert_eq!(result.success_percentage, 100);
        assert_eq!(result.actual_correct, 2);
        assert_eq!(result.total_possible, 2);
        assert!(result.passed);
    }

    #[test]
    fn ninety_percent_exactly_passes() {
        let sequence = [ModeKind::Spelling];
        let result = SessionResult::from_ledger(9, &sequence, 10);
        assert_eq!(result.success_percentage, 90);
        assert!(result.passed);

        let result = SessionResult::from_ledger(8, &sequence, 10);
        assert_eq!(result.success_percentage, 80);
        assert!(!result.passed);
    }

    #[test]
    fn overcounted_ledger_clamps_instead_of_exceeding_100() {
        let sequence = [ModeKind::Spelling];
        let result = SessionResult::from_ledger(5, &sequence, 3);
        assert_eq!(result.actual_correct, 3);
        assert_eq!(result.success_percentage, 100);
    }

    #[test]
    fn flashcards_only_summary_is_zero_and_fails() {
        let sequence = [ModeKind::Flashcards];
        let result = SessionResult::from_ledger(0, &sequence, 4);
        assert_eq!(result.total_possible, 0);
        assert_eq!(result.success_percentage, 0);
        assert!(!result.passed);
    }
}
