use crate::session::modes::ModeKind;

/// A session at or above this success rate marks its words as learned.
pub const PASS_THRESHOLD: f64 = 0.9;

pub fn scorable_mode_count(sequence: &[ModeKind]) -> usize {
    sequence.iter().filter(|kind| kind.is_scorable()).count()
}

/// Maximum creditable answers: one per word per scorable mode in the
/// sequence.
pub fn total_possible(sequence: &[ModeKind], word_count: usize) -> usize {
    scorable_mode_count(sequence) * word_count
}

/// The raw ledger is append-only across navigation, so a retreat-and-redo
/// can exceed the denominator; the clamp caps credit at one per item.
pub fn clamp_correct(total_correct: usize, total_possible: usize) -> usize {
    total_correct.min(total_possible)
}

pub fn success_rate(actual_correct: usize, total_possible: usize) -> f64 {
    if total_possible > 0 {
        actual_correct as f64 / total_possible as f64
    } else {
        0.0
    }
}

pub fn success_percentage(rate: f64) -> u32 {
    (rate * 100.0).min(100.0).round() as u32
}

pub fn is_pass(rate: f64) -> bool {
    rate >= PASS_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashcards_never_enter_the_denominator() {
        let sequence = [ModeKind::Flashcards, ModeKind::Translation, ModeKind::Spelling];
        assert_eq!(scorable_mode_count(&sequence), 2);
        assert_eq!(total_possible(&sequence, 5), 10);
    }

    #[test]
    fn flashcards_only_session_scores_zero() {
        let sequence = [ModeKind::Flashcards];
        assert_eq!(total_possible(&sequence, 7), 0);
        let rate = success_rate(0, 0);
        assert_eq!(rate, 0.0);
        assert_eq!(success_percentage(rate), 0);
        assert!(!is_pass(rate));
    }

    #[test]
    fn clamp_caps_at_one_credit_per_item() {
        assert_eq!(clamp_correct(5, 3), 3);
        assert_eq!(clamp_correct(2, 3), 2);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        // 9/10 = 90% passes, 8/10 = 80% fails.
        assert!(is_pass(success_rate(9, 10)));
        assert!(!is_pass(success_rate(8, 10)));
        // 8/9 is just under the line.
        assert!(!is_pass(success_rate(8, 9)));
    }

    #[test]
    fn percentage_is_rounded_and_capped() {
        assert_eq!(success_percentage(success_rate(2, 3)), 67);
        assert_eq!(success_percentage(success_rate(10, 10)), 100);
        assert_eq!(success_percentage(1.2), 100);
    }
}
