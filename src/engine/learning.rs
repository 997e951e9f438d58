use std::collections::HashMap;

use chrono::NaiveDate;

use crate::catalogue::Word;
use crate::store::schema::{LearningStat, ProfileData};

/// Mark every word of a passing session as learned. `learned_date` records
/// the first pass only; re-applying the same pass is a no-op beyond
/// refreshing `last_attempt_date`.
pub fn record_pass(
    stats: &mut HashMap<String, LearningStat>,
    words: &[Word],
    today: NaiveDate,
) {
    for word in words {
        let stat = stats.entry(word.text.clone()).or_default();
        stat.successful_attempts = stat.successful_attempts.max(1);
        stat.last_attempt_date = Some(today);
        if stat.learned_date.is_none() {
            stat.learned_date = Some(today);
        }
    }
}

/// Daily streak: counted per calendar day, not per session. The first pass
/// of a day extends (gap of one day) or resets (anything else) the streak;
/// later passes the same day change nothing.
pub fn update_streak(profile: &mut ProfileData, today: NaiveDate) {
    match profile.last_active_date {
        None => profile.streak_days = 1,
        Some(last) => {
            let gap = today.signed_duration_since(last).num_days();
            if gap == 1 {
                profile.streak_days += 1;
            } else if gap != 0 {
                profile.streak_days = 1;
            }
        }
    }
    profile.best_streak = profile.best_streak.max(profile.streak_days);
    profile.last_active_date = Some(today);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word {
            text: text.to_string(),
            translation: "перевод".to_string(),
            phonetics: String::new(),
            word_type: String::new(),
            category: String::new(),
            level: String::new(),
            example: String::new(),
            image: None,
            favorite: false,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn pass_marks_words_learned() {
        let mut stats = HashMap::new();
        let words = vec![word("cat"), word("dog")];
        record_pass(&mut stats, &words, day(1));

        for w in &words {
            let stat = &stats[&w.text];
            assert!(stat.is_learned());
            assert_eq!(stat.last_attempt_date, Some(day(1)));
            assert_eq!(stat.learned_date, Some(day(1)));
        }
    }

    #[test]
    fn learned_date_is_sticky() {
        let mut stats = HashMap::new();
        let words = vec![word("cat")];
        record_pass(&mut stats, &words, day(1));
        record_pass(&mut stats, &words, day(5));

        let stat = &stats["cat"];
        assert_eq!(stat.learned_date, Some(day(1)));
        assert_eq!(stat.last_attempt_date, Some(day(5)));
        assert_eq!(stat.successful_attempts, 1);
    }

    #[test]
    fn existing_attempts_are_not_reset() {
        let mut stats = HashMap::new();
        stats.insert(
            "cat".to_string(),
            LearningStat {
                successful_attempts: 4,
                last_attempt_date: Some(day(1)),
                learned_date: Some(day(1)),
            },
        );
        record_pass(&mut stats, &[word("cat")], day(2));
        assert_eq!(stats["cat"].successful_attempts, 4);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut profile = ProfileData::default();
        update_streak(&mut profile, day(1));
        assert_eq!(profile.streak_days, 1);
        update_streak(&mut profile, day(2));
        assert_eq!(profile.streak_days, 2);
        update_streak(&mut profile, day(3));
        assert_eq!(profile.streak_days, 3);
        assert_eq!(profile.best_streak, 3);
    }

    #[test]
    fn same_day_sessions_do_not_inflate_streak() {
        let mut profile = ProfileData::default();
        update_streak(&mut profile, day(1));
        update_streak(&mut profile, day(1));
        assert_eq!(profile.streak_days, 1);
    }

    #[test]
    fn gap_resets_streak_but_keeps_best() {
        let mut profile = ProfileData::default();
        update_streak(&mut profile, day(1));
        update_streak(&mut profile, day(2));
        update_streak(&mut profile, day(5));
        assert_eq!(profile.streak_days, 1);
        assert_eq!(profile.best_streak, 2);
        assert_eq!(profile.last_active_date, Some(day(5)));
    }
}
