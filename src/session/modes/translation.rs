use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::catalogue::Word;
use crate::session::modes::{ModeKind, ModeRunner};

pub struct TranslationItem {
    pub prompt: String,
    pub phonetics: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub chosen: Option<usize>,
}

impl TranslationItem {
    pub fn is_answered(&self) -> bool {
        self.chosen.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.chosen == Some(self.correct)
    }
}

/// Multiple choice over the word's translation plus up to two distractors
/// drawn without replacement from the other selected words. Choosing is
/// terminal per item; "next" is gated on having answered.
pub struct TranslationRunner {
    items: Vec<TranslationItem>,
    pub current: usize,
}

impl TranslationRunner {
    pub fn new(words: &[Word], rng: &mut SmallRng) -> Self {
        let items = words
            .iter()
            .map(|word| {
                let mut distractors: Vec<&str> = words
                    .iter()
                    .filter(|other| other.text != word.text)
                    .map(|other| other.translation.as_str())
                    .collect();
                distractors.shuffle(rng);

                let mut options: Vec<String> = distractors
                    .into_iter()
                    .take(2)
                    .map(str::to_string)
                    .collect();
                options.push(word.translation.clone());
                options.shuffle(rng);

                let correct = options
                    .iter()
                    .position(|o| *o == word.translation)
                    .unwrap_or(0);

                TranslationItem {
                    prompt: word.text.clone(),
                    phonetics: word.phonetics.clone(),
                    options,
                    correct,
                    chosen: None,
                }
            })
            .collect();

        Self { items, current: 0 }
    }

    pub fn current_item(&self) -> &TranslationItem {
        &self.items[self.current]
    }

    pub fn items(&self) -> &[TranslationItem] {
        &self.items
    }

    /// Record the learner's pick for the current item. A second pick for
    /// the same item is ignored.
    pub fn choose(&mut self, option: usize) {
        let item = &mut self.items[self.current];
        if item.chosen.is_some() || option >= item.options.len() {
            return;
        }
        item.chosen = Some(option);
    }

    /// Move to the next item. Returns false when already on the last item
    /// (the caller exits the mode) or the current item is unanswered.
    pub fn next(&mut self) -> bool {
        if !self.current_item().is_answered() {
            return false;
        }
        if self.current + 1 < self.items.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// On the last item with an answer recorded: the next action exits.
    pub fn at_exit(&self) -> bool {
        self.current + 1 == self.items.len() && self.current_item().is_answered()
    }
}

impl ModeRunner for TranslationRunner {
    fn kind(&self) -> ModeKind {
        ModeKind::Translation
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn is_complete(&self) -> bool {
        self.items.iter().all(TranslationItem::is_answered)
    }

    fn correct_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_correct()).count()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn word(text: &str, translation: &str) -> Word {
        Word {
            text: text.to_string(),
            translation: translation.to_string(),
            phonetics: String::new(),
            word_type: "noun".to_string(),
            category: String::new(),
            level: String::new(),
            example: String::new(),
            image: None,
            favorite: false,
        }
    }

    fn runner(words: &[Word]) -> TranslationRunner {
        let mut rng = SmallRng::seed_from_u64(11);
        TranslationRunner::new(words, &mut rng)
    }

    #[test]
    fn three_options_when_enough_words() {
        let words = vec![word("cat", "кот"), word("dog", "собака"), word("horse", "лошадь")];
        let r = runner(&words);
        for item in r.items() {
            assert_eq!(item.options.len(), 3);
            assert_eq!(item.options[item.correct], correct_translation(&words, &item.prompt));
        }
    }

    fn correct_translation(words: &[Word], text: &str) -> String {
        words.iter().find(|w| w.text == text).unwrap().translation.clone()
    }

    #[test]
    fn fewer_words_means_fewer_distractors() {
        let words = vec![word("cat", "кот"), word("dog", "собака")];
        let r = runner(&words);
        assert_eq!(r.current_item().options.len(), 2);

        let solo = vec![word("cat", "кот")];
        let r = runner(&solo);
        assert_eq!(r.current_item().options.len(), 1);
    }

    #[test]
    fn choosing_is_terminal_per_item() {
        let words = vec![word("cat", "кот"), word("dog", "собака")];
        let mut r = runner(&words);
        let wrong = (r.current_item().correct + 1) % r.current_item().options.len();
        r.choose(wrong);
        assert!(r.current_item().is_answered());
        assert!(!r.current_item().is_correct());

        // Second pick is ignored, even if it would have been correct.
        let correct = r.current_item().correct;
        r.choose(correct);
        assert_eq!(r.current_item().chosen, Some(wrong));
        assert_eq!(r.correct_count(), 0);
    }

    #[test]
    fn next_is_gated_on_answering() {
        let words = vec![word("cat", "кот"), word("dog", "собака")];
        let mut r = runner(&words);
        assert!(!r.next());
        assert_eq!(r.current, 0);

        let correct = r.current_item().correct;
        r.choose(correct);
        assert!(r.next());
        assert_eq!(r.current, 1);
    }

    #[test]
    fn complete_after_all_items_answered() {
        let words = vec![word("cat", "кот"), word("dog", "собака")];
        let mut r = runner(&words);
        for _ in 0..2 {
            let correct = r.current_item().correct;
            r.choose(correct);
            r.next();
        }
        assert!(r.is_complete());
        assert!(r.at_exit());
        assert_eq!(r.correct_count(), 2);
        assert_eq!(r.advance_credit(), 2);
        assert_eq!(r.retreat_credit(), 0);
    }
}
