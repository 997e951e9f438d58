use regex::Regex;

use crate::catalogue::Word;
use crate::session::modes::{ModeKind, ModeRunner};

pub const BLANK: &str = "_____";

pub struct BlankItem {
    pub sentence: String,
    pub translation: String,
    pub answer: String,
    pub typed: String,
    pub answered: Option<bool>,
}

impl BlankItem {
    pub fn is_answered(&self) -> bool {
        self.answered.is_some()
    }
}

/// The word's first whole-word occurrence in its example sentence is
/// masked; the learner types it back. Items can be skipped: stepping past
/// the last item is the explicit exit, crediting answers given so far.
pub struct FillBlanksRunner {
    items: Vec<BlankItem>,
    pub current: usize,
}

impl FillBlanksRunner {
    pub fn new(words: &[Word]) -> Self {
        let items = words
            .iter()
            .map(|word| BlankItem {
                sentence: blank_sentence(&word.text, &word.example),
                translation: word.translation.clone(),
                answer: word.text.clone(),
                typed: String::new(),
                answered: None,
            })
            .collect();

        Self { items, current: 0 }
    }

    pub fn current_item(&self) -> &BlankItem {
        &self.items[self.current]
    }

    pub fn items(&self) -> &[BlankItem] {
        &self.items
    }

    pub fn push_char(&mut self, ch: char) {
        let item = &mut self.items[self.current];
        if item.answered.is_none() {
            item.typed.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        let item = &mut self.items[self.current];
        if item.answered.is_none() {
            item.typed.pop();
        }
    }

    /// Check the typed answer: trimmed, case-insensitive exact match.
    /// Returns None when the item was already answered.
    pub fn submit(&mut self) -> Option<bool> {
        let item = &mut self.items[self.current];
        if item.answered.is_some() {
            return None;
        }
        let correct = item.typed.trim().to_lowercase() == item.answer.to_lowercase();
        item.answered = Some(correct);
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

/// Mask the first case-insensitive whole-word occurrence of `word` in the
/// example. An example that doesn't actually contain the word falls back
/// to a synthesized sentence.
fn blank_sentence(word: &str, example: &str) -> String {
    if let Ok(re) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        && re.is_match(example)
    {
        return re.replace(example, BLANK).into_owned();
    }
    format!("The {BLANK} is very important.")
}

impl ModeRunner for FillBlanksRunner {
    fn kind(&self) -> ModeKind {
        ModeKind::FillBlanks
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn is_complete(&self) -> bool {
        self.items.iter().all(BlankItem::is_answered)
    }

    fn correct_count(&self) -> usize {
        self.items.iter().filter(|i| i.answered == Some(true)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, example: &str) -> Word {
        Word {
            text: text.to_string(),
            translation: "перевод".to_string(),
            phonetics: String::new(),
            word_type: String::new(),
            category: String::new(),
            level: String::new(),
            example: example.to_string(),
            image: None,
            favorite: false,
        }
    }

    #[test]
    fn masks_first_whole_word_occurrence_case_insensitively() {
        let words = vec![word("cat", "Cat owners love their cat.")];
        let r = FillBlanksRunner::new(&words);
        assert_eq!(r.current_item().sentence, "_____ owners love their cat.");
    }

    #[test]
    fn partial_word_is_not_masked() {
        let words = vec![word("cat", "The catalogue lists every cat here.")];
        let r = FillBlanksRunner::new(&words);
        assert_eq!(
            r.current_item().sentence,
            "The catalogue lists every _____ here."
        );
    }

    #[test]
    fn missing_example_synthesizes_sentence() {
        let words = vec![word("bright", "")];
        let r = FillBlanksRunner::new(&words);
        assert_eq!(r.current_item().sentence, "The _____ is very important.");
    }

    #[test]
    fn example_without_the_word_synthesizes_sentence() {
        let words = vec![word("run", "They jog every morning.")];
        let r = FillBlanksRunner::new(&words);
        assert_eq!(r.current_item().sentence, "The _____ is very important.");
    }

    #[test]
    fn answer_check_is_trimmed_and_case_insensitive() {
        let words = vec![word("Cat", "The Cat sat.")];
        let mut r = FillBlanksRunner::new(&words);
        for ch in "  cAt ".chars() {
            r.push_char(ch);
        }
        assert_eq!(r.submit(), Some(true));
        assert_eq!(r.correct_count(), 1);
    }

    #[test]
    fn item_is_answered_at_most_once() {
        let words = vec![word("cat", "The cat sat.")];
        let mut r = FillBlanksRunner::new(&words);
        r.push_char('x');
        assert_eq!(r.submit(), Some(false));
        // Further input and re-submission are ignored.
        r.push_char('c');
        assert_eq!(r.current_item().typed, "x");
        assert_eq!(r.submit(), None);
        assert_eq!(r.correct_count(), 0);
    }

    #[test]
    fn items_can_be_skipped() {
        let words = vec![word("cat", "The cat sat."), word("dog", "The dog ran.")];
        let mut r = FillBlanksRunner::new(&words);
        assert!(r.next());
        assert!(!r.next());
        assert!(r.at_exit());
        assert!(!r.is_complete());
        assert_eq!(r.advance_credit(), 0);
    }
}
