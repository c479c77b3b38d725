// src/application/composers/title.rs
use crate::domain::article::FocusKeyphrase;
use crate::domain::article::text::{
    capitalize, char_len, display_case, normalize_word, truncate_chars, truncate_words,
    visible_text,
};
use crate::domain::rules::Thresholds;
use crate::domain::vocabulary::Vocabulary;

const ELLIPSIS: &str = "...";
const SEPARATORS: &[char] = &['-', '|', ':', '–', ' '];

pub struct TitleComposer<'a> {
    vocabulary: &'a Vocabulary,
    rules: &'a Thresholds,
}

impl<'a> TitleComposer<'a> {
    pub fn new(vocabulary: &'a Vocabulary, rules: &'a Thresholds) -> Self {
        Self { vocabulary, rules }
    }

    /// Title that opens with the keyphrase and fits the configured length window.
    /// The keyphrase takes its casing from `subject` where the words match.
    pub fn compose(&self, raw_title: Option<&str>, phrase: &FocusKeyphrase, subject: &str) -> String {
        let display = if phrase.is_empty() {
            capitalize(&self.vocabulary.generic_subject)
        } else {
            display_case(phrase.as_str(), subject)
        };
        let raw = raw_title.map(visible_text).unwrap_or_default();

        let title = if raw.is_empty() {
            display
        } else if !phrase.is_empty() && raw.to_lowercase().starts_with(phrase.as_str()) {
            raw
        } else {
            let rest = without_phrase_words(&raw, phrase);
            if rest.is_empty() {
                display
            } else {
                format!("{display} - {rest}")
            }
        };

        self.pad(self.shorten(title))
    }

    fn shorten(&self, title: String) -> String {
        let max = self.rules.title_max_chars;
        if char_len(&title) <= max {
            return title;
        }
        let keep = max.saturating_sub(char_len(ELLIPSIS));
        let mut cut = truncate_words(&title, keep);
        if char_len(&cut) + char_len(ELLIPSIS) < self.rules.title_min_chars {
            cut = truncate_chars(&title, keep);
        }
        let cut = cut.trim_end_matches(SEPARATORS).trim_end_matches([',', '.', ';']);
        format!("{cut}{ELLIPSIS}")
    }

    fn pad(&self, mut title: String) -> String {
        let (min, max) = (self.rules.title_min_chars, self.rules.title_max_chars);
        let extensions = &self.vocabulary.title_extensions;
        for extension in extensions.iter().cycle().take(extensions.len() * 2) {
            if char_len(&title) >= min {
                break;
            }
            if char_len(&title) + char_len(extension) <= max {
                title.push_str(extension);
            }
        }
        title
    }
}

fn without_phrase_words(raw: &str, phrase: &FocusKeyphrase) -> String {
    let phrase_tokens: Vec<&str> = phrase.tokens().collect();
    raw.split_whitespace()
        .filter(|word| !phrase_tokens.contains(&normalize_word(word).as_str()))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(SEPARATORS)
        .to_string()
}
