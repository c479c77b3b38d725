// src/application/composers/meta.rs
use crate::domain::article::text::{
    char_len, contains_ci, display_case, truncate_chars, truncate_words, visible_text,
};
use crate::domain::article::{Body, FocusKeyphrase};
use crate::domain::rules::Thresholds;
use crate::domain::vocabulary::Vocabulary;

const ELLIPSIS: &str = "...";
const MAX_PADDING_ROUNDS: usize = 32;
/// Room kept after the keyphrase so truncation never cuts through it.
const PHRASE_TAIL_SLACK: usize = 10;

pub struct MetaComposer<'a> {
    vocabulary: &'a Vocabulary,
    rules: &'a Thresholds,
}

impl<'a> MetaComposer<'a> {
    pub fn new(vocabulary: &'a Vocabulary, rules: &'a Thresholds) -> Self {
        Self { vocabulary, rules }
    }

    pub fn compose(
        &self,
        raw_meta: Option<&str>,
        phrase: &FocusKeyphrase,
        subject: &str,
        body: &Body,
    ) -> String {
        let (min, max) = (self.rules.meta_min_chars, self.rules.meta_max_chars);
        let phrase_text = if phrase.is_empty() {
            self.vocabulary.generic_subject.as_str()
        } else {
            phrase.as_str()
        };

        let raw = raw_meta.map(visible_text).unwrap_or_default();
        let mut meta = if char_len(&raw) >= min {
            raw
        } else {
            body.paragraphs()
                .map(visible_text)
                .find(|p| char_len(p) > self.rules.meta_source_min_chars)
                .or_else(|| (!raw.is_empty()).then(|| raw.clone()))
                .unwrap_or_else(|| self.vocabulary.meta_fallback.replace("{phrase}", phrase_text))
        };

        let window = max.saturating_sub(PHRASE_TAIL_SLACK);
        if !contains_ci(&truncate_chars(&meta, window), phrase_text) {
            meta = format!("{}: {meta}", display_case(phrase_text, subject));
        }

        for cta in &self.vocabulary.meta_ctas {
            if char_len(&meta) >= min {
                break;
            }
            if char_len(&meta) + char_len(cta) <= max {
                meta.push_str(cta);
            }
        }
        let pad = &self.vocabulary.meta_short_pad;
        for _ in 0..MAX_PADDING_ROUNDS {
            if char_len(&meta) >= min || char_len(&meta) + char_len(pad) > max || pad.is_empty() {
                break;
            }
            meta.push_str(pad);
        }

        if char_len(&meta) > max {
            meta = self.shorten(&meta);
        }
        meta
    }

    fn shorten(&self, meta: &str) -> String {
        let keep = self.rules.meta_max_chars.saturating_sub(char_len(ELLIPSIS));
        let floor = self.rules.meta_min_chars.saturating_sub(char_len(ELLIPSIS));
        let trim = |text: String| {
            text.trim_end_matches([' ', ',', ';', ':', '.', '-'])
                .to_string()
        };
        let mut cut = trim(truncate_words(meta, keep));
        if char_len(&cut) < floor {
            cut = trim(truncate_chars(meta, keep));
        }
        format!("{cut}{ELLIPSIS}")
    }
}
