// src/domain/keyphrase/extractor.rs
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::article::FocusKeyphrase;
use crate::domain::article::text::static_regex;
use crate::domain::vocabulary::Vocabulary;

static MODEL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| static_regex(r"^[a-z]{1,4}(?:-[a-z]{1,3})?\d+[a-z0-9]*$"));

const MAX_TOKENS: usize = 3;

/// Derives a short canonical focus phrase from a product or subject name.
pub struct KeyphraseExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl KeyphraseExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn extract(&self, subject: &str) -> FocusKeyphrase {
        let tokens = self.surviving_tokens(subject);

        if let Some(phrase) = brand_line_model(&tokens, &self.vocabulary) {
            return FocusKeyphrase::new(phrase);
        }

        match tokens.as_slice() {
            [] => FocusKeyphrase::new(&self.vocabulary.fallback_keyphrase),
            [single] => FocusKeyphrase::new(format!(
                "{single} {}",
                self.vocabulary.generic_category_noun
            )),
            _ => FocusKeyphrase::new(
                tokens
                    .iter()
                    .take(MAX_TOKENS)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }

    fn surviving_tokens(&self, subject: &str) -> Vec<String> {
        subject
            .split_whitespace()
            .map(|raw| {
                raw.to_lowercase()
                    .trim_matches(|c: char| !(c.is_alphanumeric() || c == '-'))
                    .to_string()
            })
            .filter(|token| !token.is_empty())
            .filter(|token| !self.vocabulary.is_stopword(token))
            .filter(|token| !is_numeric(token))
            .collect()
    }
}

fn is_numeric(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

fn is_model_code(token: &str) -> bool {
    MODEL_CODE_RE.is_match(token)
}

fn brand_line_model(tokens: &[String], vocabulary: &Vocabulary) -> Option<String> {
    let brand_at = tokens.iter().position(|t| vocabulary.is_brand(t))?;
    let rest = &tokens[brand_at + 1..];
    let line_at = rest.iter().position(|t| !is_model_code(t))?;
    let model = rest[line_at + 1..].iter().find(|t| is_model_code(t))?;
    Some(format!("{} {} {}", tokens[brand_at], rest[line_at], model))
}
