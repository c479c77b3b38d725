// src/application/composers/slug.rs
use crate::domain::article::text::truncate_chars;
use crate::domain::article::{ArticleSlug, FocusKeyphrase};
use crate::domain::errors::DomainResult;
use crate::domain::rules::Thresholds;
use crate::domain::vocabulary::Vocabulary;

pub struct SlugComposer<'a> {
    vocabulary: &'a Vocabulary,
    rules: &'a Thresholds,
}

impl<'a> SlugComposer<'a> {
    pub fn new(vocabulary: &'a Vocabulary, rules: &'a Thresholds) -> Self {
        Self { vocabulary, rules }
    }

    /// Keyphrase tokens first, then the remaining base tokens, capped by dropping
    /// trailing tokens.
    pub fn compose(&self, base_text: &str, phrase: &FocusKeyphrase) -> DomainResult<ArticleSlug> {
        let phrase_source = if phrase.is_empty() {
            self.vocabulary.generic_subject.as_str()
        } else {
            phrase.as_str()
        };
        let mut tokens = self.tokens(phrase_source);
        for token in self.tokens(base_text) {
            if !self.vocabulary.is_stopword(&token) && !tokens.contains(&token) {
                tokens.push(token);
            }
        }

        let max = self.rules.slug_max_chars;
        let mut slug = String::new();
        for token in &tokens {
            let extra = if slug.is_empty() { 0 } else { 1 };
            if slug.len() + extra + token.len() > max {
                break;
            }
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.push_str(token);
        }
        if slug.is_empty() {
            slug = match tokens.first() {
                Some(first) => truncate_chars(first, max).trim_end_matches('-').to_string(),
                None => self.tokens(&self.vocabulary.generic_subject).join("-"),
            };
        }

        ArticleSlug::new(slug)
    }

    /// Lowercase, transliterated `[a-z0-9]` runs.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let cleaned: String = self
            .vocabulary
            .transliterate(&text.to_lowercase())
            .chars()
            .filter_map(|c| match c {
                'a'..='z' | '0'..='9' => Some(c),
                '-' | '_' => Some(' '),
                c if c.is_whitespace() => Some(' '),
                _ => None,
            })
            .collect();
        cleaned.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(base: &str, phrase: &str) -> String {
        let vocabulary = Vocabulary::pt_br();
        let rules = Thresholds::default();
        SlugComposer::new(&vocabulary, &rules)
            .compose(base, &FocusKeyphrase::new(phrase))
            .unwrap()
            .to_string()
    }

    #[test]
    fn phrase_tokens_lead_the_slug() {
        assert_eq!(compose("Canon PIXMA G3111 Tanque", "canon pixma g3111"), "canon-pixma-g3111-tanque");
    }

    #[test]
    fn accents_and_symbols_are_normalized() {
        assert_eq!(
            compose("Impressão Rápida: Guia & Preços", "hp laserjet m404n"),
            "hp-laserjet-m404n-impressao-rapida-guia-precos"
        );
    }

    #[test]
    fn cap_drops_trailing_tokens() {
        let slug = compose(
            "Canon PIXMA G3111 Multifuncional Tanque de Tinta Wi-Fi Colorida Econômica",
            "canon pixma g3111",
        );
        assert!(slug.len() <= 50, "{slug}");
        assert!(slug.starts_with("canon-pixma-g3111-"));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn empty_inputs_fall_back_to_generic_subject() {
        assert_eq!(compose("", ""), "produto");
        assert_eq!(compose("!!!", ""), "produto");
    }
}
