// src/domain/grammar.rs
use crate::domain::article::text::phrase_words;

/// Chooses the sentence-initial article that agrees with a subject name.
pub trait GrammarAgreement: Send + Sync {
    fn article_for(&self, subject: &str) -> &str;
}

/// Picks the feminine article when any word of the subject is a known feminine noun.
#[derive(Debug, Clone)]
pub struct NounGenderTable {
    feminine_nouns: Vec<String>,
    feminine_article: String,
    masculine_article: String,
}

impl NounGenderTable {
    pub fn new(
        feminine_nouns: Vec<String>,
        feminine_article: impl Into<String>,
        masculine_article: impl Into<String>,
    ) -> Self {
        Self {
            feminine_nouns,
            feminine_article: feminine_article.into(),
            masculine_article: masculine_article.into(),
        }
    }

    pub fn pt_br() -> Self {
        let nouns = [
            "impressora", "multifuncional", "copiadora", "máquina", "etiquetadora",
            "plastificadora", "fragmentadora", "guilhotina", "resma", "tinta", "calculadora",
        ];
        Self::new(nouns.iter().map(|n| (*n).to_string()).collect(), "A", "O")
    }
}

impl Default for NounGenderTable {
    fn default() -> Self {
        Self::pt_br()
    }
}

impl GrammarAgreement for NounGenderTable {
    fn article_for(&self, subject: &str) -> &str {
        let feminine = phrase_words(subject)
            .iter()
            .any(|word| self.feminine_nouns.contains(word));
        if feminine {
            &self.feminine_article
        } else {
            &self.masculine_article
        }
    }
}
