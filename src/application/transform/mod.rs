// src/application/transform/mod.rs
//! Ordered rewrite passes over an article body.
//!
//! Every pass is a pure function of `(Body, PassContext)`. Later passes rely on
//! what earlier ones established, so [`ContentTransformer::standard`] fixes the order.
pub mod density;
pub mod headings;
pub mod lead;
pub mod links;
pub mod lists;
pub mod min_length;
pub mod paragraphs;
pub mod sentences;
pub mod voice;

use crate::application::ports::util::SlugGenerator;
use crate::domain::article::{Body, FocusKeyphrase};
use crate::domain::grammar::GrammarAgreement;
use crate::domain::rules::Thresholds;
use crate::domain::selection::{SelectionStrategy, VariantCursor};
use crate::domain::vocabulary::{Category, Vocabulary};

pub use density::KeywordDensityPass;
pub use headings::HeadingKeyphrasePass;
pub use lead::KeyphraseInLeadPass;
pub use links::{LinkInjectionPass, LinkSanitizationPass};
pub use lists::ListPass;
pub use min_length::MinimumLengthPass;
pub use paragraphs::ParagraphLengthPass;
pub use sentences::{RepeatedOpenerPass, SentenceLengthPass, TransitionDensityPass};
pub use voice::ActiveVoicePass;

/// Everything a pass may read besides the body itself.
#[derive(Clone, Copy)]
pub struct PassContext<'a> {
    pub keyphrase: &'a FocusKeyphrase,
    pub subject: &'a str,
    pub vocabulary: &'a Vocabulary,
    pub rules: &'a Thresholds,
    pub selection: SelectionStrategy,
    pub slugger: &'a dyn SlugGenerator,
    pub grammar: &'a dyn GrammarAgreement,
}

impl<'a> PassContext<'a> {
    /// Keyphrase text, or the generic subject noun when the phrase is empty.
    pub fn phrase_text(&self) -> &'a str {
        if self.keyphrase.is_empty() {
            &self.vocabulary.generic_subject
        } else {
            self.keyphrase.as_str()
        }
    }

    pub fn subject_name(&self) -> &'a str {
        let subject = self.subject.trim();
        if subject.is_empty() {
            &self.vocabulary.generic_subject
        } else {
            subject
        }
    }

    pub fn category(&self) -> &'a Category {
        self.vocabulary
            .category_for(self.keyphrase.as_str(), self.subject)
    }

    pub fn cursor(&self, salt: u64) -> VariantCursor {
        self.selection.cursor(salt)
    }

    /// Replaces `{subject}` and `{phrase}` placeholders.
    pub fn fill(&self, template: &str) -> String {
        template
            .replace("{subject}", self.subject_name())
            .replace("{phrase}", self.phrase_text())
    }
}

pub trait BodyPass: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body;
}

pub struct ContentTransformer {
    passes: Vec<Box<dyn BodyPass>>,
}

impl ContentTransformer {
    pub fn new(passes: Vec<Box<dyn BodyPass>>) -> Self {
        Self { passes }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MinimumLengthPass),
            Box::new(LinkInjectionPass),
            Box::new(KeyphraseInLeadPass),
            Box::new(SentenceLengthPass),
            Box::new(TransitionDensityPass),
            Box::new(RepeatedOpenerPass),
            Box::new(ListPass),
            Box::new(ParagraphLengthPass),
            Box::new(HeadingKeyphrasePass),
            Box::new(ActiveVoicePass),
            Box::new(KeywordDensityPass),
            Box::new(LinkSanitizationPass),
        ])
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn transform(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        self.passes.iter().fold(body, |body, pass| {
            let before = body.word_count();
            let body = pass.apply(body, ctx);
            tracing::debug!(
                pass = pass.name(),
                words_before = before,
                words_after = body.word_count(),
                "rewrite pass applied"
            );
            body
        })
    }
}

impl Default for ContentTransformer {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::PassContext;
    use crate::domain::article::FocusKeyphrase;
    use crate::domain::grammar::NounGenderTable;
    use crate::domain::rules::Thresholds;
    use crate::domain::selection::SelectionStrategy;
    use crate::domain::vocabulary::Vocabulary;
    use crate::infrastructure::util::DefaultSlugGenerator;

    pub struct Fixture {
        pub vocabulary: Vocabulary,
        pub rules: Thresholds,
        pub keyphrase: FocusKeyphrase,
        pub subject: String,
        slugger: DefaultSlugGenerator,
        grammar: NounGenderTable,
    }

    impl Fixture {
        pub fn new(phrase: &str, subject: &str) -> Self {
            Self {
                vocabulary: Vocabulary::pt_br(),
                rules: Thresholds::default(),
                keyphrase: FocusKeyphrase::new(phrase),
                subject: subject.to_string(),
                slugger: DefaultSlugGenerator,
                grammar: NounGenderTable::pt_br(),
            }
        }

        pub fn ctx(&self) -> PassContext<'_> {
            PassContext {
                keyphrase: &self.keyphrase,
                subject: &self.subject,
                vocabulary: &self.vocabulary,
                rules: &self.rules,
                selection: SelectionStrategy::RoundRobin,
                slugger: &self.slugger,
                grammar: &self.grammar,
            }
        }
    }

    /// `count` sentences of nine words each, none with a transition word.
    pub fn plain_sentences(count: usize) -> String {
        (0..count)
            .map(|i| format!("Frase número {i} descreve um detalhe simples do equipamento."))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
