// src/application/transform/paragraphs.rs
use super::{BodyPass, PassContext};
use crate::domain::article::text::{Sentence, join_sentences, split_sentences, word_count};
use crate::domain::article::{Block, Body};

/// Splits long paragraphs on sentence boundaries.
pub struct ParagraphLengthPass;

impl ParagraphLengthPass {
    /// Greedy packing under the word cap. When the sentence that would open the
    /// next paragraph carries a transition, an earlier boundary inside the
    /// preferred window is used instead if one exists.
    fn pack(sentences: Vec<Sentence>, ctx: &PassContext<'_>, patterns: &[Vec<String>]) -> Vec<Vec<Sentence>> {
        let max = ctx.rules.paragraph_max_words;
        let preferred_min = ctx.rules.paragraph_preferred_min_words;
        let opens_with_transition =
            |sentence: &Sentence| patterns.iter().any(|p| sentence.contains_words(p));

        let mut chunks = Vec::new();
        let mut current: Vec<Sentence> = Vec::new();
        for sentence in sentences {
            let words: usize = current.iter().map(Sentence::word_count).sum();
            if !current.is_empty() && words + sentence.word_count() > max {
                let mut cut = current.len();
                if opens_with_transition(&sentence) {
                    let mut total = words;
                    for j in (1..current.len()).rev() {
                        total -= current[j].word_count();
                        if total < preferred_min {
                            break;
                        }
                        if !opens_with_transition(&current[j]) {
                            cut = j;
                            break;
                        }
                    }
                }
                let carried = current.split_off(cut);
                chunks.push(std::mem::replace(&mut current, carried));
            }
            current.push(sentence);
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

impl BodyPass for ParagraphLengthPass {
    fn name(&self) -> &'static str {
        "paragraph_length"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let patterns = ctx.vocabulary.transition_patterns();
        let mut blocks = Vec::new();
        for block in body.into_blocks() {
            match block {
                Block::Paragraph(text) if word_count(&text) > ctx.rules.paragraph_max_words => {
                    let chunks = Self::pack(split_sentences(&text), ctx, &patterns);
                    blocks.extend(
                        chunks
                            .iter()
                            .map(|chunk| Block::Paragraph(join_sentences(chunk))),
                    );
                }
                other => blocks.push(other),
            }
        }
        Body::from_blocks(blocks)
    }
}
