// src/application/transform/density.rs
use super::{BodyPass, PassContext};
use crate::domain::article::text::{Sentence, contains_ci, split_sentences};
use crate::domain::article::{Block, Body};
use crate::domain::selection::VariantCursor;

const DENSITY_SALT: u64 = 0xde75;

fn last_opener(text: &str) -> Option<String> {
    split_sentences(text).last().and_then(Sentence::opener)
}

fn first_opener(text: &str) -> Option<String> {
    split_sentences(text).first().and_then(Sentence::opener)
}

fn append_sentence(text: &mut String, sentence: &str) {
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(sentence);
}

/// Pulls keyphrase density back into the configured percentage window.
pub struct KeywordDensityPass;

impl KeywordDensityPass {
    /// Picks a variant whose opener differs from both neighbours, falling back
    /// to the cursor's choice when none does.
    fn pick_variant(
        variants: &[String],
        cursor: &mut VariantCursor,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Option<String> {
        let mut fallback = None;
        for _ in 0..variants.len() {
            let candidate = cursor.pick(variants)?;
            let opener = first_opener(candidate);
            if opener.as_deref() != before && opener.as_deref() != after {
                return Some(candidate.clone());
            }
            fallback.get_or_insert_with(|| candidate.clone());
        }
        fallback
    }

    fn raise(&self, mut blocks: Vec<Block>, ctx: &PassContext<'_>) -> Vec<Block> {
        let phrase = ctx.keyphrase.as_str();
        let article = ctx.grammar.article_for(ctx.subject_name()).to_lowercase();
        let mut cursor = ctx.cursor(DENSITY_SALT);
        let mut hosts: Vec<usize> = blocks
            .iter()
            .enumerate()
            .filter_map(|(i, block)| matches!(block, Block::Paragraph(_)).then_some(i))
            .collect();
        if hosts.is_empty() {
            blocks.push(Block::paragraph(String::new()));
            hosts.push(blocks.len() - 1);
        }

        for round in 0..ctx.rules.max_density_insertions {
            if Body::from_blocks(blocks.clone()).density_percent(phrase) >= ctx.rules.density_min_percent {
                break;
            }
            let at = hosts[round % hosts.len()];
            let before = match &blocks[at] {
                Block::Paragraph(text) => last_opener(text),
                _ => None,
            };
            let after = match blocks.get(at + 1) {
                Some(Block::Paragraph(text)) => first_opener(text),
                _ => None,
            };
            let Some(template) = Self::pick_variant(
                &ctx.vocabulary.density_sentences,
                &mut cursor,
                before.as_deref(),
                after.as_deref(),
            ) else {
                break;
            };
            if let Block::Paragraph(text) = &mut blocks[at] {
                let sentence = template.replace("{article}", &article).replace("{phrase}", phrase);
                append_sentence(text, &sentence);
            }
        }
        blocks
    }

    fn dilute(&self, mut blocks: Vec<Block>, ctx: &PassContext<'_>) -> Vec<Block> {
        let phrase = ctx.keyphrase.as_str();
        let mut cursor = ctx.cursor(DENSITY_SALT);
        let neutral: Vec<String> = ctx
            .vocabulary
            .dilution_paragraphs
            .iter()
            .filter(|paragraph| !contains_ci(paragraph, phrase))
            .cloned()
            .collect();

        for _ in 0..ctx.rules.max_dilution_paragraphs {
            if Body::from_blocks(blocks.clone()).density_percent(phrase) <= ctx.rules.density_max_percent {
                break;
            }
            let before = match blocks.last() {
                Some(Block::Paragraph(text)) => last_opener(text),
                _ => None,
            };
            let Some(paragraph) = Self::pick_variant(&neutral, &mut cursor, before.as_deref(), None) else {
                break;
            };
            blocks.push(Block::paragraph(paragraph));
        }
        blocks
    }
}

impl BodyPass for KeywordDensityPass {
    fn name(&self) -> &'static str {
        "keyword_density"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        if ctx.keyphrase.is_empty() {
            return body;
        }
        let density = body.density_percent(ctx.keyphrase.as_str());
        if ctx.rules.density_in_range(density) {
            return body;
        }
        let blocks = body.into_blocks();
        let blocks = if density < ctx.rules.density_min_percent {
            self.raise(blocks, ctx)
        } else {
            self.dilute(blocks, ctx)
        };
        Body::from_blocks(blocks)
    }
}
