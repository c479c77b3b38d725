// src/application/transform/headings.rs
use super::{BodyPass, PassContext};
use crate::domain::article::text::{contains_ci, display_case, phrase_words};
use crate::domain::article::{Block, Body};

fn is_section_heading(level: u8) -> bool {
    matches!(level, 2 | 3)
}

/// `true` when a heading names the phrase, or its first word as a whole word.
pub fn heading_names(heading: &str, phrase: &str, lead_token: &str) -> bool {
    contains_ci(heading, phrase) || phrase_words(heading).iter().any(|word| word == lead_token)
}

/// Ensures a level-2/3 heading mentions the keyphrase.
pub struct HeadingKeyphrasePass;

impl BodyPass for HeadingKeyphrasePass {
    fn name(&self) -> &'static str {
        "heading_keyphrase"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let phrase = ctx.phrase_text();
        let lead = phrase.split_whitespace().next().unwrap_or(phrase).to_lowercase();
        let named = body
            .headings()
            .any(|(level, text)| is_section_heading(level) && heading_names(text, phrase, &lead));
        if named {
            return body;
        }

        let mut blocks = body.into_blocks();
        let existing = blocks.iter_mut().find_map(|block| match block {
            Block::Heading { level, text } if is_section_heading(*level) => Some(text),
            _ => None,
        });
        match existing {
            Some(text) => *text = format!("{}: {text}", display_case(&lead, ctx.subject_name())),
            None => {
                let heading = format!(
                    "{}: {}",
                    display_case(phrase, ctx.subject_name()),
                    ctx.vocabulary.heading_suffix
                );
                let at = (blocks.len() / 2).max(1).min(blocks.len());
                blocks.insert(at, Block::heading(2, heading));
            }
        }
        Body::from_blocks(blocks)
    }
}
