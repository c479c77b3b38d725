// src/application/transform/min_length.rs
use super::{BodyPass, PassContext};
use crate::domain::article::{Block, Body};
use crate::domain::vocabulary::FillerSection;

/// Appends category filler sections until the body reaches the minimum word count.
pub struct MinimumLengthPass;

impl MinimumLengthPass {
    fn section_blocks(section: &FillerSection, ctx: &PassContext<'_>) -> Vec<Block> {
        let mut blocks = vec![Block::heading(2, ctx.fill(&section.heading))];
        blocks.extend(
            section
                .paragraphs
                .iter()
                .map(|paragraph| Block::paragraph(ctx.fill(paragraph))),
        );
        if !section.list.is_empty() {
            blocks.push(Block::list(
                section.list.iter().map(|item| ctx.fill(item)).collect(),
            ));
        }
        blocks
    }
}

impl BodyPass for MinimumLengthPass {
    fn name(&self) -> &'static str {
        "minimum_length"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let target = ctx.rules.min_words;
        let mut words = body.word_count();
        if words >= target {
            return body;
        }

        let sections = &ctx.category().sections;
        let mut blocks = body.into_blocks();
        for section in sections.iter().cycle().take(ctx.rules.max_filler_sections) {
            if words >= target {
                break;
            }
            let added = Self::section_blocks(section, ctx);
            words += Body::from_blocks(added.clone()).word_count();
            blocks.extend(added);
        }
        Body::from_blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Fixture;
    use super::*;

    #[test]
    fn short_body_reaches_minimum() {
        let fixture = Fixture::new("hp laserjet m404n", "HP LaserJet Pro M404n");
        let body = MinimumLengthPass.apply(Body::parse("<p>short</p>"), &fixture.ctx());
        assert!(body.word_count() >= 300, "{}", body.word_count());
        assert_eq!(body.blocks()[0], Block::paragraph("short"));
        assert!(body.render().contains("HP LaserJet Pro M404n"));
        assert!(!body.render().contains("{subject}"));
    }

    #[test]
    fn long_body_is_untouched() {
        let fixture = Fixture::new("hp laserjet m404n", "HP LaserJet Pro M404n");
        let text = "palavra ".repeat(320);
        let body = Body::parse(&format!("<p>{text}</p>"));
        assert_eq!(MinimumLengthPass.apply(body.clone(), &fixture.ctx()), body);
    }

    #[test]
    fn filler_is_bounded() {
        let mut fixture = Fixture::new("hp laserjet m404n", "HP");
        fixture.rules = fixture.rules.with_min_words(1_000_000);
        let body = MinimumLengthPass.apply(Body::default(), &fixture.ctx());
        let headings = body.headings().count();
        assert_eq!(headings, fixture.rules.max_filler_sections);
    }
}
