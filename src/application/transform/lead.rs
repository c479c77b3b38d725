// src/application/transform/lead.rs
use super::{BodyPass, PassContext};
use crate::domain::article::text::{char_len, contains_ci};
use crate::domain::article::{Block, Body};

const MAX_SUBJECT_MENTION_CHARS: usize = 60;

/// Opens the body with a sentence naming the keyphrase, followed by a buy link.
pub struct KeyphraseInLeadPass;

impl KeyphraseInLeadPass {
    fn opening_sentence(ctx: &PassContext<'_>) -> String {
        let subject = ctx.subject_name();
        let phrase = ctx.phrase_text();
        let mention = if char_len(subject) <= MAX_SUBJECT_MENTION_CHARS && contains_ci(subject, phrase) {
            subject
        } else {
            phrase
        };
        format!(
            "{} {mention} {}",
            ctx.grammar.article_for(subject),
            ctx.vocabulary.lead_clause
        )
    }

    fn buy_sentence(ctx: &PassContext<'_>) -> String {
        let links = &ctx.vocabulary.links;
        let subject = ctx.subject_name();
        let href = format!("{}{}", links.product_base_url, ctx.slugger.slugify(subject));
        let anchor = links.buy_anchor.replace("{subject}", subject);
        let link = format!(
            r#"<a href="{href}" target="_blank" rel="noopener"><strong>{anchor}</strong></a>"#
        );
        links.buy_link_sentence.replace("{link}", &link)
    }
}

impl BodyPass for KeyphraseInLeadPass {
    fn name(&self) -> &'static str {
        "keyphrase_in_lead"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        if body.lead_contains(ctx.phrase_text(), ctx.rules.lead_window_chars) {
            return body;
        }

        let opening = Self::opening_sentence(ctx);
        let buy = Self::buy_sentence(ctx);
        let mut blocks = body.into_blocks();
        match blocks.first_mut() {
            Some(Block::Paragraph(text)) => {
                *text = format!("{opening} {text}");
                blocks.insert(1, Block::paragraph(buy));
            }
            _ => blocks.insert(0, Block::paragraph(format!("{opening} {buy}"))),
        }
        Body::from_blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::super::MinimumLengthPass;
    use super::super::testing::Fixture;
    use super::*;

    #[test]
    fn lead_gets_subject_and_buy_link() {
        let fixture = Fixture::new("hp laserjet m404n", "HP LaserJet M404n");
        let body = KeyphraseInLeadPass.apply(Body::parse("<p>Texto original.</p>"), &fixture.ctx());

        assert!(body.lead_contains("hp laserjet m404n", 100));
        let first = &body.blocks()[0];
        assert_eq!(
            first,
            &Block::paragraph(
                "O HP LaserJet M404n é uma excelente opção para quem busca qualidade e desempenho. Texto original."
            )
        );
        let html = body.render();
        assert!(html.contains(r#"href="https://creativecopias.com.br/produto/hp-laserjet-m404n""#));
        assert!(html.contains("<strong>Comprar HP LaserJet M404n</strong>"));
    }

    #[test]
    fn feminine_subject_takes_feminine_article() {
        let fixture = Fixture::new("hp laserjet m404n", "Impressora HP LaserJet Pro M404n");
        let body = KeyphraseInLeadPass.apply(Body::parse("<h2>Intro</h2>"), &fixture.ctx());
        let Block::Paragraph(text) = &body.blocks()[0] else {
            panic!("lead paragraph expected");
        };
        assert!(text.starts_with("A hp laserjet m404n é"), "{text}");
        assert!(body.lead_contains("hp laserjet m404n", 100));
    }

    #[test]
    fn filler_heading_does_not_count_as_the_lead() {
        let fixture = Fixture::new("impressora térmica zebra", "Impressora Térmica Zebra");
        let ctx = fixture.ctx();
        let body = MinimumLengthPass.apply(Body::parse("<p>short</p>"), &ctx);
        assert!(body.render().contains("Impressora Térmica Zebra"));
        assert!(!body.lead_contains("impressora térmica zebra", 100));

        let body = KeyphraseInLeadPass.apply(body, &ctx);
        let Block::Paragraph(first) = &body.blocks()[0] else {
            panic!("lead paragraph expected");
        };
        assert!(first.starts_with("A Impressora Térmica Zebra é"), "{first}");
        assert!(first.ends_with("short"), "{first}");
        assert!(body.render().contains("creativecopias.com.br/produto/impressora-termica-zebra"));
    }

    #[test]
    fn lead_already_naming_phrase_is_untouched() {
        let fixture = Fixture::new("hp laserjet m404n", "HP");
        let body = Body::parse("<p>A HP LaserJet M404n imprime rápido.</p>");
        assert_eq!(KeyphraseInLeadPass.apply(body.clone(), &fixture.ctx()), body);
    }
}
