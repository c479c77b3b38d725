// src/application/transform/voice.rs
use regex::{Captures, Regex};

use super::{BodyPass, PassContext};
use crate::domain::article::text::capitalize;
use crate::domain::article::{Block, Body};

/// Rewrites fixed passive constructions into their active form.
pub struct ActiveVoicePass;

impl ActiveVoicePass {
    fn substitutions<'a>(ctx: &PassContext<'a>) -> Vec<(Regex, &'a str)> {
        ctx.vocabulary
            .passive_to_active
            .iter()
            .filter_map(|(passive, active)| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(passive));
                match Regex::new(&pattern) {
                    Ok(re) => Some((re, active.as_str())),
                    Err(err) => {
                        tracing::warn!(error = %err, passive = %passive, "skipping passive voice entry");
                        None
                    }
                }
            })
            .collect()
    }

    fn rewrite(text: &str, substitutions: &[(Regex, &str)]) -> String {
        substitutions
            .iter()
            .fold(text.to_string(), |text, (re, active)| {
                re.replace_all(&text, |caps: &Captures<'_>| {
                    let starts_upper = caps[0].chars().next().is_some_and(char::is_uppercase);
                    if starts_upper {
                        capitalize(active)
                    } else {
                        (*active).to_string()
                    }
                })
                .into_owned()
            })
    }
}

impl BodyPass for ActiveVoicePass {
    fn name(&self) -> &'static str {
        "active_voice"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let substitutions = Self::substitutions(ctx);
        if substitutions.is_empty() {
            return body;
        }
        let blocks = body
            .into_blocks()
            .into_iter()
            .map(|block| match block {
                Block::Paragraph(text) => Block::Paragraph(Self::rewrite(&text, &substitutions)),
                Block::List { ordered, items } => Block::List {
                    ordered,
                    items: items
                        .iter()
                        .map(|item| Self::rewrite(item, &substitutions))
                        .collect(),
                },
                heading => heading,
            })
            .collect();
        Body::from_blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Fixture;
    use super::*;

    #[test]
    fn passive_phrases_become_active() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse(
            "<p>Este modelo é recomendado para escritórios. Foi projetado para durar.</p><ul><li>Pode ser usado em rede</li></ul>",
        );
        let body = ActiveVoicePass.apply(body, &fixture.ctx());
        let html = body.render();
        assert!(html.contains("Este modelo recomendamos para escritórios."), "{html}");
        assert!(html.contains("Projetamos para durar."), "{html}");
        assert!(html.contains("<li>Você pode usar em rede</li>"), "{html}");
    }

    #[test]
    fn partial_words_are_not_rewritten() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse("<p>O item é indicadores de nível.</p>");
        assert_eq!(ActiveVoicePass.apply(body.clone(), &fixture.ctx()), body);
    }
}
