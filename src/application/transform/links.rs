// src/application/transform/links.rs
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{BodyPass, PassContext};
use crate::domain::article::text::{static_regex, word_count};
use crate::domain::article::{Block, Body};

/// Host names split by stray spaces around the dots, e.g. `www . hp . com`.
static SPACED_HOST_RE: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"\b[a-z0-9-]+(?:\s*\.\s*[a-z0-9-]+)*\s*\.\s*(?:com|net|org|br|io|gov|edu)\b(?:\s*\.\s*br\b)?",
    )
});
static URL_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| static_regex(r#"(?i)\b(href|src)\s*=\s*"([^"]*)""#));

/// Guarantees one internal and one external link.
pub struct LinkInjectionPass;

impl LinkInjectionPass {
    fn insert_sentence(blocks: &mut Vec<Block>, sentence: String, host_min_words: usize) {
        let host = blocks.iter_mut().find_map(|block| match block {
            Block::Paragraph(text) if word_count(text) > host_min_words => Some(text),
            _ => None,
        });
        match host {
            Some(text) => {
                text.push(' ');
                text.push_str(&sentence);
            }
            None => blocks.push(Block::paragraph(sentence)),
        }
    }
}

impl BodyPass for LinkInjectionPass {
    fn name(&self) -> &'static str {
        "link_injection"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let links = &ctx.vocabulary.links;
        let targets = body.link_targets();
        let has_internal = targets.iter().any(|href| links.is_internal(href));
        let has_external = targets.iter().any(|href| links.is_external(href));
        if has_internal && has_external {
            return body;
        }

        let host_min_words = ctx.rules.link_host_min_words;
        let mut blocks = body.into_blocks();
        if !has_internal {
            let internal = &ctx.category().internal_link;
            let anchor = format!(r#"<a href="{}">{}</a>"#, internal.href, internal.anchor);
            let sentence = links.internal_link_sentence.replace("{link}", &anchor);
            Self::insert_sentence(&mut blocks, sentence, host_min_words);
        }
        if !has_external {
            if let Some(site) = ctx
                .vocabulary
                .brand_site_for(ctx.keyphrase.as_str(), ctx.subject)
            {
                let anchor = format!(
                    r#"<a href="{}" target="_blank" rel="nofollow">{}</a>"#,
                    site.url, site.label
                );
                let sentence = links.external_link_sentence.replace("{link}", &anchor);
                Self::insert_sentence(&mut blocks, sentence, host_min_words);
            }
        }
        Body::from_blocks(blocks)
    }
}

/// Removes whitespace from spaced-out host names and from URL attribute values.
pub struct LinkSanitizationPass;

impl LinkSanitizationPass {
    pub fn sanitize(markup: &str) -> String {
        let joined = SPACED_HOST_RE.replace_all(markup, |caps: &Captures<'_>| {
            caps[0].split_whitespace().collect::<String>()
        });
        URL_ATTR_RE
            .replace_all(&joined, |caps: &Captures<'_>| {
                let value: String = caps[2].split_whitespace().collect();
                format!(r#"{}="{value}""#, &caps[1])
            })
            .into_owned()
    }
}

impl BodyPass for LinkSanitizationPass {
    fn name(&self) -> &'static str {
        "link_sanitization"
    }

    fn apply(&self, body: Body, _ctx: &PassContext<'_>) -> Body {
        let blocks = body
            .into_blocks()
            .into_iter()
            .map(|block| match block {
                Block::Paragraph(text) => Block::Paragraph(Self::sanitize(&text)),
                Block::Heading { level, text } => Block::Heading {
                    level,
                    text: Self::sanitize(&text),
                },
                Block::List { ordered, items } => Block::List {
                    ordered,
                    items: items.iter().map(|item| Self::sanitize(item)).collect(),
                },
            })
            .collect();
        Body::from_blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Fixture, plain_sentences};
    use super::*;

    #[test]
    fn missing_links_are_added_to_a_long_paragraph() {
        let fixture = Fixture::new("hp laserjet m404n", "HP LaserJet Pro M404n");
        let body = Body::parse(&format!("<p>curto</p><p>{}</p>", plain_sentences(3)));
        let body = LinkInjectionPass.apply(body, &fixture.ctx());

        assert_eq!(body.blocks().len(), 2);
        let links = &fixture.vocabulary.links;
        let targets = body.link_targets();
        assert!(targets.iter().any(|href| links.is_internal(href)));
        assert!(targets.iter().any(|href| href == "https://www.hp.com/br-pt/"));
        assert!(body.render().contains(r#"target="_blank" rel="nofollow""#));
        assert_eq!(body.blocks()[0], Block::paragraph("curto"));
    }

    #[test]
    fn without_a_host_paragraph_links_get_their_own() {
        let fixture = Fixture::new("canon pixma g3111", "Canon PIXMA G3111");
        let body = LinkInjectionPass.apply(Body::parse("<p>curto</p>"), &fixture.ctx());
        assert_eq!(body.blocks().len(), 3);
        assert!(body.render().contains("https://www.canon.com.br/"));
    }

    #[test]
    fn existing_links_are_kept_as_is() {
        let fixture = Fixture::new("hp laserjet m404n", "HP");
        let markup = r#"<p>Veja <a href="https://creativecopias.com.br/x">loja</a> e <a href="https://www.hp.com/">HP</a>.</p>"#;
        let body = Body::parse(markup);
        assert_eq!(LinkInjectionPass.apply(body.clone(), &fixture.ctx()), body);
    }

    #[test]
    fn spaced_hosts_and_hrefs_are_joined() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse(
            r#"<p>Acesse www . hp . com agora. Ou <a href="https://blog . creativecopias . com . br/ x">aqui</a>.</p>"#,
        );
        let body = LinkSanitizationPass.apply(body, &fixture.ctx());
        let html = body.render();
        assert!(html.contains("www.hp.com agora"), "{html}");
        assert!(html.contains(r#"href="https://blog.creativecopias.com.br/x""#), "{html}");
    }

    #[test]
    fn sentence_breaks_before_capitalized_words_survive() {
        assert_eq!(
            LinkSanitizationPass::sanitize("Fim da frase. Com certeza volta."),
            "Fim da frase. Com certeza volta."
        );
    }
}
