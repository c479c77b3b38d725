// src/application/transform/lists.rs
use super::{BodyPass, PassContext};
use crate::domain::article::text::{visible_text, word_count};
use crate::domain::article::{Block, Body};

const ELLIPSIS: &str = "...";

/// Keeps every list between the configured item bounds, with short items.
pub struct ListPass;

impl ListPass {
    fn shorten(item: &str, max_words: usize) -> String {
        if word_count(item) <= max_words {
            return item.to_string();
        }
        let visible = visible_text(item);
        let kept = visible.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ");
        format!("{}{ELLIPSIS}", kept.trim_end_matches([',', ';', ':', '.']))
    }

    fn pad(items: &mut Vec<String>, ctx: &PassContext<'_>) {
        let min = ctx.rules.list_min_items;
        let bank = ctx
            .category()
            .list_items
            .iter()
            .chain(&ctx.vocabulary.default_category.list_items);
        for filler in bank {
            if items.len() >= min {
                break;
            }
            let filler = ctx.fill(filler);
            let key = filler.to_lowercase();
            let present = items
                .iter()
                .any(|item| visible_text(item).to_lowercase() == key);
            if !present {
                items.push(filler);
            }
        }
    }
}

impl BodyPass for ListPass {
    fn name(&self) -> &'static str {
        "list"
    }

    fn apply(&self, body: Body, ctx: &PassContext<'_>) -> Body {
        let max_items = ctx.rules.list_max_items.max(1);
        let max_words = ctx.rules.list_item_max_words;
        let mut blocks = Vec::new();

        for block in body.into_blocks() {
            let Block::List { ordered, items } = block else {
                blocks.push(block);
                continue;
            };
            let items: Vec<String> = items.iter().map(|item| Self::shorten(item, max_words)).collect();
            let mut groups: Vec<Vec<String>> = items.chunks(max_items).map(<[String]>::to_vec).collect();
            if groups.is_empty() {
                groups.push(Vec::new());
            }
            for mut group in groups {
                Self::pad(&mut group, ctx);
                blocks.push(Block::List { ordered, items: group });
            }
        }
        Body::from_blocks(blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Fixture;
    use super::*;

    fn list_lengths(body: &Body) -> Vec<usize> {
        body.lists().map(<[String]>::len).collect()
    }

    #[test]
    fn short_lists_are_padded_from_the_category_bank() {
        let fixture = Fixture::new("hp laserjet m404n", "HP");
        let body = ListPass.apply(Body::parse("<ul><li>Baixo custo por página</li></ul>"), &fixture.ctx());
        let items = body.lists().next().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], "Baixo custo por página");
        assert_eq!(items[1], "Impressão rápida e silenciosa");
        assert_eq!(items[2], "Conectividade com a rede do escritório");
    }

    #[test]
    fn long_lists_are_split_into_chunks() {
        let fixture = Fixture::new("hp", "HP");
        let items: String = (0..8).map(|i| format!("<li>item {i}</li>")).collect();
        let body = ListPass.apply(Body::parse(&format!("<ol>{items}</ol>")), &fixture.ctx());
        assert_eq!(list_lengths(&body), vec![6, 3]);
        assert!(matches!(body.blocks()[1], Block::List { ordered: true, .. }));
    }

    #[test]
    fn wordy_items_are_cut_with_ellipsis() {
        let fixture = Fixture::new("hp", "HP");
        let long = "um dois três quatro cinco seis sete oito nove dez onze doze treze quatorze quinze dezesseis dezessete";
        let body = ListPass.apply(
            Body::parse(&format!("<ul><li>{long}</li><li>b</li><li>c</li></ul>")),
            &fixture.ctx(),
        );
        let first = &body.lists().next().unwrap()[0];
        assert!(first.ends_with("quinze..."), "{first}");
        assert_eq!(word_count(first), 15);
    }

    #[test]
    fn bodies_without_lists_are_unchanged() {
        let fixture = Fixture::new("hp", "HP");
        let body = Body::parse("<p>texto</p>");
        assert_eq!(ListPass.apply(body.clone(), &fixture.ctx()), body);
    }
}
