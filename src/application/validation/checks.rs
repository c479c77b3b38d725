// src/application/validation/checks.rs
use std::fmt;

use serde::Serialize;

use crate::application::composers::SlugComposer;
use crate::application::transform::headings::heading_names;
use crate::domain::article::Article;
use crate::domain::article::text::{char_len, contains_ci};
use crate::domain::rules::Thresholds;
use crate::domain::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    FocusKeyphrasePresent,
    TitleLength,
    KeyphraseInTitle,
    MetaLength,
    KeyphraseInMeta,
    KeyphraseInLead,
    MinWordCount,
    InternalLink,
    ExternalLink,
    KeyphraseDensity,
    TransitionRatio,
    NoRepeatedOpeners,
    KeyphraseInHeading,
    KeyphraseInSlug,
    ListItemCount,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FocusKeyphrasePresent => "focus_keyphrase_present",
            Self::TitleLength => "title_length",
            Self::KeyphraseInTitle => "keyphrase_in_title",
            Self::MetaLength => "meta_length",
            Self::KeyphraseInMeta => "keyphrase_in_meta",
            Self::KeyphraseInLead => "keyphrase_in_lead",
            Self::MinWordCount => "min_word_count",
            Self::InternalLink => "internal_link",
            Self::ExternalLink => "external_link",
            Self::KeyphraseDensity => "keyphrase_density",
            Self::TransitionRatio => "transition_ratio",
            Self::NoRepeatedOpeners => "no_repeated_openers",
            Self::KeyphraseInHeading => "keyphrase_in_heading",
            Self::KeyphraseInSlug => "keyphrase_in_slug",
            Self::ListItemCount => "list_item_count",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct CheckContext<'a> {
    pub vocabulary: &'a Vocabulary,
    pub rules: &'a Thresholds,
}

type Predicate = fn(&Article, &CheckContext<'_>) -> Result<(), String>;

pub struct ConstraintCheck {
    pub id: CheckId,
    pub description: &'static str,
    pub critical: bool,
    predicate: Predicate,
}

impl ConstraintCheck {
    const fn new(id: CheckId, description: &'static str, predicate: Predicate) -> Self {
        Self {
            id,
            description,
            critical: false,
            predicate,
        }
    }

    /// A check whose failure rejects the article regardless of score.
    const fn critical(id: CheckId, description: &'static str, predicate: Predicate) -> Self {
        Self {
            id,
            description,
            critical: true,
            predicate,
        }
    }

    pub fn evaluate(&self, article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
        (self.predicate)(article, ctx)
    }
}

fn ensure(ok: bool, message: impl FnOnce() -> String) -> Result<(), String> {
    if ok { Ok(()) } else { Err(message()) }
}

fn phrase(article: &Article) -> &str {
    article.focus_keyphrase.as_str()
}

fn focus_keyphrase_present(article: &Article, _: &CheckContext<'_>) -> Result<(), String> {
    ensure(!article.focus_keyphrase.is_empty(), || {
        "article has no focus keyphrase".to_string()
    })
}

fn title_length(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let len = char_len(&article.title);
    let (min, max) = (ctx.rules.title_min_chars, ctx.rules.title_max_chars);
    ensure((min..=max).contains(&len), || {
        format!("title has {len} characters, expected {min}-{max}")
    })
}

fn keyphrase_in_title(article: &Article, _: &CheckContext<'_>) -> Result<(), String> {
    ensure(contains_ci(&article.title, phrase(article)), || {
        format!("title does not contain \"{}\"", phrase(article))
    })
}

fn meta_length(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let len = char_len(&article.meta_description);
    let (min, max) = (ctx.rules.meta_min_chars, ctx.rules.meta_max_chars);
    ensure((min..=max).contains(&len), || {
        format!("meta description has {len} characters, expected {min}-{max}")
    })
}

fn keyphrase_in_meta(article: &Article, _: &CheckContext<'_>) -> Result<(), String> {
    ensure(contains_ci(&article.meta_description, phrase(article)), || {
        format!("meta description does not contain \"{}\"", phrase(article))
    })
}

fn keyphrase_in_lead(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let window = ctx.rules.lead_window_chars;
    ensure(article.body.lead_contains(phrase(article), window), || {
        format!("keyphrase missing from the first {window} characters")
    })
}

fn min_word_count(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let words = article.body.word_count();
    ensure(words >= ctx.rules.min_words, || {
        format!("body has {words} words, expected at least {}", ctx.rules.min_words)
    })
}

fn internal_link(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let links = &ctx.vocabulary.links;
    let found = article
        .body
        .link_targets()
        .iter()
        .any(|href| links.is_internal(href));
    ensure(found, || "no internal link".to_string())
}

fn external_link(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let links = &ctx.vocabulary.links;
    let found = article
        .body
        .link_targets()
        .iter()
        .any(|href| links.is_external(href));
    ensure(found, || "no external link".to_string())
}

fn keyphrase_density(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let density = article.body.density_percent(phrase(article));
    ensure(ctx.rules.density_in_range(density), || {
        format!(
            "keyphrase density {density:.2}% outside {}%-{}%",
            ctx.rules.density_min_percent, ctx.rules.density_max_percent
        )
    })
}

fn transition_ratio(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let (with, eligible) = article
        .body
        .transition_stats(&ctx.vocabulary.transition_patterns());
    ensure(ctx.rules.transition_ratio_met(with, eligible), || {
        format!(
            "{with} of {eligible} sentences use a transition word, target {:.0}%",
            ctx.rules.transition_ratio * 100.0
        )
    })
}

fn no_repeated_openers(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let run = article.body.longest_opener_run();
    ensure(run < ctx.rules.opener_run, || {
        format!("{run} consecutive sentences start with the same word")
    })
}

fn keyphrase_in_heading(article: &Article, _: &CheckContext<'_>) -> Result<(), String> {
    let phrase = phrase(article);
    let lead = article.focus_keyphrase.lead_token().unwrap_or_default();
    let found = !phrase.is_empty()
        && article
            .body
            .headings()
            .any(|(level, text)| matches!(level, 2 | 3) && heading_names(text, phrase, lead));
    ensure(found, || "no H2/H3 heading mentions the keyphrase".to_string())
}

fn keyphrase_in_slug(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let tokens = SlugComposer::new(ctx.vocabulary, ctx.rules).tokens(phrase(article));
    let expected = tokens.join("-");
    let slug = article.slug.as_str();
    let found = !expected.is_empty()
        && slug
            .split('-')
            .collect::<Vec<_>>()
            .windows(tokens.len())
            .any(|window| window.iter().zip(&tokens).all(|(a, b)| *a == b.as_str()));
    ensure(found, || format!("slug \"{slug}\" does not contain \"{expected}\""))
}

fn list_item_count(article: &Article, ctx: &CheckContext<'_>) -> Result<(), String> {
    let min = ctx.rules.list_min_items;
    let short = article.body.lists().filter(|items| items.len() < min).count();
    ensure(short == 0, || format!("{short} list(s) with fewer than {min} items"))
}

pub const CHECKS: &[ConstraintCheck] = &[
    ConstraintCheck::critical(
        CheckId::FocusKeyphrasePresent,
        "Focus keyphrase is set",
        focus_keyphrase_present,
    ),
    ConstraintCheck::new(CheckId::TitleLength, "Title length within bounds", title_length),
    ConstraintCheck::new(CheckId::KeyphraseInTitle, "Keyphrase in title", keyphrase_in_title),
    ConstraintCheck::new(CheckId::MetaLength, "Meta description length within bounds", meta_length),
    ConstraintCheck::new(CheckId::KeyphraseInMeta, "Keyphrase in meta description", keyphrase_in_meta),
    ConstraintCheck::new(CheckId::KeyphraseInLead, "Keyphrase in the introduction", keyphrase_in_lead),
    ConstraintCheck::new(CheckId::MinWordCount, "Minimum word count", min_word_count),
    ConstraintCheck::new(CheckId::InternalLink, "Internal link present", internal_link),
    ConstraintCheck::new(CheckId::ExternalLink, "External link present", external_link),
    ConstraintCheck::new(CheckId::KeyphraseDensity, "Keyphrase density", keyphrase_density),
    ConstraintCheck::new(CheckId::TransitionRatio, "Transition word ratio", transition_ratio),
    ConstraintCheck::new(
        CheckId::NoRepeatedOpeners,
        "No repeated sentence openers",
        no_repeated_openers,
    ),
    ConstraintCheck::new(CheckId::KeyphraseInHeading, "Keyphrase in a subheading", keyphrase_in_heading),
    ConstraintCheck::new(CheckId::KeyphraseInSlug, "Keyphrase in slug", keyphrase_in_slug),
    ConstraintCheck::new(CheckId::ListItemCount, "Lists have enough items", list_item_count),
];
