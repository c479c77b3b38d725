// src/domain/article/body.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::text::{
    Sentence, collapse_whitespace, contains_ci, count_ci, split_sentences,
    static_regex, visible_text,
};

static BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    static_regex(
        r"(?is)<p\b[^>]*>(?P<p>.*?)</p\s*>|<h(?P<level>[1-6])\b[^>]*>(?P<h>.*?)</h[1-6]\s*>|<(?P<kind>ul|ol)\b[^>]*>(?P<list>.*?)</(?:ul|ol)\s*>",
    )
});
static ITEM_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"(?is)<li\b[^>]*>(.*?)</li\s*>"));
static HREF_RE: Lazy<Regex> = Lazy::new(|| static_regex(r#"(?i)href\s*=\s*"([^"]*)""#));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Paragraph(String),
    Heading { level: u8, text: String },
    List { ordered: bool, items: Vec<String> },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(text.into())
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn list(items: Vec<String>) -> Self {
        Self::List {
            ordered: false,
            items,
        }
    }

    pub fn visible_text(&self) -> String {
        match self {
            Self::Paragraph(text) | Self::Heading { text, .. } => visible_text(text),
            Self::List { items, .. } => items
                .iter()
                .map(|item| visible_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Paragraph(text) => format!("<p>{text}</p>"),
            Self::Heading { level, text } => format!("<h{level}>{text}</h{level}>"),
            Self::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                let mut out = format!("<{tag}>\n");
                for item in items {
                    out.push_str(&format!("<li>{item}</li>\n"));
                }
                out.push_str(&format!("</{tag}>"));
                out
            }
        }
    }

    fn markup_fragments(&self) -> Vec<&str> {
        match self {
            Self::Paragraph(text) | Self::Heading { text, .. } => vec![text.as_str()],
            Self::List { items, .. } => items.iter().map(String::as_str).collect(),
        }
    }
}

/// Ordered block structure of an article body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Body {
    blocks: Vec<Block>,
}

impl Body {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Reads `<p>`, `<h1>`..`<h6>`, `<ul>`/`<ol>` blocks. Text outside those tags is
    /// read line by line: `#` headings, `-`/`*` list items, and blank-line separated
    /// paragraphs.
    pub fn parse(markup: &str) -> Self {
        let mut blocks = Vec::new();
        let mut cursor = 0;

        for caps in BLOCK_RE.captures_iter(markup) {
            let Some(whole) = caps.get(0) else { continue };
            parse_loose(&markup[cursor..whole.start()], &mut blocks);
            cursor = whole.end();

            if let Some(text) = caps.name("p") {
                push_paragraph(text.as_str(), &mut blocks);
            } else if let Some(text) = caps.name("h") {
                let level = caps
                    .name("level")
                    .and_then(|m| m.as_str().parse::<u8>().ok())
                    .unwrap_or(2);
                let text = collapse_whitespace(text.as_str());
                if !visible_text(&text).is_empty() {
                    blocks.push(Block::heading(level, text));
                }
            } else if let Some(inner) = caps.name("list") {
                let ordered = caps.name("kind").is_some_and(|m| m.as_str().eq_ignore_ascii_case("ol"));
                let items: Vec<String> = ITEM_RE
                    .captures_iter(inner.as_str())
                    .filter_map(|item| item.get(1))
                    .map(|item| collapse_whitespace(item.as_str()))
                    .filter(|item| !visible_text(item).is_empty())
                    .collect();
                if !items.is_empty() {
                    blocks.push(Block::List { ordered, items });
                }
            }
        }
        parse_loose(&markup[cursor..], &mut blocks);

        Self { blocks }
    }

    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(Block::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Tag-free text, one line per block (and per list item).
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::visible_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    pub fn occurrences(&self, phrase: &str) -> usize {
        count_ci(&self.plain_text(), phrase)
    }

    /// Keyphrase occurrences per hundred words.
    pub fn density_percent(&self, phrase: &str) -> f64 {
        let words = self.word_count();
        if words == 0 {
            return 0.0;
        }
        self.occurrences(phrase) as f64 * 100.0 / words as f64
    }

    /// Whether the first `window_chars` of the first paragraph name `phrase`.
    /// Headings and lists never count as the lead.
    pub fn lead_contains(&self, phrase: &str, window_chars: usize) -> bool {
        let Some(first) = self.paragraphs().next() else {
            return false;
        };
        let lead: String = visible_text(first).chars().take(window_chars).collect();
        contains_ci(&lead, phrase)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    pub fn lists(&self) -> impl Iterator<Item = &[String]> {
        self.blocks.iter().filter_map(|block| match block {
            Block::List { items, .. } => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Every `href` value in the body with whitespace removed.
    pub fn link_targets(&self) -> Vec<String> {
        self.blocks
            .iter()
            .flat_map(Block::markup_fragments)
            .flat_map(|fragment| {
                HREF_RE
                    .captures_iter(fragment)
                    .filter_map(|caps| caps.get(1))
                    .map(|m| m.as_str().split_whitespace().collect::<String>())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Sentences of consecutive paragraphs; headings and lists end a run.
    pub fn sentence_runs(&self) -> Vec<Vec<Sentence>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(text) => current.extend(split_sentences(text)),
                _ => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// `(with_transition, eligible)` over every paragraph sentence except the first
    /// sentence of each paragraph.
    pub fn transition_stats(&self, transitions: &[Vec<String>]) -> (usize, usize) {
        let mut with = 0;
        let mut eligible = 0;
        for paragraph in self.paragraphs() {
            for sentence in split_sentences(paragraph).iter().skip(1) {
                eligible += 1;
                if transitions.iter().any(|t| sentence.contains_words(t)) {
                    with += 1;
                }
            }
        }
        (with, eligible)
    }

    /// Longest streak of consecutive sentences sharing the same first word.
    pub fn longest_opener_run(&self) -> usize {
        let mut longest = 0;
        for run in self.sentence_runs() {
            let mut streak = 0;
            let mut previous: Option<String> = None;
            for sentence in &run {
                let opener = sentence.opener();
                if opener.is_some() && opener == previous {
                    streak += 1;
                } else {
                    streak = usize::from(opener.is_some());
                }
                previous = opener;
                longest = longest.max(streak);
            }
        }
        longest
    }
}

fn push_paragraph(text: &str, blocks: &mut Vec<Block>) {
    let text = collapse_whitespace(text);
    if !visible_text(&text).is_empty() {
        blocks.push(Block::Paragraph(text));
    }
}

fn markdown_heading(line: &str) -> Option<Block> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    let level = u8::try_from(hashes).ok()?;
    Some(Block::heading(level, collapse_whitespace(text)))
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        push_paragraph(&lines.join(" "), blocks);
        lines.clear();
    }
}

fn flush_items(items: &mut Vec<String>, blocks: &mut Vec<Block>) {
    if !items.is_empty() {
        blocks.push(Block::list(std::mem::take(items)));
    }
}

fn parse_loose(text: &str, blocks: &mut Vec<Block>) {
    let mut lines: Vec<&str> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush_paragraph(&mut lines, blocks);
            flush_items(&mut items, blocks);
            continue;
        }
        if let Some(heading) = markdown_heading(line) {
            flush_paragraph(&mut lines, blocks);
            flush_items(&mut items, blocks);
            blocks.push(heading);
            continue;
        }
        if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            flush_paragraph(&mut lines, blocks);
            items.push(collapse_whitespace(item));
            continue;
        }
        flush_items(&mut items, blocks);
        lines.push(line);
    }
    flush_paragraph(&mut lines, blocks);
    flush_items(&mut items, blocks);
}
