// src/domain/article/text.rs
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"<[^>]*>"));
static WS_RE: Lazy<Regex> = Lazy::new(|| static_regex(r"\s+"));

const CLOSERS: &[char] = &['"', '\'', ')', ']', '»', '”', '’'];
const TERMINALS: &[char] = &['.', '!', '?', '…'];

pub(crate) fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

pub fn strip_tags(markup: &str) -> String {
    TAG_RE.replace_all(markup, "").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

/// Tag-free text with whitespace collapsed.
pub fn visible_text(markup: &str) -> String {
    collapse_whitespace(&strip_tags(markup))
}

pub fn word_count(markup: &str) -> usize {
    strip_tags(markup).split_whitespace().count()
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Non-overlapping, case-insensitive occurrences of `needle`.
pub fn count_ci(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let needle = needle.to_lowercase();
    haystack.to_lowercase().matches(needle.as_str()).count()
}

/// Lowercased word with surrounding punctuation removed.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-cases `phrase`, borrowing the casing of matching words in `source`
/// ("hp laserjet" against "HP LaserJet Pro" gives "HP LaserJet").
pub fn display_case(phrase: &str, source: &str) -> String {
    let cased: Vec<&str> = source
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .collect();
    phrase
        .split_whitespace()
        .map(|word| {
            let key = word.to_lowercase();
            cased
                .iter()
                .find(|candidate| candidate.to_lowercase() == key)
                .map_or_else(|| capitalize(word), |candidate| (*candidate).to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Longest whitespace-word prefix of `text` that fits in `max_chars`.
pub fn truncate_words(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for word in text.split_whitespace() {
        let extra = if out.is_empty() { 0 } else { 1 };
        if char_len(&out) + extra + char_len(word) > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Whitespace tokens of a markup fragment. Inline tags are never split,
/// so `<a href="x" target="_blank">site</a>` stays attached to its words.
pub fn tokenize(markup: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;

    for ch in markup.chars() {
        match ch {
            '<' => {
                in_tag = true;
                current.push(ch);
            }
            '>' if in_tag => {
                in_tag = false;
                current.push(ch);
            }
            c if c.is_whitespace() && !in_tag => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn visible_token(token: &str) -> String {
    strip_tags(token).trim().to_string()
}

fn is_terminal(token: &str) -> bool {
    visible_token(token)
        .trim_end_matches(CLOSERS)
        .ends_with(TERMINALS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<String>,
}

impl Sentence {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn parse(markup: &str) -> Self {
        Self::new(tokenize(markup))
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| !visible_token(token).is_empty())
            .count()
    }

    pub fn normalized_words(&self) -> Vec<String> {
        self.tokens
            .iter()
            .map(|token| normalize_word(&strip_tags(token)))
            .filter(|word| !word.is_empty())
            .collect()
    }

    /// First visible word, lowercased.
    pub fn opener(&self) -> Option<String> {
        self.normalized_words().into_iter().next()
    }

    pub fn render(&self) -> String {
        self.tokens.join(" ")
    }

    /// `true` when the words of `phrase` appear contiguously in this sentence.
    pub fn contains_words(&self, phrase: &[String]) -> bool {
        if phrase.is_empty() {
            return false;
        }
        let words = self.normalized_words();
        words
            .windows(phrase.len())
            .any(|window| window.iter().zip(phrase).all(|(a, b)| a == b))
    }

    /// Prepends `prefix` and lowercases what used to be the first word.
    pub fn with_prefix(self, prefix: &str) -> Self {
        let mut tokens = tokenize(prefix);
        let mut rest = self.tokens.into_iter();
        if let Some(first) = rest.next() {
            tokens.push(decapitalize(&first));
        }
        tokens.extend(rest);
        Self::new(tokens)
    }

    /// Ends the sentence with a period, replacing a trailing `,`, `;` or `:`.
    pub fn terminated(mut self) -> Self {
        if let Some(last) = self.tokens.last_mut() {
            if is_terminal(last) {
                return self;
            }
            if last.ends_with([',', ';', ':']) {
                last.pop();
            }
            last.push('.');
        }
        self
    }
}

/// Lowercases the first visible letter unless the word looks like an acronym.
pub fn decapitalize(token: &str) -> String {
    let letters: Vec<char> = strip_tags(token)
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        return token.to_string();
    }

    let mut out = String::with_capacity(token.len());
    let mut in_tag = false;
    let mut done = false;
    for ch in token.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(ch);
                continue;
            }
            _ => {}
        }
        if !done && !in_tag && ch.is_alphabetic() {
            out.extend(ch.to_lowercase());
            done = true;
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn split_sentences(markup: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();
    for token in tokenize(markup) {
        let terminal = is_terminal(&token);
        current.push(token);
        if terminal {
            sentences.push(Sentence::new(std::mem::take(&mut current)));
        }
    }
    if !current.is_empty() {
        sentences.push(Sentence::new(current));
    }
    sentences
}

pub fn join_sentences(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .filter(|sentence| !sentence.is_empty())
        .map(Sentence::render)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a multi-word phrase into normalized words for [`Sentence::contains_words`].
pub fn phrase_words(phrase: &str) -> Vec<String> {
    phrase
        .split_whitespace()
        .map(normalize_word)
        .filter(|word| !word.is_empty())
        .collect()
}
