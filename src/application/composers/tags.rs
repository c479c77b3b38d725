// src/application/composers/tags.rs
use crate::domain::article::FocusKeyphrase;
use crate::domain::article::text::{collapse_whitespace, contains_ci};
use crate::domain::rules::Thresholds;

pub struct TagComposer<'a> {
    rules: &'a Thresholds,
}

impl<'a> TagComposer<'a> {
    pub fn new(rules: &'a Thresholds) -> Self {
        Self { rules }
    }

    pub fn compose(&self, tags: Option<&[String]>, phrase: &FocusKeyphrase) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tag in tags.unwrap_or_default() {
            let tag = collapse_whitespace(tag);
            if tag.is_empty() || out.iter().any(|t| t.to_lowercase() == tag.to_lowercase()) {
                continue;
            }
            out.push(tag);
        }

        if !phrase.is_empty() && !out.iter().any(|t| contains_ci(t, phrase.as_str())) {
            out.insert(0, phrase.as_str().to_string());
        }
        out.truncate(self.rules.max_tags);
        out
    }
}
