// src/domain/article/entity.rs
use crate::domain::article::body::Body;
use crate::domain::article::value_objects::{ArticleSlug, FocusKeyphrase};
use serde::{Deserialize, Serialize};

/// Raw article as produced by the text generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub subject_name: String,
}

impl ArticleDraft {
    pub fn new(subject_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject_name: subject_name.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_meta_description(mut self, meta: impl Into<String>) -> Self {
        self.meta_description = Some(meta.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub slug: ArticleSlug,
    pub body: Body,
    pub meta_description: String,
    pub tags: Vec<String>,
    pub focus_keyphrase: FocusKeyphrase,
    pub subject_name: String,
}

impl Article {
    /// Tag-free body text.
    pub fn plain_body(&self) -> String {
        self.body.plain_text()
    }
}
