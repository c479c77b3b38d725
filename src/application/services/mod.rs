// src/application/services/mod.rs
pub mod dedup;
pub mod pipeline;
pub mod uniqueness;

pub use dedup::ContentDeduplicator;
pub use pipeline::{ArticleOutcome, ArticlePipeline, BatchItem, BatchReport, ProcessedArticle};
pub use uniqueness::UniquenessRegistry;
