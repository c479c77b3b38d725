// src/application/services/pipeline.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::{ContentDeduplicator, UniquenessRegistry};
use crate::application::composers::{MetaComposer, SlugComposer, TagComposer, TitleComposer};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::util::SlugGenerator;
use crate::application::transform::{ContentTransformer, PassContext};
use crate::application::validation::{ConstraintValidator, ValidationReport};
use crate::domain::article::{Article, ArticleDraft, Body};
use crate::domain::grammar::GrammarAgreement;
use crate::domain::keyphrase::KeyphraseExtractor;
use crate::domain::rules::Thresholds;
use crate::domain::selection::SelectionStrategy;
use crate::domain::vocabulary::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOutcome {
    Accepted,
    RejectedDuplicate,
    RejectedCritical,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedArticle {
    pub outcome: ArticleOutcome,
    pub article: Article,
    pub report: ValidationReport,
}

impl ProcessedArticle {
    pub fn is_accepted(&self) -> bool {
        self.outcome == ArticleOutcome::Accepted
    }
}

#[derive(Debug)]
pub enum BatchItem {
    Processed(ProcessedArticle),
    Failed(ApplicationError),
    /// Never started because the batch stopped after an infrastructure failure.
    Skipped,
}

/// Per-draft results in input order.
#[derive(Debug)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
    pub stopped_early: bool,
}

impl BatchReport {
    pub fn accepted(&self) -> impl Iterator<Item = &ProcessedArticle> {
        self.items.iter().filter_map(|item| match item {
            BatchItem::Processed(processed) if processed.is_accepted() => Some(processed),
            _ => None,
        })
    }
}

pub struct ArticlePipeline {
    vocabulary: Arc<Vocabulary>,
    rules: Thresholds,
    selection: SelectionStrategy,
    extractor: KeyphraseExtractor,
    registry: UniquenessRegistry,
    deduplicator: ContentDeduplicator,
    transformer: ContentTransformer,
    validator: ConstraintValidator,
    slugger: Arc<dyn SlugGenerator>,
    grammar: Arc<dyn GrammarAgreement>,
}

impl ArticlePipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        rules: Thresholds,
        selection: SelectionStrategy,
        registry: UniquenessRegistry,
        deduplicator: ContentDeduplicator,
        transformer: ContentTransformer,
        slugger: Arc<dyn SlugGenerator>,
        grammar: Arc<dyn GrammarAgreement>,
    ) -> Self {
        Self {
            extractor: KeyphraseExtractor::new(Arc::clone(&vocabulary)),
            validator: ConstraintValidator::new(Arc::clone(&vocabulary), rules.clone()),
            vocabulary,
            rules,
            selection,
            registry,
            deduplicator,
            transformer,
            slugger,
            grammar,
        }
    }

    pub fn deduplicator(&self) -> &ContentDeduplicator {
        &self.deduplicator
    }

    pub fn registry(&self) -> &UniquenessRegistry {
        &self.registry
    }

    /// Reserves a keyphrase, composes every field, rewrites the body and scores
    /// the result. Nothing is recorded in the fingerprint store.
    pub async fn transform_and_validate(
        &self,
        draft: &ArticleDraft,
    ) -> ApplicationResult<(Article, ValidationReport)> {
        let subject = draft.subject_name.trim();
        let extracted = self.extractor.extract(subject);
        let phrase = self.registry.reserve(&extracted, subject).await?;

        let vocabulary = self.vocabulary.as_ref();
        let title = TitleComposer::new(vocabulary, &self.rules).compose(draft.title.as_deref(), &phrase, subject);
        let raw_body = Body::parse(&draft.body);
        let meta_description = MetaComposer::new(vocabulary, &self.rules).compose(
            draft.meta_description.as_deref(),
            &phrase,
            subject,
            &raw_body,
        );
        let slug_base = if subject.is_empty() { title.as_str() } else { subject };
        let slug = SlugComposer::new(vocabulary, &self.rules).compose(slug_base, &phrase)?;
        let tags = TagComposer::new(&self.rules).compose(draft.tags.as_deref(), &phrase);

        let ctx = PassContext {
            keyphrase: &phrase,
            subject,
            vocabulary,
            rules: &self.rules,
            selection: self.selection,
            slugger: self.slugger.as_ref(),
            grammar: self.grammar.as_ref(),
        };
        let body = self.transformer.transform(raw_body, &ctx);

        let article = Article {
            title,
            slug,
            body,
            meta_description,
            tags,
            focus_keyphrase: phrase,
            subject_name: subject.to_string(),
        };
        let report = self.validator.validate(&article);
        Ok((article, report))
    }

    /// Full lifecycle for one draft. Rejections come back as data; only
    /// registry or store failures are errors.
    pub async fn process(&self, draft: &ArticleDraft) -> ApplicationResult<ProcessedArticle> {
        let (article, report) = self.transform_and_validate(draft).await?;

        let outcome = if report.has_critical_failure() {
            tracing::warn!(
                subject = %article.subject_name,
                violations = ?report.violation_messages(),
                "article rejected by a critical check"
            );
            ArticleOutcome::RejectedCritical
        } else if self.deduplicator.accept(&article).await? {
            tracing::info!(slug = %article.slug, score = report.score, "article accepted");
            ArticleOutcome::Accepted
        } else {
            ArticleOutcome::RejectedDuplicate
        };

        Ok(ProcessedArticle {
            outcome,
            article,
            report,
        })
    }

    /// Processes drafts with at most `concurrency` in flight. After a registry or
    /// store failure no further drafts are started; finished work is kept.
    pub async fn process_batch(self: &Arc<Self>, drafts: Vec<ArticleDraft>, concurrency: usize) -> BatchReport {
        let total = drafts.len();
        let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
        let halted = Arc::new(AtomicBool::new(false));
        let mut tasks = JoinSet::new();

        for (index, draft) in drafts.into_iter().enumerate() {
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            if halted.load(Ordering::SeqCst) {
                break;
            }
            let pipeline = Arc::clone(self);
            let halted = Arc::clone(&halted);
            tasks.spawn(async move {
                let _permit = permit;
                let result = pipeline.process(&draft).await;
                if matches!(&result, Err(err) if err.is_infrastructure()) {
                    halted.store(true, Ordering::SeqCst);
                }
                (index, result)
            });
        }

        let mut items: Vec<BatchItem> = (0..total).map(|_| BatchItem::Skipped).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(processed))) => items[index] = BatchItem::Processed(processed),
                Ok((index, Err(err))) => {
                    tracing::error!(index, error = %err, "draft failed");
                    items[index] = BatchItem::Failed(err);
                }
                Err(err) => tracing::error!(error = %err, "batch task aborted"),
            }
        }

        let stopped_early = halted.load(Ordering::SeqCst)
            && items.iter().any(|item| matches!(item, BatchItem::Skipped));
        if stopped_early {
            tracing::warn!(total, "batch stopped early after an infrastructure failure");
        }
        BatchReport { items, stopped_early }
    }
}
