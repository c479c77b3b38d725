// src/application/validation/mod.rs
pub mod checks;
pub mod report;

use std::sync::Arc;

use crate::domain::article::Article;
use crate::domain::rules::Thresholds;
use crate::domain::vocabulary::Vocabulary;

pub use checks::{CHECKS, CheckContext, CheckId, ConstraintCheck};
pub use report::{CheckResult, ValidationReport};

/// Scores a finished article against the fixed checklist.
pub struct ConstraintValidator {
    vocabulary: Arc<Vocabulary>,
    rules: Thresholds,
}

impl ConstraintValidator {
    pub fn new(vocabulary: Arc<Vocabulary>, rules: Thresholds) -> Self {
        Self { vocabulary, rules }
    }

    pub fn validate(&self, article: &Article) -> ValidationReport {
        let ctx = CheckContext {
            vocabulary: &self.vocabulary,
            rules: &self.rules,
        };
        let results = CHECKS
            .iter()
            .map(|check| {
                let outcome = check.evaluate(article, &ctx);
                CheckResult {
                    id: check.id,
                    description: check.description,
                    passed: outcome.is_ok(),
                    critical: check.critical,
                    message: outcome.err(),
                }
            })
            .collect();
        let report = ValidationReport::from_results(results, self.rules.pass_score);
        tracing::debug!(
            slug = %article.slug,
            score = report.score,
            is_valid = report.is_valid,
            "article validated"
        );
        report
    }
}
