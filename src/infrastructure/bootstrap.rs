// src/infrastructure/bootstrap.rs
use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result};

use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::application::services::{ArticlePipeline, ContentDeduplicator, UniquenessRegistry};
use crate::application::transform::ContentTransformer;
use crate::config::EngineConfig;
use crate::domain::fingerprint::FingerprintRepository;
use crate::domain::grammar::{GrammarAgreement, NounGenderTable};
use crate::domain::keyphrase::KeyphraseRepository;
use crate::domain::vocabulary::Vocabulary;
use crate::infrastructure::{
    database,
    repositories::{
        InMemoryFingerprintRepository, InMemoryKeyphraseRepository, SqliteFingerprintRepository,
        SqliteKeyphraseRepository,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};

type Stores = (Arc<dyn KeyphraseRepository>, Arc<dyn FingerprintRepository>);

async fn open_stores(config: &EngineConfig) -> Result<Stores> {
    let Some(url) = config.database_url() else {
        tracing::info!("DATABASE_URL not set, using in-memory stores");
        return Ok((
            Arc::new(InMemoryKeyphraseRepository::new()),
            Arc::new(InMemoryFingerprintRepository::new()),
        ));
    };

    let pool = database::init_pool(url)
        .await
        .with_context(|| format!("failed to open database at {url}"))?;
    database::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    let pool = Arc::new(pool);
    tracing::info!("using sqlite stores");

    Ok((
        Arc::new(SqliteKeyphraseRepository::new(Arc::clone(&pool))),
        Arc::new(SqliteFingerprintRepository::new(pool)),
    ))
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read vocabulary from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid vocabulary in {}", path.display()))
}

/// Wires the pipeline with the stores and vocabulary selected by `config`,
/// defaulting to the pt-BR bank.
pub async fn build_pipeline(config: &EngineConfig) -> Result<ArticlePipeline> {
    let vocabulary = match config.vocabulary_path() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading vocabulary");
            load_vocabulary(path)?
        }
        None => Vocabulary::pt_br(),
    };
    build_pipeline_with(config, vocabulary).await
}

pub async fn build_pipeline_with(config: &EngineConfig, vocabulary: Vocabulary) -> Result<ArticlePipeline> {
    let (keyphrases, fingerprints) = open_stores(config).await?;

    let vocabulary = Arc::new(vocabulary);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let grammar: Arc<dyn GrammarAgreement> = Arc::new(NounGenderTable::pt_br());

    let registry = UniquenessRegistry::new(
        keyphrases,
        Arc::clone(&clock),
        Arc::clone(&vocabulary),
        config.store_timeout(),
    );
    let deduplicator = ContentDeduplicator::new(fingerprints, clock, config.store_timeout());

    Ok(ArticlePipeline::new(
        vocabulary,
        config.thresholds(),
        config.selection(),
        registry,
        deduplicator,
        ContentTransformer::standard(),
        slugger,
        grammar,
    ))
}
