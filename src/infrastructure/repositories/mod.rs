// src/infrastructure/repositories/mod.rs
pub mod error;
mod memory;
mod sqlite_fingerprint;
mod sqlite_keyphrase;

pub use memory::{InMemoryFingerprintRepository, InMemoryKeyphraseRepository};
pub use sqlite_fingerprint::SqliteFingerprintRepository;
pub use sqlite_keyphrase::SqliteKeyphraseRepository;
