// src/infrastructure/repositories/error.rs
use crate::domain::errors::DomainError;

const CNT_KEYPHRASE_KEY: &str = "keyphrases.phrase_key";
const CNT_FINGERPRINT_TITLE: &str = "content_fingerprints.title";
const CNT_FINGERPRINT_HASH: &str = "content_fingerprints.fingerprint";

/// SQLite reports unique violations as extended code 2067 (primary key: 1555).
const SQLITE_CONSTRAINT_UNIQUE: &str = "2067";
const SQLITE_CONSTRAINT_PRIMARYKEY: &str = "1555";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message();
            if message.contains(CNT_KEYPHRASE_KEY) {
                return DomainError::Conflict("keyphrase already reserved".into());
            }
            if message.contains(CNT_FINGERPRINT_TITLE) || message.contains(CNT_FINGERPRINT_HASH) {
                return DomainError::Conflict("fingerprint already recorded".into());
            }

            if let Some(code) = db_err.code() {
                if matches!(code.as_ref(), SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY) {
                    return DomainError::Conflict("unique constraint violated".into());
                }
            }

            DomainError::Persistence(message.to_string())
        }
        sqlx::Error::PoolTimedOut => DomainError::Persistence("database pool timed out".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
