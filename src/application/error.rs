// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("keyphrase registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("fingerprint store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ApplicationError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn registry_unavailable(msg: impl Into<String>) -> Self {
        Self::RegistryUnavailable(msg.into())
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Registry or store outage, as opposed to a problem with one article.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::RegistryUnavailable(_) | Self::StoreUnavailable(_))
    }
}
