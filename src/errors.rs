use thiserror::Error;

use crate::domain::DomainError;

/// Crate-level errors: domain failures plus settings loading.
#[derive(Error, Debug)]
pub enum CheckTreeError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },
}

pub type CheckTreeResult<T> = Result<T, CheckTreeError>;
