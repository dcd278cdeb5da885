//! Error types raised by cache implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache lock was poisoned")]
    LockPoisoned,

    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;
