//! Error classification shared by every layer of the arena.
//!
//! Concrete error enums live next to the code that raises them (the runtime's
//! `ArenaError`, `RepositoryError`, `CacheError`). They all collapse into one of
//! the three kinds below, which decide retry policy and the status a caller sees.

/// Category of a failed arena operation.
///
/// - **InvalidInput**: the request itself is wrong; never retry unchanged
/// - **NotFound**: a referenced combatant does not exist; never retry unchanged
/// - **Unavailable**: store or cache failed or timed out; safe to retry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Unavailable,
}

impl ErrorKind {
    /// Returns true if the caller may retry the same request.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// HTTP-equivalent status: 4xx for application errors, 5xx for infrastructure.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::Unavailable => 503,
        }
    }

    /// Returns true if the failure was caused by the caller.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput | Self::NotFound)
    }
}
