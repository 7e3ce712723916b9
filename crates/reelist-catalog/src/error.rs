use thiserror::Error;

/// Generic user-facing message for any transport-level failure.
pub const FETCH_FAILED: &str = "Something went wrong with fetching movies.";

/// Outcome taxonomy for catalog requests.
///
/// `Cancelled` means the request was superseded by a newer one for the
/// same slot; callers must discard it silently, never surface it.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request cancelled")]
    Cancelled,

    #[error("Movie not found.")]
    NotFound,

    #[error("{0}")]
    Transport(String),
}

impl CatalogError {
    pub fn transport() -> Self {
        Self::Transport(FETCH_FAILED.to_string())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
