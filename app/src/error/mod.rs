use sea_orm::DbErr;
use thiserror::Error;

/// Anything that stops a sync pass. No variant is retried; the pass is
/// abandoned and the next scheduled pass starts over.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("storage operation failed: {0}")]
    Storage(#[from] DbErr),
    /// Raised by `BroadcastSource` implementations that are not backed by
    /// HTTP and so have no `reqwest::Error` to report.
    #[error("broadcast source error: {0}")]
    Source(String),
}
