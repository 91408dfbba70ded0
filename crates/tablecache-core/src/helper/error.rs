use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("Restaurant does not exist: {0}")]
    NotFound(u64),

    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error("Invalid review: {0}")]
    InvalidReview(String),

    #[error("Local store error: {0:#}")]
    Store(anyhow::Error),

    #[error("Background task failed: {0}")]
    Background(#[from] tokio::task::JoinError),
}
