//! Backend errors.

use thiserror::Error;

/// Backend error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid shard {shard}, only {configured} configured")]
    InvalidShard { shard: usize, configured: usize },

    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
}
