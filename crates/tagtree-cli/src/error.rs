//! CLI error types.

use tagtree::{NodeError, ReaderError};
use tagtree_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tree description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tree: {0}")]
    Node(#[from] NodeError),

    #[error("{0}")]
    Reader(#[from] ReaderError),
}
