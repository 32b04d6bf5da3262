//! Error types

use thiserror::Error;

/// A mapping policy name that is not one of the four recognized options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unrecognized mapping policy '{0}', allowed values are 'drop', 'keep', \
     'flatten_values', or 'flatten_items'"
)]
pub struct UnknownPolicy(pub String);

/// Errors raised around a traversal. The traversal itself never fails.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error(transparent)]
    UnknownPolicy(#[from] UnknownPolicy),

    #[error("invalid JSON input at line {line}: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render leaf: {0}")]
    Render(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
