use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid store reference: {0}")]
    InvalidStoreRef(String),

    #[error("invalid node reference: {0}")]
    InvalidNodeRef(String),
}
