use std::path::PathBuf;

/// Errors from hash store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The value or the hash is already bound to something else.
    #[error("hash conflict in {store}: {value:?} -> {hash:?} clashes with existing entry {existing:?}")]
    Conflict {
        store: String,
        value: String,
        hash: String,
        existing: String,
    },

    /// The hash token is empty or contains characters outside `[0-9A-Za-z]`.
    #[error("invalid hash token {0:?}")]
    InvalidHash(String),

    /// Values must be non-empty.
    #[error("cannot hash an empty value")]
    EmptyValue,

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Lock(String),

    /// I/O error while reading configuration.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed.
    #[error("invalid hash store configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
