use thiserror::Error;

use std::path::PathBuf;

use crate::{generator::InvalidListenerKey, policy::ValidationError};

#[derive(Debug, Error)]
pub enum SnipolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("SnippetsPolicy {namespace}/{name} is invalid: {source}")]
    InvalidPolicy {
        namespace: String,
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error("gateway {gateway} declares listener '{listener}' more than once")]
    DuplicateListener { gateway: String, listener: String },

    #[error("gateway {gateway} has an invalid listener: {source}")]
    InvalidListener {
        gateway: String,
        #[source]
        source: InvalidListenerKey,
    },

    #[error("gateway {gateway} is declared more than once")]
    DuplicateGateway { gateway: String },

    #[error("two artifacts render to the same path: {path}")]
    ArtifactCollision { path: String },
}
