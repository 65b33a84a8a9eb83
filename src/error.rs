//! Error types shared by the loader, the adapters and the CLI.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};

/// Errors raised while setting up or running the NLS plugin.
#[derive(Error, Debug)]
pub enum NlsError {
    /// The locale code is not part of the supported set.
    #[error("Unsupported locale '{0}'")]
    UnknownLocale(String),

    /// The locale resource could not be read.
    #[error("Failed to read locale resource {}: {source}", path.display())]
    LocaleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The locale resource is not a `{ path: { key: message } }` JSON object.
    #[error("Failed to parse locale resource {}: {source}", path.display())]
    LocaleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A module intercepted by the incremental adapter could not be read.
    #[error("Failed to read module {}: {source}", path.display())]
    ModuleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rewritten module could not be written to the output directory.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// The locale mapping could not be embedded into the runtime module.
    #[error("Failed to serialize locale mapping: {0}")]
    Serialize(#[from] serde_json::Error),
}
