//! Plugin options and the project configuration file.
/// Config file loader
mod loader;
/// Include/exclude file matcher
mod matcher;
/// Configuration types and validation
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_dir,
};
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    NlsOptions,
    ValidationError,
};
