//! Command-line front end: ahead-of-time package rewriting and message lookup.

/// Argument parsing
pub mod args;
/// Package rewriting
pub mod rewrite;

use std::ffi::OsString;

use thiserror::Error;

pub use args::{
    Cli,
    Command,
    LookupArgs,
    Pipeline,
    RewriteArgs,
    SharedArgs,
    USAGE,
    parse,
};
pub use rewrite::{
    RewriteSummary,
    rewrite_package,
};

use crate::config::{
    self,
    ConfigError,
    NlsOptions,
};
use crate::error::NlsError;
use crate::mapping::MessageRef;
use crate::plugin;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    Args(#[from] pico_args::Error),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<OsString>),

    #[error("No locale selected; pass --locale or set \"locale\" in {}", config::CONFIG_FILE_NAME)]
    MissingLocale,

    #[error(transparent)]
    Nls(#[from] NlsError),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Default concurrency: 80% of CPU cores (minimum 1).
#[must_use]
pub fn default_jobs() -> usize {
    (num_cpus::get() * 4 / 5).max(1)
}

/// Merges the configuration file in `--config` with the command-line flags.
///
/// `--locale` wins over the file; a relative `localeDir` is resolved against
/// the configuration directory.
pub fn resolve_options(shared: &SharedArgs) -> Result<NlsOptions, CliError> {
    let from_file = config::load_from_dir(&shared.config_dir).map_err(NlsError::from)?;

    let mut options = match (from_file, shared.locale) {
        (Some(mut options), Some(locale)) => {
            options.locale = locale;
            options
        }
        (Some(options), None) => options,
        (None, Some(locale)) => NlsOptions::new(locale),
        (None, None) => return Err(CliError::MissingLocale),
    };

    if let Some(locale_dir) = &options.locale_dir
        && locale_dir.is_relative()
    {
        options.locale_dir = Some(shared.config_dir.join(locale_dir));
    }

    options
        .validate()
        .map_err(|errors| NlsError::from(ConfigError::ValidationErrors(errors)))?;

    tracing::debug!(locale = %options.locale, "Resolved options");
    Ok(options)
}

/// Resolves one message the way the synthesized runtime would.
///
/// Without `--default` the message key doubles as the fallback.
pub fn lookup(args: &LookupArgs) -> Result<String, CliError> {
    let options = resolve_options(&args.shared)?;
    let mapping = plugin::load_mapping(&options)?;

    let default_message = args.default_message.as_deref().unwrap_or(&args.message_key);
    Ok(mapping.localize(
        &args.path_key,
        &MessageRef::from(args.message_key.as_str()),
        default_message,
        &args.args,
    ))
}
