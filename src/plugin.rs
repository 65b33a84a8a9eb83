//! The two host adapters and their shared setup.
//!
//! Both adapters delegate to the same path normalizer, call-site rewriter and
//! runtime module synthesizer; they differ only in how the host calls them.

use std::path::Path;
use std::sync::Arc;

/// Incremental compiler adapter
mod esbuild;
/// Single-pass bundler adapter
mod rollup;

pub use esbuild::EsbuildNlsPlugin;
pub use rollup::RollupNlsPlugin;

use crate::config::NlsOptions;
use crate::error::NlsError;
use crate::mapping::LocaleMapping;

/// Loads the mapping selected by `options`, from `localeDir` when set.
///
/// Called once per plugin instance; failures halt the build.
pub fn load_mapping(options: &NlsOptions) -> Result<Arc<LocaleMapping>, NlsError> {
    let mapping = match &options.locale_dir {
        Some(dir) => LocaleMapping::load_from_dir(dir, options.locale)?,
        None => LocaleMapping::load(options.locale)?,
    };
    Ok(Arc::new(mapping))
}

/// Reads a module from disk, replacing invalid UTF-8 with U+FFFD.
pub fn read_module(path: &Path) -> Result<String, NlsError> {
    let bytes = std::fs::read(path)
        .map_err(|source| NlsError::ModuleRead { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
}
