//! monaco-editor-nls
//!
//! monaco-editor のバンドル時に `localize(` 呼び出しへモジュールパスを注入し、
//! `nls.js` を選択したロケールの翻訳を埋め込んだランタイムに差し替えるプラグイン

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod locale;
pub mod mapping;
pub mod path;
pub mod plugin;
pub mod rewrite;
pub mod runtime;
pub mod sourcemap;

#[cfg(test)]
mod test_utils;

pub use config::NlsOptions;
pub use error::NlsError;
pub use locale::Locale;
pub use mapping::{
    LocaleMapping,
    MessageRef,
};
pub use plugin::{
    EsbuildNlsPlugin,
    RollupNlsPlugin,
};
