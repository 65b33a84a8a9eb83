use std::path::Path;
use std::sync::{
    Arc,
    LazyLock,
};

use regex::Regex;

use crate::config::NlsOptions;
use crate::error::NlsError;
use crate::host::{
    EsbuildPlugin,
    OnLoadOptions,
    OnLoadResult,
    PluginBuild,
};
use crate::mapping::LocaleMapping;
use crate::path::normalize_module_path;
use crate::rewrite::{
    CallToken,
    rewrite_call_sites,
};
use crate::runtime::synthesize_runtime_module;

/// `onLoad` filter for the localization runtime module.
#[allow(clippy::expect_used)]
static RUNTIME_MODULE_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"esm[\\/]vs[\\/]nls\.js$").expect("Invalid runtime module regex pattern")
});

/// `onLoad` filter for editor modules.
#[allow(clippy::expect_used)]
static MODULE_FAMILY_FILTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"monaco-editor[\\/]esm[\\/]vs.+\.js$")
        .expect("Invalid module family regex pattern")
});

/// Extracts the module path (without `.js`) from a filtered path.
#[allow(clippy::expect_used)]
static MODULE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"monaco-editor[\\/]esm[\\/](.+)\.js$")
        .expect("Invalid module path regex pattern")
});

/// Adapter for an incremental compiler, used during development when
/// dependencies are pre-bundled before the single-pass transform can see them.
///
/// Every intercepted module is read from disk and rewritten on each load.
#[derive(Debug, Clone)]
pub struct EsbuildNlsPlugin {
    /// Translations for the selected locale
    mapping: Arc<LocaleMapping>,
}

impl EsbuildNlsPlugin {
    pub const NAME: &'static str = "esbuild-plugin-monaco-editor-nls";

    /// Loads the configured locale; a missing or malformed resource is fatal.
    pub fn new(options: &NlsOptions) -> Result<Self, NlsError> {
        Ok(Self::from_mapping(super::load_mapping(options)?))
    }

    #[must_use]
    pub const fn from_mapping(mapping: Arc<LocaleMapping>) -> Self {
        Self { mapping }
    }

    #[must_use]
    pub fn mapping(&self) -> &LocaleMapping {
        &self.mapping
    }
}

impl EsbuildPlugin for EsbuildNlsPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn setup(&self, build: &mut PluginBuild) {
        let mapping = Arc::clone(&self.mapping);
        build.on_load(OnLoadOptions::new(RUNTIME_MODULE_FILTER.clone()), move |args| {
            tracing::debug!(path = %args.path, "Serving synthesized nls runtime");
            Ok(Some(OnLoadResult::js(synthesize_runtime_module(&mapping)?)))
        });

        let mapping = Arc::clone(&self.mapping);
        build.on_load(OnLoadOptions::new(MODULE_FAMILY_FILTER.clone()), move |args| {
            let contents = localize_module_file(&args.path, &mapping)?;
            Ok(Some(OnLoadResult::js(contents)))
        });
    }
}

/// Reads `path` and injects its module path key into `localize(` calls.
///
/// The call token is not looked for up front; the rewriter leaves the file
/// untouched when the mapping has no entry for the module.
pub fn localize_module_file(path: &str, mapping: &LocaleMapping) -> Result<String, NlsError> {
    let code = super::read_module(Path::new(path))?;

    let Some(module) = MODULE_PATH.captures(path).and_then(|caps| caps.get(1)) else {
        return Ok(code);
    };
    let path_key = normalize_module_path(module.as_str());

    let rewrite = rewrite_call_sites(&code, &path_key, mapping, CallToken::WordBoundary);
    if rewrite.is_changed() {
        tracing::debug!(
            path,
            path_key = %path_key,
            calls = rewrite.insertion_offsets().len(),
            "Localized module"
        );
        return Ok(rewrite.into_code());
    }
    Ok(code)
}
