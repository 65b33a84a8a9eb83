use std::sync::{
    Arc,
    LazyLock,
};

use regex::Regex;

use crate::config::NlsOptions;
use crate::error::NlsError;
use crate::host::{
    BundlerPlugin,
    Enforce,
    TransformResult,
};
use crate::mapping::LocaleMapping;
use crate::path::normalize_module_path;
use crate::rewrite::{
    CALL_TOKEN,
    CallToken,
    rewrite_call_sites,
};
use crate::runtime::synthesize_runtime_module;
use crate::sourcemap::SourceMap;

/// Path suffixes of the editor's localization runtime module.
const RUNTIME_MODULE_SUFFIXES: [&str; 2] = ["esm/vs/nls.js", r"esm\vs\nls.js"];

/// Editor modules; the capture is the module path without `.js`.
#[allow(clippy::expect_used)]
static MODULE_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"monaco-editor[\\/]esm[\\/](vs.+)\.js$")
        .expect("Invalid module family regex pattern")
});

/// Adapter for a single-pass bundler.
///
/// Serves `nls.js` from the synthesized runtime and, in `transform`, injects
/// module path keys into `localize(` calls with a high-resolution source map.
#[derive(Debug, Clone)]
pub struct RollupNlsPlugin {
    /// Translations for the selected locale
    mapping: Arc<LocaleMapping>,
}

impl RollupNlsPlugin {
    pub const NAME: &'static str = "rollup-plugin-monaco-editor-nls";

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

    /// Whether `id` names the localization runtime module.
    fn is_runtime_module(id: &str) -> bool {
        RUNTIME_MODULE_SUFFIXES.iter().any(|suffix| id.ends_with(suffix))
    }
}

impl BundlerPlugin for RollupNlsPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn enforce(&self) -> Option<Enforce> {
        Some(Enforce::Pre)
    }

    fn load(&self, id: &str) -> Result<Option<String>, NlsError> {
        if !Self::is_runtime_module(id) {
            return Ok(None);
        }

        tracing::debug!(id, "Serving synthesized nls runtime");
        Ok(Some(synthesize_runtime_module(&self.mapping)?))
    }

    fn transform(&self, code: &str, id: &str) -> Result<Option<TransformResult>, NlsError> {
        if Self::is_runtime_module(id) {
            return Ok(None);
        }
        let Some(module) = MODULE_FAMILY.captures(id).and_then(|caps| caps.get(1)) else {
            return Ok(None);
        };
        if !code.contains(CALL_TOKEN) {
            return Ok(None);
        }

        let path_key = normalize_module_path(module.as_str());
        let rewrite = rewrite_call_sites(code, &path_key, &self.mapping, CallToken::Anywhere);
        if rewrite.is_changed() {
            tracing::debug!(
                id,
                path_key = %path_key,
                calls = rewrite.insertion_offsets().len(),
                "Localized module"
            );
        } else {
            tracing::debug!(id, path_key = %path_key, "No translations for module");
        }

        let map = SourceMap::for_rewrite(id, code, &rewrite);
        Ok(Some(TransformResult { code: rewrite.into_code(), map: Some(map) }))
    }
}
