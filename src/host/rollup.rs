use crate::error::NlsError;
use crate::sourcemap::SourceMap;

/// Plugin ordering relative to the host's core plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforce {
    Pre,
    Post,
}

/// Value returned from a `transform` hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub code: String,
    pub map: Option<SourceMap>,
}

/// A plugin for a single-pass bundler.
///
/// Hooks returning `Ok(None)` defer to the next plugin or the host default.
pub trait BundlerPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn enforce(&self) -> Option<Enforce> {
        None
    }

    /// Provides module source for `id` instead of reading the file system.
    fn load(&self, _id: &str) -> Result<Option<String>, NlsError> {
        Ok(None)
    }

    /// Rewrites already loaded module source.
    fn transform(&self, _code: &str, _id: &str) -> Result<Option<TransformResult>, NlsError> {
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// Plugin that only implements the required hook.
    struct Noop;

    impl BundlerPlugin for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }
    }

    #[rstest]
    fn default_hooks_defer_to_host() {
        let plugin = Noop;

        assert_eq!(plugin.name(), "noop");
        assert_eq!(plugin.enforce(), None);
        assert!(plugin.load("/a.js").unwrap().is_none());
        assert!(plugin.transform("code", "/a.js").unwrap().is_none());
    }
}
