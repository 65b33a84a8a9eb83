use std::fmt;

use regex::Regex;

use crate::error::NlsError;

/// How the host interprets `contents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Loader {
    #[default]
    Js,
}

/// Filter selecting the paths an `onLoad` callback sees.
#[derive(Debug, Clone)]
pub struct OnLoadOptions {
    pub filter: Regex,
}

impl OnLoadOptions {
    #[must_use]
    pub const fn new(filter: Regex) -> Self {
        Self { filter }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnLoadArgs {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnLoadResult {
    pub contents: String,
    pub loader: Loader,
}

impl OnLoadResult {
    #[must_use]
    pub const fn js(contents: String) -> Self {
        Self { contents, loader: Loader::Js }
    }
}

pub type OnLoadCallback =
    Box<dyn Fn(&OnLoadArgs) -> Result<Option<OnLoadResult>, NlsError> + Send + Sync>;

/// Registry handed to [`EsbuildPlugin::setup`].
///
/// [`PluginBuild::load`] plays the host's part: callbacks whose filter
/// matches run in registration order and the first result wins.
#[derive(Default)]
pub struct PluginBuild {
    /// Registered interceptors, in registration order
    on_load: Vec<(OnLoadOptions, OnLoadCallback)>,
}

impl fmt::Debug for PluginBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters: Vec<_> =
            self.on_load.iter().map(|(options, _)| options.filter.as_str()).collect();
        f.debug_struct("PluginBuild").field("on_load", &filters).finish()
    }
}

impl PluginBuild {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a build with `plugin` already set up.
    #[must_use]
    pub fn with_plugin(plugin: &dyn EsbuildPlugin) -> Self {
        let mut build = Self::new();
        plugin.setup(&mut build);
        build
    }

    pub fn on_load<F>(&mut self, options: OnLoadOptions, callback: F)
    where
        F: Fn(&OnLoadArgs) -> Result<Option<OnLoadResult>, NlsError> + Send + Sync + 'static,
    {
        self.on_load.push((options, Box::new(callback)));
    }

    /// Runs the interceptors for `path`.
    ///
    /// `Ok(None)` means no callback claimed the path and the host would read
    /// it from disk itself.
    pub fn load(&self, path: &str) -> Result<Option<OnLoadResult>, NlsError> {
        let args = OnLoadArgs { path: path.to_string() };
        for (options, callback) in &self.on_load {
            if !options.filter.is_match(path) {
                continue;
            }
            if let Some(result) = callback(&args)? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.on_load.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_load.is_empty()
    }
}

/// A plugin for an incremental, on-demand compiler.
pub trait EsbuildPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn setup(&self, build: &mut PluginBuild);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn options(filter: &str) -> OnLoadOptions {
        OnLoadOptions::new(Regex::new(filter).unwrap())
    }

    #[rstest]
    fn first_matching_result_wins() {
        let mut build = PluginBuild::new();
        build.on_load(options(r"\.js$"), |_| Ok(Some(OnLoadResult::js("first".to_string()))));
        build.on_load(options(r"\.js$"), |_| Ok(Some(OnLoadResult::js("second".to_string()))));

        let result = build.load("/a.js").unwrap().unwrap();

        assert_that!(result.contents, eq("first"));
        assert_eq!(result.loader, Loader::Js);
    }

    #[rstest]
    fn declined_callback_falls_through() {
        let mut build = PluginBuild::new();
        build.on_load(options(r"\.js$"), |_| Ok(None));
        build.on_load(options(r"\.js$"), |args| Ok(Some(OnLoadResult::js(args.path.clone()))));

        let result = build.load("/b.js").unwrap().unwrap();

        assert_that!(result.contents, eq("/b.js"));
    }

    #[rstest]
    fn unmatched_path_is_left_to_host() {
        let mut build = PluginBuild::new();
        build.on_load(options(r"\.js$"), |_| Ok(Some(OnLoadResult::js(String::new()))));

        assert!(build.load("/style.css").unwrap().is_none());
    }

    #[rstest]
    fn callback_errors_propagate() {
        let mut build = PluginBuild::new();
        build.on_load(options("."), |_| Err(NlsError::UnknownLocale("xx".to_string())));

        assert!(matches!(build.load("/a.js"), Err(NlsError::UnknownLocale(_))));
    }

    #[rstest]
    fn debug_lists_filters() {
        let mut build = PluginBuild::new();
        build.on_load(options(r"nls\.js$"), |_| Ok(None));

        assert_that!(format!("{build:?}"), contains_substring("PluginBuild { on_load: [\"nls"));
        assert_that!(build.len(), eq(1));
        assert!(!build.is_empty());
    }
}
