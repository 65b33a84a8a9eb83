//! Locale mapping: translated messages keyed by module path, then message key.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::NlsError;
use crate::locale::Locale;
use crate::runtime::format_message;

/// Messages of a single module (message key -> translation).
pub type ModuleMessages = BTreeMap<String, String>;

/// Translations for one locale.
///
/// Immutable once loaded; adapters share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleMapping {
    /// Normalized module path -> messages of that module
    modules: BTreeMap<String, ModuleMessages>,
}

/// Message selector passed as the `data` argument of `localize`.
///
/// Call sites pass either the bare key or an object carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MessageRef {
    Key(String),
    Described {
        key: String,
        #[serde(default)]
        comment: Vec<String>,
    },
}

impl MessageRef {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Key(key) | Self::Described { key, .. } => key,
        }
    }
}

impl From<&str> for MessageRef {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl LocaleMapping {
    /// Parses the resource for `locale` embedded in the binary.
    pub fn load(locale: Locale) -> Result<Self, NlsError> {
        let path = Path::new("locale").join(locale.file_name());
        let mapping = Self::parse(bundled_resource(locale), path)?;

        tracing::debug!(locale = %locale, modules = mapping.len(), "Bundled locale mapping loaded");
        Ok(mapping)
    }

    /// Loads `<dir>/<code>.json`.
    pub fn load_from_dir(dir: &Path, locale: Locale) -> Result<Self, NlsError> {
        let path = dir.join(locale.file_name());
        tracing::debug!(locale = %locale, path = %path.display(), "Loading locale mapping");

        let content = std::fs::read_to_string(&path)
            .map_err(|source| NlsError::LocaleRead { path: path.clone(), source })?;
        let mapping = Self::parse(&content, path)?;

        tracing::debug!(locale = %locale, modules = mapping.len(), "Locale mapping loaded");
        Ok(mapping)
    }

    pub fn from_json_str(json: &str) -> Result<Self, NlsError> {
        Self::parse(json, PathBuf::from("<inline>"))
    }

    /// Parses resource text, tagging failures with `path`.
    fn parse(json: &str, path: PathBuf) -> Result<Self, NlsError> {
        serde_json::from_str(json).map_err(|source| NlsError::LocaleParse { path, source })
    }

    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.modules.contains_key(path)
    }

    #[must_use]
    pub fn message(&self, path: &str, key: &str) -> Option<&str> {
        self.modules.get(path)?.get(key).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Serializes the mapping as a JSON object literal.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Resolves a message the same way the synthesized runtime module does.
    ///
    /// A missing or empty translation falls back to `default_message`, then
    /// `{n}` placeholders are filled from `args`.
    #[must_use]
    pub fn localize<S: AsRef<str>>(
        &self,
        path: &str,
        data: &MessageRef,
        default_message: &str,
        args: &[S],
    ) -> String {
        let message = self
            .message(path, data.key())
            .filter(|message| !message.is_empty())
            .unwrap_or(default_message);
        format_message(message, args)
    }
}

/// `locale/<code>.json`, embedded at compile time.
const fn bundled_resource(locale: Locale) -> &'static str {
    match locale {
        Locale::Bg => include_str!("../locale/bg.json"),
        Locale::Cs => include_str!("../locale/cs.json"),
        Locale::De => include_str!("../locale/de.json"),
        Locale::EnGb => include_str!("../locale/en-gb.json"),
        Locale::Es => include_str!("../locale/es.json"),
        Locale::Fr => include_str!("../locale/fr.json"),
        Locale::Hu => include_str!("../locale/hu.json"),
        Locale::Id => include_str!("../locale/id.json"),
        Locale::It => include_str!("../locale/it.json"),
        Locale::Ja => include_str!("../locale/ja.json"),
        Locale::Ko => include_str!("../locale/ko.json"),
        Locale::Nl => include_str!("../locale/nl.json"),
        Locale::Pl => include_str!("../locale/pl.json"),
        Locale::Ps => include_str!("../locale/ps.json"),
        Locale::PtBr => include_str!("../locale/pt-br.json"),
        Locale::Ru => include_str!("../locale/ru.json"),
        Locale::Tr => include_str!("../locale/tr.json"),
        Locale::Uk => include_str!("../locale/uk.json"),
        Locale::ZhHans => include_str!("../locale/zh-hans.json"),
        Locale::ZhHant => include_str!("../locale/zh-hant.json"),
    }
}
