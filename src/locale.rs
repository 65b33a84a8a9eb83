//! Supported locales.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::NlsError;

/// Locales with a bundled translation resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "bg")]
    Bg,
    #[serde(rename = "cs")]
    Cs,
    #[serde(rename = "de")]
    De,
    #[serde(rename = "en-gb")]
    EnGb,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "hu")]
    Hu,
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "it")]
    It,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "nl")]
    Nl,
    #[serde(rename = "pl")]
    Pl,
    /// Pseudo-localization.
    #[serde(rename = "ps")]
    Ps,
    #[serde(rename = "pt-br")]
    PtBr,
    #[serde(rename = "ru")]
    Ru,
    #[serde(rename = "tr")]
    Tr,
    #[serde(rename = "uk")]
    Uk,
    #[serde(rename = "zh-hans")]
    ZhHans,
    #[serde(rename = "zh-hant")]
    ZhHant,
}

impl Locale {
    pub const ALL: [Self; 20] = [
        Self::Bg,
        Self::Cs,
        Self::De,
        Self::EnGb,
        Self::Es,
        Self::Fr,
        Self::Hu,
        Self::Id,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Nl,
        Self::Pl,
        Self::Ps,
        Self::PtBr,
        Self::Ru,
        Self::Tr,
        Self::Uk,
        Self::ZhHans,
        Self::ZhHant,
    ];

    /// Language tag used for the resource file name (`locale/<code>.json`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bg => "bg",
            Self::Cs => "cs",
            Self::De => "de",
            Self::EnGb => "en-gb",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Hu => "hu",
            Self::Id => "id",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::Pl => "pl",
            Self::Ps => "ps",
            Self::PtBr => "pt-br",
            Self::Ru => "ru",
            Self::Tr => "tr",
            Self::Uk => "uk",
            Self::ZhHans => "zh-hans",
            Self::ZhHant => "zh-hant",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = NlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == s)
            .ok_or_else(|| NlsError::UnknownLocale(s.to_string()))
    }
}
