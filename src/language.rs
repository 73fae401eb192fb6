//! Target languages supported by the translation feature.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Languages a label can be translated into.
///
/// Serialized as ISO-639-1 codes, which is also how the classifier service
/// expects them on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetLanguage {
    #[default]
    #[serde(rename = "fi")]
    Finnish,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 4] = [
        TargetLanguage::Finnish,
        TargetLanguage::Russian,
        TargetLanguage::French,
        TargetLanguage::Spanish,
    ];

    /// ISO-639-1 code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::Finnish => "fi",
            Self::Russian => "ru",
            Self::French => "fr",
            Self::Spanish => "es",
        }
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Finnish => "Finnish",
            Self::Russian => "Russian",
            Self::French => "French",
            Self::Spanish => "Spanish",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown language code '{0}'")]
pub struct UnknownLanguage(String);

impl FromStr for TargetLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetLanguage::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
