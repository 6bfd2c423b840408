use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Response language for the cloud API. The wire form is the integer code,
/// the configuration form is the two-letter tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "EN")]
    English,
    #[serde(rename = "BG")]
    Bulgarian,
    #[serde(rename = "CS")]
    Czech,
    #[serde(rename = "DA")]
    Danish,
    #[serde(rename = "DE")]
    German,
    #[serde(rename = "ET")]
    Estonian,
    #[serde(rename = "ES")]
    Spanish,
    #[serde(rename = "FR")]
    French,
    #[serde(rename = "HY")]
    Armenian,
    #[serde(rename = "LV")]
    Latvian,
    #[serde(rename = "LT")]
    Lithuanian,
    #[serde(rename = "HU")]
    Hungarian,
    #[serde(rename = "NL")]
    Dutch,
    #[serde(rename = "NO")]
    Norwegian,
    #[serde(rename = "PL")]
    Polish,
    #[serde(rename = "PT")]
    Portuguese,
    #[serde(rename = "RU")]
    Russian,
    #[serde(rename = "FI")]
    Finnish,
    #[serde(rename = "SV")]
    Swedish,
    #[serde(rename = "IT")]
    Italian,
    #[serde(rename = "UK")]
    Ukrainian,
    #[serde(rename = "TR")]
    Turkish,
    #[serde(rename = "EL")]
    Greek,
    #[serde(rename = "HR")]
    Croatian,
    #[serde(rename = "RO")]
    Romanian,
    #[serde(rename = "SL")]
    Slovenian,
}

impl Language {
    pub const ALL: [Language; 26] = [
        Language::English,
        Language::Bulgarian,
        Language::Czech,
        Language::Danish,
        Language::German,
        Language::Estonian,
        Language::Spanish,
        Language::French,
        Language::Armenian,
        Language::Latvian,
        Language::Lithuanian,
        Language::Hungarian,
        Language::Dutch,
        Language::Norwegian,
        Language::Polish,
        Language::Portuguese,
        Language::Russian,
        Language::Finnish,
        Language::Swedish,
        Language::Italian,
        Language::Ukrainian,
        Language::Turkish,
        Language::Greek,
        Language::Croatian,
        Language::Romanian,
        Language::Slovenian,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Bulgarian => "BG",
            Language::Czech => "CS",
            Language::Danish => "DA",
            Language::German => "DE",
            Language::Estonian => "ET",
            Language::Spanish => "ES",
            Language::French => "FR",
            Language::Armenian => "HY",
            Language::Latvian => "LV",
            Language::Lithuanian => "LT",
            Language::Hungarian => "HU",
            Language::Dutch => "NL",
            Language::Norwegian => "NO",
            Language::Polish => "PL",
            Language::Portuguese => "PT",
            Language::Russian => "RU",
            Language::Finnish => "FI",
            Language::Swedish => "SV",
            Language::Italian => "IT",
            Language::Ukrainian => "UK",
            Language::Turkish => "TR",
            Language::Greek => "EL",
            Language::Croatian => "HR",
            Language::Romanian => "RO",
            Language::Slovenian => "SL",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.tag() == tag)
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s).ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
