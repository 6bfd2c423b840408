use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::language::Language;

pub const DEFAULT_SCAN_INTERVAL: u64 = 360;
pub const MIN_SCAN_INTERVAL: u64 = 60;
pub const MAX_SCAN_INTERVAL: u64 = 1800;

/// What the user types in the setup form, also the shape of a YAML import.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub username: String,
    pub password: String,
    pub language: Language,
}

impl UserInput {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password, self.language)
    }
}

impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("username", &self.username)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// Persisted entry data. Current entries hold only the token; entries
/// written by older releases hold the credentials instead.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl EntryData {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.token.is_none()
    }

    /// Credentials of a legacy entry, if all of them are stored.
    pub fn legacy_credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(Credentials::new(
                user,
                pass,
                self.language.unwrap_or_default(),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_interval: Option<u64>,
}

impl EntryOptions {
    /// Options as submitted through the options form; out-of-range values are
    /// clamped rather than rejected.
    pub fn from_form(scan_interval: i64) -> Self {
        let clamped = scan_interval.clamp(MIN_SCAN_INTERVAL as i64, MAX_SCAN_INTERVAL as i64);
        Self {
            scan_interval: Some(clamped as u64),
        }
    }

    pub fn scan_interval(&self) -> Duration {
        let secs = self
            .scan_interval
            .unwrap_or(DEFAULT_SCAN_INTERVAL)
            .clamp(MIN_SCAN_INTERVAL, MAX_SCAN_INTERVAL);
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub unique_id: Option<String>,
    pub title: String,
    pub data: EntryData,
    #[serde(default)]
    pub options: EntryOptions,
}
