use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::auth::Authenticator;
use crate::config::{EntryData, UserInput};
use crate::device::DeviceDirectory;
use crate::{Error, Result};

pub const STEP_USER: &str = "user";
pub const ERROR_INVALID_AUTH: &str = "invalid_auth";
pub const ERROR_CANNOT_CONNECT: &str = "cannot_connect";
pub const ABORT_ALREADY_CONFIGURED: &str = "already_configured";
pub const ABORT_ALREADY_IMPORTED: &str = "already_imported";

const FLOW_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    Form {
        step_id: &'static str,
        errors: BTreeMap<&'static str, &'static str>,
    },
    CreateEntry {
        title: String,
        unique_id: String,
        data: EntryData,
    },
    /// `updated_data` is set when an existing entry should take the new token.
    Abort {
        reason: &'static str,
        updated_data: Option<EntryData>,
    },
}

impl FlowResult {
    fn form(error: Option<&'static str>) -> Self {
        let mut errors = BTreeMap::new();
        if let Some(e) = error {
            errors.insert("base", e);
        }
        FlowResult::Form {
            step_id: STEP_USER,
            errors,
        }
    }
}

/// Map a failed validation onto the form's error key.
pub fn error_key(err: &Error) -> &'static str {
    match err {
        Error::InvalidCredentials => ERROR_INVALID_AUTH,
        e if matches!(e.http_status(), Some(401) | Some(403)) => ERROR_INVALID_AUTH,
        _ => ERROR_CANNOT_CONNECT,
    }
}

/// Setup flow for one account. `configured_ids` are the unique ids (user
/// names) of entries that already exist.
pub struct ConfigFlow<'a> {
    auth: &'a Authenticator,
    directory: &'a dyn DeviceDirectory,
    configured_ids: Vec<String>,
}

impl<'a> ConfigFlow<'a> {
    pub fn new(
        auth: &'a Authenticator,
        directory: &'a dyn DeviceDirectory,
        configured_ids: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            auth,
            directory,
            configured_ids: configured_ids.into_iter().collect(),
        }
    }

    pub async fn step_user(&self, input: Option<UserInput>) -> FlowResult {
        match input {
            None => FlowResult::form(None),
            Some(input) => self.create_client(input).await,
        }
    }

    pub async fn step_import(&self, input: UserInput) -> FlowResult {
        if self.is_configured(&input.username) {
            debug!(username = %input.username, "account already imported");
            return FlowResult::Abort {
                reason: ABORT_ALREADY_IMPORTED,
                updated_data: None,
            };
        }
        self.create_client(input).await
    }

    async fn create_client(&self, input: UserInput) -> FlowResult {
        let token = match tokio::time::timeout(FLOW_TIMEOUT, self.validate(&input)).await {
            Ok(Ok(token)) => token,
            Ok(Err(e)) => {
                warn!(username = %input.username, error = %e, "account validation failed");
                return FlowResult::form(Some(error_key(&e)));
            }
            Err(_) => {
                warn!(username = %input.username, "account validation timed out");
                return FlowResult::form(Some(ERROR_CANNOT_CONNECT));
            }
        };

        let data = EntryData::with_token(token);
        if self.is_configured(&input.username) {
            info!(username = %input.username, "updating token of existing entry");
            return FlowResult::Abort {
                reason: ABORT_ALREADY_CONFIGURED,
                updated_data: Some(data),
            };
        }

        FlowResult::CreateEntry {
            title: input.username.clone(),
            unique_id: input.username,
            data,
        }
    }

    async fn validate(&self, input: &UserInput) -> Result<String> {
        let token = self.auth.login(&input.credentials()).await?;
        self.directory.get_devices(&token).await?;
        Ok(token)
    }

    fn is_configured(&self, username: &str) -> bool {
        self.configured_ids.iter().any(|id| id == username)
    }
}
