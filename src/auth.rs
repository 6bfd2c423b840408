use std::fmt;
use std::time::Duration;

use tracing::{debug, error};

use crate::language::Language;
use crate::protocol::{login_message, parse_login_response, DEFAULT_BASE_URL, LOGIN_PATH};
use crate::{Error, Result};

pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub language: Language,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>, language: Language) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            language,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("language", &self.language)
            .finish()
    }
}

pub struct AuthenticatorBuilder {
    base_url: String,
    timeout: Duration,
    http: Option<reqwest::Client>,
}

impl AuthenticatorBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_LOGIN_TIMEOUT,
            http: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reuse the host's pooled client instead of creating a new one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    pub fn build(self) -> Authenticator {
        Authenticator {
            http: self.http.unwrap_or_default(),
            base_url: self.base_url,
            timeout: self.timeout,
        }
    }
}

impl Default for AuthenticatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Exchanges credentials for a MELCloud context key. One request per call,
/// bounded by the configured timeout, never retried.
#[derive(Clone)]
pub struct Authenticator {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Authenticator {
    pub fn builder() -> AuthenticatorBuilder {
        AuthenticatorBuilder::new()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        debug!(url = %url, email = %credentials.email, language = %credentials.language, "logging in");

        let body = login_message(
            &credentials.email,
            &credentials.password,
            credentials.language.code(),
        );

        let result = self.exchange(&url, &body).await;
        match &result {
            Ok(_) => debug!("login succeeded"),
            Err(Error::InvalidCredentials) => error!("MELCloud rejected username/password"),
            Err(e) => error!(error = %e, "login to MELCloud failed"),
        }
        result
    }

    async fn exchange(&self, url: &str, body: &serde_json::Value) -> Result<String> {
        let text = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_login_response(&text)
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
