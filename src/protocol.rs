use serde_json::{json, Value};

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://app.melcloud.com/Mitsubishi.Wifi.Client";
pub const LOGIN_PATH: &str = "/Login/ClientLogin";
pub const APP_VERSION: &str = "1.19.1.1";

pub fn login_message(email: &str, password: &str, language: u8) -> Value {
    json!({
        "Email": email,
        "Password": password,
        "Language": language,
        "AppVersion": APP_VERSION,
        "Persist": true,
        "CaptchaResponse": null
    })
}

/// Extract the context key from a `ClientLogin` response body.
///
/// A present, non-null `ErrorId` is a credential rejection. Everything else
/// that does not carry a context key is treated as a malformed response.
pub fn parse_login_response(body: &str) -> Result<String> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|e| Error::Protocol(format!("login response is not JSON: {e}")))?;

    let error_id = parsed
        .get("ErrorId")
        .ok_or_else(|| Error::Protocol("login response has no ErrorId".to_string()))?;
    if !error_id.is_null() {
        return Err(Error::InvalidCredentials);
    }

    match parsed.pointer("/LoginData/ContextKey").and_then(|v| v.as_str()) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(Error::Protocol(
            "login response has no context key".to_string(),
        )),
    }
}
