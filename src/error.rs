use std::fmt;

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Timeout,
    Protocol(String),
    InvalidCredentials,
    InvalidMode(String),
    InvalidSwingMode(String),
    UnknownCode { table: &'static str, code: String },
    UnknownLanguage(String),
    NotReady(Box<Error>),
}

impl Error {
    /// Transport faults, timeouts and unusable payloads. The host treats these
    /// as "cannot connect" rather than a credential problem.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout | Error::Protocol(_) => true,
            Error::NotReady(inner) => inner.is_connectivity(),
            _ => false,
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::NotReady(inner) => inner.http_status(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {e}"),
            Error::Timeout => write!(f, "request timed out"),
            Error::Protocol(msg) => write!(f, "protocol error: {msg}"),
            Error::InvalidCredentials => write!(f, "invalid username or password"),
            Error::InvalidMode(mode) => write!(f, "invalid hvac mode: {mode}"),
            Error::InvalidSwingMode(mode) => write!(f, "invalid swing mode: {mode}"),
            Error::UnknownCode { table, code } => write!(f, "unknown {table} code: {code}"),
            Error::UnknownLanguage(tag) => write!(f, "unknown language: {tag}"),
            Error::NotReady(e) => write!(f, "entry not ready: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::NotReady(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
