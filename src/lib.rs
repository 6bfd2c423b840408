mod auth;
mod error;
mod protocol;

pub mod binary_sensor;
pub mod climate;
pub mod config;
pub mod config_flow;
pub mod device;
pub mod entity;
pub mod language;
pub mod modes;
pub mod sensor;
pub mod setup;
pub mod types;
pub mod water_heater;

pub use auth::{Authenticator, AuthenticatorBuilder, Credentials, DEFAULT_LOGIN_TIMEOUT};
pub use device::{DeviceBackend, DeviceDirectory, DeviceMap, DeviceSnapshot, MelDevice};
pub use error::{Error, Result};
pub use language::Language;
pub use modes::{HvacMode, SwingMode};
pub use setup::{setup_entry, EntryContext};
pub use types::*;
