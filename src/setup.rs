use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::auth::Authenticator;
use crate::binary_sensor::{ata_binary_sensors, DeviceBinarySensor};
use crate::climate::{AtaClimate, AtwZoneClimate};
use crate::config::{ConfigEntry, EntryData, EntryOptions};
use crate::device::{DeviceDirectory, MelDevice};
use crate::sensor::{
    ata_sensors, atw_sensors, atw_zone_sensors, DeviceSensor, SensorDescription, ZoneSensor,
};
use crate::types::DeviceKind;
use crate::water_heater::AtwWaterHeater;
use crate::{Error, Result};

pub const SETUP_TIMEOUT: Duration = Duration::from_secs(10);

fn not_ready(e: Error) -> Error {
    match e {
        Error::NotReady(_) => e,
        other => Error::NotReady(Box::new(other)),
    }
}

/// Replace the stored credentials of an entry written by an older release
/// with a token.
pub async fn migrate_entry(entry: &mut ConfigEntry, auth: &Authenticator) -> Result<String> {
    let credentials = entry.data.legacy_credentials().ok_or_else(|| {
        not_ready(Error::Protocol(
            "entry has neither token nor credentials".to_string(),
        ))
    })?;
    info!(
        entry = %entry.entry_id,
        username = %credentials.email,
        language = %credentials.language,
        code = credentials.language.code(),
        "migrating entry to token storage"
    );

    let token = match tokio::time::timeout(SETUP_TIMEOUT, auth.login(&credentials)).await {
        Ok(Ok(token)) => token,
        Ok(Err(e)) => return Err(not_ready(e)),
        Err(_) => return Err(not_ready(Error::Timeout)),
    };
    entry.data = EntryData::with_token(token.clone());
    Ok(token)
}

/// Set up one config entry. Any error means "not ready": the host should
/// retry later on its own schedule.
pub async fn setup_entry(
    entry: &mut ConfigEntry,
    auth: &Authenticator,
    directory: &dyn DeviceDirectory,
) -> Result<EntryContext> {
    let token = match entry.data.token.clone() {
        Some(token) => token,
        None => migrate_entry(entry, auth).await?,
    };

    let interval = entry.options.scan_interval();
    info!(entry = %entry.entry_id, seconds = interval.as_secs(), "configured scan interval");

    let found = match tokio::time::timeout(SETUP_TIMEOUT, directory.get_devices(&token)).await {
        Ok(Ok(found)) => found,
        Ok(Err(e)) => return Err(not_ready(e)),
        Err(_) => return Err(not_ready(Error::Timeout)),
    };

    let mut devices = BTreeMap::new();
    for (kind, backends) in found {
        let mut wrapped = Vec::with_capacity(backends.len());
        for backend in backends {
            let device = Arc::new(MelDevice::new(backend, interval));
            if let Err(e) = device.refresh().await {
                warn!(device = %device.name(), error = %e, "initial refresh failed");
            }
            wrapped.push(device);
        }
        devices.insert(kind, wrapped);
    }

    Ok(EntryContext {
        entry_id: entry.entry_id.clone(),
        devices,
    })
}

/// Everything one config entry owns, handed to each platform's entity
/// constructors.
pub struct EntryContext {
    entry_id: String,
    devices: BTreeMap<DeviceKind, Vec<Arc<MelDevice>>>,
}

impl EntryContext {
    pub fn new(entry_id: impl Into<String>, devices: BTreeMap<DeviceKind, Vec<Arc<MelDevice>>>) -> Self {
        Self {
            entry_id: entry_id.into(),
            devices,
        }
    }

    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    pub fn devices(&self, kind: DeviceKind) -> &[Arc<MelDevice>] {
        self.devices.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn all_devices(&self) -> impl Iterator<Item = &Arc<MelDevice>> {
        self.devices.values().flatten()
    }

    /// Push changed options to every device.
    pub fn apply_options(&self, options: &EntryOptions) {
        let interval = options.scan_interval();
        info!(entry = %self.entry_id, seconds = interval.as_secs(), "setting update interval");
        for device in self.all_devices() {
            device.set_update_interval(interval);
        }
    }

    pub fn ata_climates(&self) -> Vec<AtaClimate> {
        self.devices(DeviceKind::Ata)
            .iter()
            .map(|d| AtaClimate::new(d.clone()))
            .collect()
    }

    pub fn atw_zone_climates(&self) -> Vec<AtwZoneClimate> {
        let mut entities = Vec::new();
        for device in self.devices(DeviceKind::Atw) {
            let snapshot = device.snapshot();
            let Some(atw) = snapshot.state.as_atw() else {
                continue;
            };
            for zone in &atw.zones {
                entities.push(AtwZoneClimate::new(device.clone(), zone));
            }
        }
        entities
    }

    pub fn sensors(&self) -> Vec<DeviceSensor> {
        let mut entities = Vec::new();
        let tables: [(DeviceKind, fn() -> Vec<SensorDescription>); 2] =
            [(DeviceKind::Ata, ata_sensors), (DeviceKind::Atw, atw_sensors)];
        for (kind, table) in tables {
            for device in self.devices(kind) {
                let snapshot = device.snapshot();
                for description in table() {
                    if (description.enabled)(&snapshot) {
                        entities.push(DeviceSensor::new(device.clone(), description));
                    }
                }
            }
        }
        entities
    }

    pub fn zone_sensors(&self) -> Vec<ZoneSensor> {
        let mut entities = Vec::new();
        for device in self.devices(DeviceKind::Atw) {
            let snapshot = device.snapshot();
            let Some(atw) = snapshot.state.as_atw() else {
                continue;
            };
            for zone in &atw.zones {
                for description in atw_zone_sensors() {
                    entities.push(ZoneSensor::new(device.clone(), zone, description));
                }
            }
        }
        entities
    }

    pub fn binary_sensors(&self) -> Vec<DeviceBinarySensor> {
        let mut entities = Vec::new();
        for device in self.devices(DeviceKind::Ata) {
            let snapshot = device.snapshot();
            for description in ata_binary_sensors() {
                if (description.enabled)(&snapshot) {
                    entities.push(DeviceBinarySensor::new(device.clone(), description));
                }
            }
        }
        entities
    }

    pub fn water_heaters(&self) -> Vec<AtwWaterHeater> {
        self.devices(DeviceKind::Atw)
            .iter()
            .map(|d| AtwWaterHeater::new(d.clone()))
            .collect()
    }
}
