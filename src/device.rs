use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::entity::{Attributes, DeviceInfo, DOMAIN, MANUFACTURER};
use crate::types::{AtwZoneState, DeviceIdentity, DeviceKind, DeviceState, Property};
use crate::Result;

/// Handle to one device owned by the vendor cloud library.
///
/// `update` performs the poll, `state` and `device_conf` read what the last
/// poll (or a local write) left behind. Implementations own session
/// transport and write debouncing.
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    fn identity(&self) -> &DeviceIdentity;

    async fn update(&self) -> Result<()>;

    fn state(&self) -> DeviceState;

    /// Raw device configuration blob; the useful part sits under `Device`.
    fn device_conf(&self) -> Option<Value>;

    async fn set(&self, properties: &[Property]) -> Result<()>;
}

pub type DeviceMap = BTreeMap<DeviceKind, Vec<Arc<dyn DeviceBackend>>>;

/// Lists the devices an account can see.
#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    async fn get_devices(&self, token: &str) -> Result<DeviceMap>;
}

/// Parsed `Device` object of the configuration blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceConf {
    pub wifi_signal_strength: Option<i64>,
    pub has_error: Option<bool>,
    pub has_wide_vane: Option<bool>,
    pub daily_heating_energy_consumed: Option<f64>,
    pub daily_heating_energy_produced: Option<f64>,
    pub daily_cooling_energy_consumed: Option<f64>,
    pub daily_cooling_energy_produced: Option<f64>,
    present: bool,
}

/// Read one key of the `Device` object. A value of the wrong type drops only
/// that key.
fn conf_field<T>(
    device: &Map<String, Value>,
    key: &str,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = device.get(key).filter(|v| !v.is_null())?;
    let parsed = read(value);
    if parsed.is_none() {
        warn!(key, value = %value, "unexpected type in device configuration");
    }
    parsed
}

impl DeviceConf {
    pub fn from_blob(blob: Option<&Value>) -> Self {
        let device = match blob.and_then(|b| b.get("Device")) {
            Some(Value::Object(map)) if !map.is_empty() => map,
            _ => return Self::default(),
        };
        DeviceConf {
            wifi_signal_strength: conf_field(device, "WifiSignalStrength", |v| {
                v.as_f64().map(|f| f.round() as i64)
            }),
            has_error: conf_field(device, "HasError", Value::as_bool),
            has_wide_vane: conf_field(device, "HasWideVane", Value::as_bool),
            daily_heating_energy_consumed: conf_field(
                device,
                "DailyHeatingEnergyConsumed",
                Value::as_f64,
            ),
            daily_heating_energy_produced: conf_field(
                device,
                "DailyHeatingEnergyProduced",
                Value::as_f64,
            ),
            daily_cooling_energy_consumed: conf_field(
                device,
                "DailyCoolingEnergyConsumed",
                Value::as_f64,
            ),
            daily_cooling_energy_produced: conf_field(
                device,
                "DailyCoolingEnergyProduced",
                Value::as_f64,
            ),
            present: true,
        }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// `None` until a configuration blob has been received.
    pub fn error_state(&self) -> Option<bool> {
        self.present.then(|| self.has_error.unwrap_or(false))
    }

    pub fn has_wide_vane(&self) -> bool {
        self.has_wide_vane.unwrap_or(false)
    }
}

/// Everything entities read for one device, captured after each poll and
/// left untouched until the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub state: DeviceState,
    pub conf: DeviceConf,
    pub refreshed_at: DateTime<Utc>,
}

impl DeviceSnapshot {
    pub fn capture(backend: &dyn DeviceBackend) -> Self {
        let blob = backend.device_conf();
        Self {
            state: backend.state(),
            conf: DeviceConf::from_blob(blob.as_ref()),
            refreshed_at: Utc::now(),
        }
    }
}

type UpdateCallback = Arc<dyn Fn(&DeviceSnapshot) + Send + Sync>;

/// A vendor device plus its latest snapshot and polling interval.
pub struct MelDevice {
    backend: Arc<dyn DeviceBackend>,
    snapshot: RwLock<Arc<DeviceSnapshot>>,
    update_interval: RwLock<Duration>,
    listeners: RwLock<Vec<UpdateCallback>>,
}

impl MelDevice {
    pub fn new(backend: Arc<dyn DeviceBackend>, update_interval: Duration) -> Self {
        let snapshot = DeviceSnapshot::capture(backend.as_ref());
        Self {
            backend,
            snapshot: RwLock::new(Arc::new(snapshot)),
            update_interval: RwLock::new(update_interval),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        self.backend.identity()
    }

    pub fn name(&self) -> &str {
        &self.identity().name
    }

    pub fn device_id(&self) -> i64 {
        self.identity().device_id
    }

    pub fn building_id(&self) -> i64 {
        self.identity().building_id
    }

    pub fn snapshot(&self) -> Arc<DeviceSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_interval(&self) -> Duration {
        *self
            .update_interval
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a callback fired whenever a new snapshot is published.
    pub fn on_update(&self, f: impl Fn(&DeviceSnapshot) + Send + Sync + 'static) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(f));
    }

    /// Poll the device. On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<()> {
        if let Err(e) = self.backend.update().await {
            warn!(device = %self.name(), error = %e, "device refresh failed");
            return Err(e);
        }
        self.publish();
        Ok(())
    }

    /// Write properties through the backend. Connectivity failures are
    /// logged and dropped; the next poll shows the real state.
    pub async fn set(&self, properties: Vec<Property>) -> Result<()> {
        if properties.is_empty() {
            return Ok(());
        }
        debug!(device = %self.name(), ?properties, "setting properties");
        match self.backend.set(&properties).await {
            Ok(()) => {}
            Err(e) if e.is_connectivity() => {
                warn!(device = %self.name(), error = %e, "set status failed");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
        self.publish();
        Ok(())
    }

    pub fn set_update_interval(&self, interval: Duration) {
        info!(device = %self.name(), seconds = interval.as_secs(), "setting update interval");
        *self
            .update_interval
            .write()
            .unwrap_or_else(PoisonError::into_inner) = interval;
        let current = self.snapshot();
        self.notify(&current);
    }

    pub fn device_info(&self) -> DeviceInfo {
        let id = self.identity();
        let model = match &id.units {
            Some(units) => units
                .iter()
                .filter(|u| !u.model.is_empty())
                .map(|u| u.model.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            None => "MELCloud IF".to_string(),
        };
        DeviceInfo {
            identifiers: vec![self.registry_id()],
            mac_connections: vec![id.mac.clone()],
            manufacturer: MANUFACTURER.to_string(),
            model,
            name: id.name.clone(),
            via_device: None,
        }
    }

    pub fn zone_device_info(&self, zone: &AtwZoneState) -> DeviceInfo {
        let parent = self.registry_id();
        DeviceInfo {
            identifiers: vec![format!("{parent}-{}", zone.zone_index)],
            mac_connections: Vec::new(),
            manufacturer: MANUFACTURER.to_string(),
            model: "ATW zone device".to_string(),
            name: format!("{} {}", self.name(), zone.name),
            via_device: Some(parent),
        }
    }

    pub fn extra_attributes(&self) -> Attributes {
        let id = self.identity();
        let mut attrs = Attributes::new();
        attrs.insert("device_id".to_string(), json!(id.device_id));
        attrs.insert("device_serial".to_string(), json!(id.serial));
        attrs.insert("device_mac".to_string(), json!(id.mac));

        const UNIT_KEYS: [(&str, &str); 2] =
            [("unit", "unit_serial"), ("ext_unit", "ext_unit_serial")];
        if let Some(units) = &id.units {
            for (unit, (model_key, serial_key)) in units.iter().zip(UNIT_KEYS) {
                attrs.insert(model_key.to_string(), json!(unit.model));
                attrs.insert(serial_key.to_string(), json!(unit.serial));
            }
        }
        attrs
    }

    fn registry_id(&self) -> String {
        let id = self.identity();
        format!("{DOMAIN}:{}-{}", id.mac, id.serial)
    }

    fn publish(&self) {
        let snapshot = Arc::new(DeviceSnapshot::capture(self.backend.as_ref()));
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
        self.notify(&snapshot);
    }

    fn notify(&self, snapshot: &DeviceSnapshot) {
        // Callbacks run without the lock held so they may register others.
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(snapshot);
        }
    }
}
