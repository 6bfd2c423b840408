use std::sync::Arc;

use serde_json::json;

use crate::device::MelDevice;
use crate::entity::{Attributes, DeviceInfo, Features, ATTR_STATUS};
use crate::types::{AtwState, Property};
use crate::{Error, Result};

/// Host defaults (110 / 140 F) expressed in Celsius.
pub const DEFAULT_MIN_TEMP: f64 = 43.3;
pub const DEFAULT_MAX_TEMP: f64 = 60.0;

/// Hot-water tank of an air-to-water heat pump.
pub struct AtwWaterHeater {
    device: Arc<MelDevice>,
    unique_id: String,
}

impl AtwWaterHeater {
    pub fn new(device: Arc<MelDevice>) -> Self {
        let unique_id = format!("{}-WH", device.identity().serial);
        Self { device, unique_id }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn device_info(&self) -> DeviceInfo {
        self.device.device_info()
    }

    fn state(&self) -> AtwState {
        self.device
            .snapshot()
            .state
            .as_atw()
            .cloned()
            .unwrap_or_default()
    }

    pub fn supported_features(&self) -> Features {
        Features::TARGET_TEMPERATURE | Features::OPERATION_MODE
    }

    pub fn extra_state_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert(ATTR_STATUS.to_string(), json!(self.state().status));
        attrs
    }

    pub fn current_operation(&self) -> Option<String> {
        self.state().operation_mode
    }

    pub fn operation_list(&self) -> Vec<String> {
        self.state().operation_modes
    }

    pub fn current_temperature(&self) -> Option<f64> {
        self.state().tank_temperature
    }

    pub fn target_temperature(&self) -> Option<f64> {
        self.state().target_tank_temperature
    }

    pub async fn set_temperature(&self, temperature: Option<f64>) -> Result<()> {
        let Some(temperature) = temperature.or_else(|| self.target_temperature()) else {
            return Ok(());
        };
        self.device
            .set(vec![Property::TargetTankTemperature(temperature)])
            .await
    }

    /// Operation modes are device-reported strings; anything the device did
    /// not list is refused.
    pub async fn set_operation_mode(&self, mode: &str) -> Result<()> {
        if !self.operation_list().iter().any(|m| m == mode) {
            return Err(Error::InvalidMode(mode.to_string()));
        }
        self.device
            .set(vec![Property::TankOperationMode(mode.to_string())])
            .await
    }

    pub async fn turn_on(&self) -> Result<()> {
        self.device.set(vec![Property::Power(true)]).await
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.device.set(vec![Property::Power(false)]).await
    }

    pub fn min_temp(&self) -> f64 {
        self.state()
            .target_tank_temperature_min
            .unwrap_or(DEFAULT_MIN_TEMP)
    }

    pub fn max_temp(&self) -> f64 {
        self.state()
            .target_tank_temperature_max
            .unwrap_or(DEFAULT_MAX_TEMP)
    }
}
