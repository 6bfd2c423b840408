use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use crate::device::MelDevice;
use crate::entity::{
    Attributes, DeviceInfo, Features, ATTR_STATUS, ATTR_VANE_HORIZONTAL, ATTR_VANE_VERTICAL,
};
use crate::modes::{
    AtaOperationMode, AtwZoneMode, HorizontalVane, HvacMode, SwingMode, VerticalVane,
};
use crate::types::{AtaState, AtwZoneState, Property};
use crate::{Error, Result};

pub const DEFAULT_MIN_TEMP: f64 = 7.0;
pub const DEFAULT_MAX_TEMP: f64 = 35.0;
pub const ATW_ZONE_MIN_TEMP: f64 = 10.0;
pub const ATW_ZONE_MAX_TEMP: f64 = 30.0;

/// Target temperature request; the hvac mode rides along when the host
/// changes both at once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureRequest {
    pub temperature: Option<f64>,
    pub hvac_mode: Option<HvacMode>,
}

fn ata_hvac_mode(state: &AtaState) -> Result<HvacMode> {
    match &state.operation_mode {
        Some(op) if state.power => Ok(AtaOperationMode::from_vendor_str(op)?.hvac_mode()),
        _ => Ok(HvacMode::Off),
    }
}

/// Air-to-air unit as a climate entity.
pub struct AtaClimate {
    device: Arc<MelDevice>,
    name: String,
    unique_id: String,
    support_ver_swing: bool,
    support_hor_swing: bool,
    prefer_hor_swing: AtomicBool,
}

impl AtaClimate {
    pub fn new(device: Arc<MelDevice>) -> Self {
        let snapshot = device.snapshot();
        let (ver, hor) = snapshot
            .state
            .as_ata()
            .map(|s| {
                (
                    !s.vane_vertical_positions.is_empty(),
                    !s.vane_horizontal_positions.is_empty(),
                )
            })
            .unwrap_or((false, false));
        let id = device.identity();
        Self {
            name: id.name.clone(),
            unique_id: format!("{}-{}", id.serial, id.mac),
            support_ver_swing: ver,
            support_hor_swing: hor,
            prefer_hor_swing: AtomicBool::new(hor && !ver),
            device,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn device_info(&self) -> DeviceInfo {
        self.device.device_info()
    }

    fn state(&self) -> AtaState {
        self.device
            .snapshot()
            .state
            .as_ata()
            .cloned()
            .unwrap_or_default()
    }

    pub fn extra_state_attributes(&self) -> Attributes {
        let state = self.state();
        let mut attrs = Attributes::new();
        if let Some(code) = state.vane_horizontal.as_deref() {
            let name = HorizontalVane::from_vendor_str(code).ok().map(|h| h.swing_name());
            attrs.insert(ATTR_VANE_HORIZONTAL.to_string(), json!(name));
        }
        if let Some(code) = state.vane_vertical.as_deref() {
            let name = VerticalVane::from_vendor_str(code).ok().map(|v| v.swing_name());
            attrs.insert(ATTR_VANE_VERTICAL.to_string(), json!(name));
        }
        attrs
    }

    pub fn hvac_mode(&self) -> Result<HvacMode> {
        ata_hvac_mode(&self.state())
    }

    pub fn hvac_modes(&self) -> Result<Vec<HvacMode>> {
        let mut modes = vec![HvacMode::Off];
        for code in &self.state().operation_modes {
            modes.push(AtaOperationMode::from_vendor_str(code)?.hvac_mode());
        }
        Ok(modes)
    }

    fn hvac_mode_properties(&self, mode: HvacMode, props: &mut Vec<Property>) -> Result<()> {
        if mode == HvacMode::Off {
            props.push(Property::Power(false));
            return Ok(());
        }
        let op = AtaOperationMode::from_hvac_mode(mode)?;
        props.push(Property::OperationMode(op));
        if !self.state().power {
            props.push(Property::Power(true));
        }
        Ok(())
    }

    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<()> {
        let mut props = Vec::new();
        self.hvac_mode_properties(mode, &mut props)?;
        self.device.set(props).await
    }

    pub fn current_temperature(&self) -> Option<f64> {
        self.state().room_temperature
    }

    pub fn target_temperature(&self) -> Option<f64> {
        self.state().target_temperature
    }

    pub fn target_temperature_step(&self) -> Option<f64> {
        self.state().temperature_increment
    }

    pub async fn set_temperature(&self, request: TemperatureRequest) -> Result<()> {
        let mut props = Vec::new();
        if let Some(mode) = request.hvac_mode {
            self.hvac_mode_properties(mode, &mut props)?;
        }
        if let Some(temp) = request.temperature {
            props.push(Property::TargetTemperature(temp));
        }
        self.device.set(props).await
    }

    pub fn fan_mode(&self) -> Option<String> {
        self.state().fan_speed
    }

    pub fn fan_modes(&self) -> Vec<String> {
        self.state().fan_speeds
    }

    pub async fn set_fan_mode(&self, fan_mode: &str) -> Result<()> {
        self.device
            .set(vec![Property::FanSpeed(fan_mode.to_string())])
            .await
    }

    /// Current swing mode name, `"Auto"` when no supported vane reports a
    /// known position.
    pub fn swing_mode(&self) -> String {
        let state = self.state();
        let swing = if self.prefer_hor_swing.load(Ordering::Relaxed) && self.support_hor_swing {
            state
                .vane_horizontal
                .as_deref()
                .and_then(|c| HorizontalVane::from_vendor_str(c).ok())
                .map(|h| h.swing_name())
        } else if self.support_ver_swing {
            state
                .vane_vertical
                .as_deref()
                .and_then(|c| VerticalVane::from_vendor_str(c).ok())
                .map(|v| v.swing_name())
        } else {
            None
        };
        swing.unwrap_or(SwingMode::AUTO_SENTINEL).to_string()
    }

    pub fn swing_modes(&self) -> Result<Vec<String>> {
        let state = self.state();
        let mut modes = Vec::new();
        for code in &state.vane_vertical_positions {
            modes.push(VerticalVane::from_vendor_str(code)?.swing_name().to_string());
        }
        for code in &state.vane_horizontal_positions {
            modes.push(HorizontalVane::from_vendor_str(code)?.swing_name().to_string());
        }
        Ok(modes)
    }

    pub async fn set_swing_mode(&self, swing_mode: &str) -> Result<()> {
        let swing: SwingMode = swing_mode.parse()?;
        let state = self.state();
        let code = swing.vendor_code();
        let (current, supported, prop, horizontal) = match swing {
            SwingMode::Vertical(v) => (
                state.vane_vertical,
                state.vane_vertical_positions,
                Property::VaneVertical(v),
                false,
            ),
            SwingMode::Horizontal(h) => (
                state.vane_horizontal,
                state.vane_horizontal_positions,
                Property::VaneHorizontal(h),
                true,
            ),
        };
        if !supported.iter().any(|p| p == code) {
            return Err(Error::InvalidSwingMode(swing_mode.to_string()));
        }

        self.prefer_hor_swing.store(horizontal, Ordering::Relaxed);
        if current.as_deref() == Some(code) {
            debug!(swing_mode, "swing mode unchanged");
            return Ok(());
        }
        self.device.set(vec![prop]).await
    }

    pub async fn turn_on(&self) -> Result<()> {
        self.device.set(vec![Property::Power(true)]).await
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.device.set(vec![Property::Power(false)]).await
    }

    pub fn supported_features(&self) -> Features {
        let mut features = Features::FAN_MODE | Features::TARGET_TEMPERATURE;
        if self.support_ver_swing || self.support_hor_swing {
            features |= Features::SWING_MODE;
        }
        features
    }

    pub fn min_temp(&self) -> f64 {
        self.state().target_temperature_min.unwrap_or(DEFAULT_MIN_TEMP)
    }

    pub fn max_temp(&self) -> f64 {
        self.state().target_temperature_max.unwrap_or(DEFAULT_MAX_TEMP)
    }
}

/// One heating zone of an air-to-water heat pump as a climate entity.
pub struct AtwZoneClimate {
    device: Arc<MelDevice>,
    zone_index: u8,
    name: String,
    unique_id: String,
}

impl AtwZoneClimate {
    pub fn new(device: Arc<MelDevice>, zone: &AtwZoneState) -> Self {
        let id = device.identity();
        Self {
            name: format!("{} {}", id.name, zone.name),
            unique_id: format!("{}-{}", id.serial, zone.zone_index),
            zone_index: zone.zone_index,
            device,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn zone_index(&self) -> u8 {
        self.zone_index
    }

    pub fn device_info(&self) -> DeviceInfo {
        self.device.device_info()
    }

    fn power_and_zone(&self) -> (bool, AtwZoneState) {
        let snapshot = self.device.snapshot();
        match snapshot.state.as_atw() {
            Some(atw) => (
                atw.power,
                atw.zone(self.zone_index).cloned().unwrap_or_default(),
            ),
            None => (false, AtwZoneState::default()),
        }
    }

    /// Zone status translated to an hvac mode name when it is one; other
    /// statuses (idle, unknown) pass through untouched.
    pub fn extra_state_attributes(&self) -> Attributes {
        let (_, zone) = self.power_and_zone();
        let status = zone.status.map(|s| match AtwZoneMode::from_vendor_str(&s) {
            Ok(mode) => mode.hvac_mode().as_str().to_string(),
            Err(_) => s,
        });
        let mut attrs = Attributes::new();
        attrs.insert(ATTR_STATUS.to_string(), json!(status));
        attrs
    }

    pub fn hvac_mode(&self) -> Result<HvacMode> {
        let (power, zone) = self.power_and_zone();
        match zone.operation_mode {
            Some(op) if power => Ok(AtwZoneMode::from_vendor_str(&op)?.hvac_mode()),
            _ => Ok(HvacMode::Off),
        }
    }

    pub fn hvac_modes(&self) -> Result<Vec<HvacMode>> {
        Ok(vec![self.hvac_mode()?])
    }

    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<()> {
        if mode == HvacMode::Off {
            return self.device.set(vec![Property::Power(false)]).await;
        }
        let zone_mode = AtwZoneMode::from_hvac_mode(mode)?;
        let mut props = vec![Property::ZoneOperationMode {
            zone_index: self.zone_index,
            mode: zone_mode,
        }];
        if !self.power_and_zone().0 {
            props.push(Property::Power(true));
        }
        self.device.set(props).await
    }

    pub fn current_temperature(&self) -> Option<f64> {
        self.power_and_zone().1.room_temperature
    }

    pub fn target_temperature(&self) -> Option<f64> {
        self.power_and_zone().1.target_temperature
    }

    pub fn target_temperature_step(&self) -> Option<f64> {
        self.device.snapshot().state.temperature_increment()
    }

    pub async fn set_temperature(&self, temperature: Option<f64>) -> Result<()> {
        let Some(temperature) = temperature.or_else(|| self.target_temperature()) else {
            return Ok(());
        };
        self.device
            .set(vec![Property::ZoneTargetTemperature {
                zone_index: self.zone_index,
                temperature,
            }])
            .await
    }

    pub fn supported_features(&self) -> Features {
        Features::TARGET_TEMPERATURE
    }

    pub fn min_temp(&self) -> f64 {
        ATW_ZONE_MIN_TEMP
    }

    pub fn max_temp(&self) -> f64 {
        ATW_ZONE_MAX_TEMP
    }
}
