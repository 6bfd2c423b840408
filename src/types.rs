use std::fmt;

use serde::{Deserialize, Serialize};

use crate::modes::{AtaOperationMode, AtwZoneMode, HorizontalVane, VerticalVane};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Ata,
    Atw,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Ata => f.write_str("ata"),
            DeviceKind::Atw => f.write_str("atw"),
        }
    }
}

/// Indoor/outdoor unit as listed by the cloud for a device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitInfo {
    pub model: String,
    pub serial: String,
}

/// Static identity of a device; does not change between polls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceIdentity {
    pub device_id: i64,
    pub building_id: i64,
    pub name: String,
    pub mac: String,
    pub serial: String,
    pub units: Option<Vec<UnitInfo>>,
}

/// Polled state of an air-to-air unit. Mode and vane fields carry the raw
/// vendor codes; translation happens in the entity layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtaState {
    pub power: bool,
    pub operation_mode: Option<String>,
    pub operation_modes: Vec<String>,
    pub room_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub target_temperature_min: Option<f64>,
    pub target_temperature_max: Option<f64>,
    pub temperature_increment: Option<f64>,
    pub fan_speed: Option<String>,
    pub fan_speeds: Vec<String>,
    pub vane_vertical: Option<String>,
    pub vane_horizontal: Option<String>,
    pub vane_vertical_positions: Vec<String>,
    pub vane_horizontal_positions: Vec<String>,
    pub total_energy_consumed: Option<f64>,
    pub has_energy_consumed_meter: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtwZoneState {
    pub zone_index: u8,
    pub name: String,
    pub status: Option<String>,
    pub operation_mode: Option<String>,
    pub room_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub flow_temperature: Option<f64>,
    pub return_temperature: Option<f64>,
}

/// Polled state of an air-to-water heat pump, including its heating zones
/// and hot-water tank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtwState {
    pub power: bool,
    pub status: Option<String>,
    pub operation_mode: Option<String>,
    pub operation_modes: Vec<String>,
    pub tank_temperature: Option<f64>,
    pub target_tank_temperature: Option<f64>,
    pub target_tank_temperature_min: Option<f64>,
    pub target_tank_temperature_max: Option<f64>,
    pub outside_temperature: Option<f64>,
    pub temperature_increment: Option<f64>,
    pub zones: Vec<AtwZoneState>,
}

impl AtwState {
    pub fn zone(&self, zone_index: u8) -> Option<&AtwZoneState> {
        self.zones.iter().find(|z| z.zone_index == zone_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceState {
    Ata(AtaState),
    Atw(AtwState),
}

impl DeviceState {
    pub fn kind(&self) -> DeviceKind {
        match self {
            DeviceState::Ata(_) => DeviceKind::Ata,
            DeviceState::Atw(_) => DeviceKind::Atw,
        }
    }

    pub fn as_ata(&self) -> Option<&AtaState> {
        match self {
            DeviceState::Ata(s) => Some(s),
            DeviceState::Atw(_) => None,
        }
    }

    pub fn as_atw(&self) -> Option<&AtwState> {
        match self {
            DeviceState::Atw(s) => Some(s),
            DeviceState::Ata(_) => None,
        }
    }

    pub fn temperature_increment(&self) -> Option<f64> {
        match self {
            DeviceState::Ata(s) => s.temperature_increment,
            DeviceState::Atw(s) => s.temperature_increment,
        }
    }
}

/// A single typed write handed to the vendor backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Power(bool),
    OperationMode(AtaOperationMode),
    TargetTemperature(f64),
    FanSpeed(String),
    VaneVertical(VerticalVane),
    VaneHorizontal(HorizontalVane),
    ZoneOperationMode { zone_index: u8, mode: AtwZoneMode },
    ZoneTargetTemperature { zone_index: u8, temperature: f64 },
    TankOperationMode(String),
    TargetTankTemperature(f64),
}

impl Property {
    /// Vendor property name, as the cloud API's device set call expects it.
    pub fn key(&self) -> String {
        match self {
            Property::Power(_) => "power".to_string(),
            Property::OperationMode(_) => "operation_mode".to_string(),
            Property::TargetTemperature(_) => "target_temperature".to_string(),
            Property::FanSpeed(_) => "fan_speed".to_string(),
            Property::VaneVertical(_) => "vane_vertical".to_string(),
            Property::VaneHorizontal(_) => "vane_horizontal".to_string(),
            Property::ZoneOperationMode { zone_index, .. } => {
                format!("zone_{zone_index}_operation_mode")
            }
            Property::ZoneTargetTemperature { zone_index, .. } => {
                format!("zone_{zone_index}_target_temperature")
            }
            Property::TankOperationMode(_) => "operation_mode".to_string(),
            Property::TargetTankTemperature(_) => "target_tank_temperature".to_string(),
        }
    }
}
