//! Host-side entity vocabulary: platforms, device registry info, sensor
//! classes and feature flags.

use std::collections::BTreeMap;

use serde_json::Value;

pub const DOMAIN: &str = "melcloud_custom";
pub const MANUFACTURER: &str = "Mitsubishi Electric";

pub const ATTR_STATUS: &str = "status";
pub const ATTR_VANE_VERTICAL: &str = "vane_vertical";
pub const ATTR_VANE_HORIZONTAL: &str = "vane_horizontal";

/// Extra state attributes attached to an entity.
pub type Attributes = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    BinarySensor,
    Climate,
    Sensor,
    WaterHeater,
}

pub const PLATFORMS: [Platform; 4] = [
    Platform::BinarySensor,
    Platform::Climate,
    Platform::Sensor,
    Platform::WaterHeater,
];

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::BinarySensor => "binary_sensor",
            Platform::Climate => "climate",
            Platform::Sensor => "sensor",
            Platform::WaterHeater => "water_heater",
        }
    }
}

/// Device registry entry. `identifiers` and `via_device` are scoped to
/// [`DOMAIN`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceInfo {
    pub identifiers: Vec<String>,
    pub mac_connections: Vec<String>,
    pub manufacturer: String,
    pub model: String,
    pub name: String,
    pub via_device: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDeviceClass {
    Temperature,
    Energy,
    SignalStrength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    Measurement,
    TotalIncreasing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySensorDeviceClass {
    Problem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    KilowattHour,
    DecibelMilliwatt,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "\u{00b0}C",
            Unit::KilowattHour => "kWh",
            Unit::DecibelMilliwatt => "dBm",
        }
    }
}

bitflags::bitflags! {
    /// Features a climate or water-heater entity supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Features: u32 {
        const TARGET_TEMPERATURE = 1;
        const OPERATION_MODE = 1 << 1;
        const FAN_MODE = 1 << 3;
        const SWING_MODE = 1 << 5;
    }
}
