use std::sync::Arc;

use crate::device::{DeviceSnapshot, MelDevice};
use crate::entity::{Attributes, DeviceInfo, SensorDeviceClass, StateClass, Unit};
use crate::types::AtwZoneState;

/// Static description of a device-level sensor.
pub struct SensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub unit: Unit,
    pub device_class: SensorDeviceClass,
    pub state_class: StateClass,
    pub enabled_by_default: bool,
    pub value_fn: fn(&DeviceSnapshot) -> Option<f64>,
    /// Decides at setup time whether the sensor is created at all.
    pub enabled: fn(&DeviceSnapshot) -> bool,
}

/// Static description of a per-zone sensor of an air-to-water device.
pub struct ZoneSensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub unit: Unit,
    pub device_class: SensorDeviceClass,
    pub state_class: StateClass,
    pub enabled_by_default: bool,
    pub value_fn: fn(&AtwZoneState) -> Option<f64>,
}

fn always(_: &DeviceSnapshot) -> bool {
    true
}

fn temperature(
    key: &'static str,
    name: &'static str,
    enabled_by_default: bool,
    value_fn: fn(&DeviceSnapshot) -> Option<f64>,
) -> SensorDescription {
    SensorDescription {
        key,
        name,
        icon: "mdi:thermometer",
        unit: Unit::Celsius,
        device_class: SensorDeviceClass::Temperature,
        state_class: StateClass::Measurement,
        enabled_by_default,
        value_fn,
        enabled: always,
    }
}

/// Daily counters only exist on some firmware; the sensor is created when the
/// first snapshot carries the value.
fn daily_energy(
    key: &'static str,
    name: &'static str,
    value_fn: fn(&DeviceSnapshot) -> Option<f64>,
    enabled: fn(&DeviceSnapshot) -> bool,
) -> SensorDescription {
    SensorDescription {
        key,
        name,
        icon: "mdi:lightning-bolt",
        unit: Unit::KilowattHour,
        device_class: SensorDeviceClass::Energy,
        state_class: StateClass::TotalIncreasing,
        enabled_by_default: false,
        value_fn,
        enabled,
    }
}

pub fn ata_sensors() -> Vec<SensorDescription> {
    vec![
        SensorDescription {
            key: "wifi_signal",
            name: "WiFi Signal",
            icon: "mdi:signal",
            unit: Unit::DecibelMilliwatt,
            device_class: SensorDeviceClass::SignalStrength,
            state_class: StateClass::Measurement,
            enabled_by_default: false,
            value_fn: |s| s.conf.wifi_signal_strength.map(|v| v as f64),
            enabled: always,
        },
        temperature("room_temperature", "Room Temperature", false, |s| {
            s.state.as_ata().and_then(|a| a.room_temperature)
        }),
        SensorDescription {
            key: "energy",
            name: "Energy",
            icon: "mdi:factory",
            unit: Unit::KilowattHour,
            device_class: SensorDeviceClass::Energy,
            state_class: StateClass::TotalIncreasing,
            enabled_by_default: false,
            value_fn: |s| s.state.as_ata().and_then(|a| a.total_energy_consumed),
            enabled: |s| s.state.as_ata().is_some_and(|a| a.has_energy_consumed_meter),
        },
    ]
}

pub fn atw_sensors() -> Vec<SensorDescription> {
    vec![
        temperature("outside_temperature", "Outside Temperature", false, |s| {
            s.state.as_atw().and_then(|a| a.outside_temperature)
        }),
        temperature("tank_temperature", "Tank Temperature", true, |s| {
            s.state.as_atw().and_then(|a| a.tank_temperature)
        }),
        daily_energy("daily_heating_energy_consumed", "Daily Heating Energy Consumed", |s| {
            s.conf.daily_heating_energy_consumed
        }, |s| s.conf.daily_heating_energy_consumed.is_some()),
        daily_energy("daily_heating_energy_produced", "Daily Heating Energy Produced", |s| {
            s.conf.daily_heating_energy_produced
        }, |s| s.conf.daily_heating_energy_produced.is_some()),
        daily_energy("daily_cooling_energy_consumed", "Daily Cooling Energy Consumed", |s| {
            s.conf.daily_cooling_energy_consumed
        }, |s| s.conf.daily_cooling_energy_consumed.is_some()),
        daily_energy("daily_cooling_energy_produced", "Daily Cooling Energy Produced", |s| {
            s.conf.daily_cooling_energy_produced
        }, |s| s.conf.daily_cooling_energy_produced.is_some()),
    ]
}

fn zone_temperature(
    key: &'static str,
    name: &'static str,
    value_fn: fn(&AtwZoneState) -> Option<f64>,
) -> ZoneSensorDescription {
    ZoneSensorDescription {
        key,
        name,
        icon: "mdi:thermometer",
        unit: Unit::Celsius,
        device_class: SensorDeviceClass::Temperature,
        state_class: StateClass::Measurement,
        enabled_by_default: false,
        value_fn,
    }
}

pub fn atw_zone_sensors() -> Vec<ZoneSensorDescription> {
    vec![
        zone_temperature("room_temperature", "Room Temperature", |z| z.room_temperature),
        zone_temperature("flow_temperature", "Flow Temperature", |z| z.flow_temperature),
        zone_temperature("return_temperature", "Flow Return Temperature", |z| {
            z.return_temperature
        }),
    ]
}

pub struct DeviceSensor {
    device: Arc<MelDevice>,
    description: SensorDescription,
    unique_id: String,
}

impl DeviceSensor {
    pub fn new(device: Arc<MelDevice>, description: SensorDescription) -> Self {
        let id = device.identity();
        let unique_id = format!("{}-{}-{}", id.serial, id.mac, description.key);
        Self {
            device,
            description,
            unique_id,
        }
    }

    pub fn description(&self) -> &SensorDescription {
        &self.description
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn device_info(&self) -> DeviceInfo {
        self.device.device_info()
    }

    pub fn extra_state_attributes(&self) -> Attributes {
        self.device.extra_attributes()
    }

    pub fn native_value(&self) -> Option<f64> {
        (self.description.value_fn)(&self.device.snapshot())
    }
}

pub struct ZoneSensor {
    device: Arc<MelDevice>,
    description: ZoneSensorDescription,
    zone_index: u8,
    key: String,
    unique_id: String,
    device_info: DeviceInfo,
}

impl ZoneSensor {
    pub fn new(device: Arc<MelDevice>, zone: &AtwZoneState, description: ZoneSensorDescription) -> Self {
        // Zone 1 keeps the bare key so existing unique ids stay stable.
        let key = if zone.zone_index == 1 {
            description.key.to_string()
        } else {
            format!("{}-zone-{}", description.key, zone.zone_index)
        };
        let id = device.identity();
        let unique_id = format!("{}-{}-{}", id.serial, id.mac, key);
        let device_info = device.zone_device_info(zone);
        Self {
            device,
            description,
            zone_index: zone.zone_index,
            key,
            unique_id,
            device_info,
        }
    }

    pub fn description(&self) -> &ZoneSensorDescription {
        &self.description
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn extra_state_attributes(&self) -> Attributes {
        self.device.extra_attributes()
    }

    pub fn native_value(&self) -> Option<f64> {
        let snapshot = self.device.snapshot();
        snapshot
            .state
            .as_atw()
            .and_then(|atw| atw.zone(self.zone_index))
            .and_then(self.description.value_fn)
    }
}
