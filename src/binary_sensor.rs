use std::sync::Arc;

use crate::device::{DeviceSnapshot, MelDevice};
use crate::entity::{Attributes, BinarySensorDeviceClass, DeviceInfo};

pub struct BinarySensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub device_class: BinarySensorDeviceClass,
    pub value_fn: fn(&DeviceSnapshot) -> Option<bool>,
    pub enabled: fn(&DeviceSnapshot) -> bool,
}

pub fn ata_binary_sensors() -> Vec<BinarySensorDescription> {
    vec![BinarySensorDescription {
        key: "error_state",
        name: "Error State",
        device_class: BinarySensorDeviceClass::Problem,
        value_fn: |s| s.conf.error_state(),
        enabled: |_| true,
    }]
}

pub struct DeviceBinarySensor {
    device: Arc<MelDevice>,
    description: BinarySensorDescription,
    unique_id: String,
}

impl DeviceBinarySensor {
    pub fn new(device: Arc<MelDevice>, description: BinarySensorDescription) -> Self {
        let id = device.identity();
        let unique_id = format!("{}-{}-{}", id.serial, id.mac, description.key);
        Self {
            device,
            description,
            unique_id,
        }
    }

    pub fn description(&self) -> &BinarySensorDescription {
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

    /// `None` while the device configuration has not been fetched yet.
    pub fn is_on(&self) -> Option<bool> {
        (self.description.value_fn)(&self.device.snapshot())
    }
}
