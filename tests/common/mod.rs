#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use melcloud_bridge::{
    AtaState, AtwState, AtwZoneState, DeviceBackend, DeviceDirectory, DeviceIdentity, DeviceKind,
    DeviceMap, DeviceState, Error, Property, Result, UnitInfo,
};
use serde_json::Value;

pub enum FailMode {
    None,
    Connectivity,
    Other,
}

/// In-memory stand-in for a vendor device handle.
pub struct FakeBackend {
    identity: DeviceIdentity,
    state: Mutex<DeviceState>,
    conf: Mutex<Option<Value>>,
    pub writes: Mutex<Vec<Vec<Property>>>,
    pub updates: Mutex<u32>,
    fail_update: Mutex<bool>,
    fail_set: Mutex<FailMode>,
}

impl FakeBackend {
    pub fn new(identity: DeviceIdentity, state: DeviceState) -> Arc<Self> {
        Arc::new(Self {
            identity,
            state: Mutex::new(state),
            conf: Mutex::new(None),
            writes: Mutex::new(Vec::new()),
            updates: Mutex::new(0),
            fail_update: Mutex::new(false),
            fail_set: Mutex::new(FailMode::None),
        })
    }

    pub fn set_state(&self, state: DeviceState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn set_conf(&self, conf: Value) {
        *self.conf.lock().unwrap() = Some(conf);
    }

    pub fn fail_updates(&self, fail: bool) {
        *self.fail_update.lock().unwrap() = fail;
    }

    pub fn fail_sets(&self, mode: FailMode) {
        *self.fail_set.lock().unwrap() = mode;
    }

    pub fn last_write(&self) -> Option<Vec<Property>> {
        self.writes.lock().unwrap().last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl DeviceBackend for FakeBackend {
    fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    async fn update(&self) -> Result<()> {
        *self.updates.lock().unwrap() += 1;
        if *self.fail_update.lock().unwrap() {
            return Err(Error::Timeout);
        }
        Ok(())
    }

    fn state(&self) -> DeviceState {
        self.state.lock().unwrap().clone()
    }

    fn device_conf(&self) -> Option<Value> {
        self.conf.lock().unwrap().clone()
    }

    async fn set(&self, properties: &[Property]) -> Result<()> {
        match *self.fail_set.lock().unwrap() {
            FailMode::Connectivity => return Err(Error::Protocol("connection reset".into())),
            FailMode::Other => return Err(Error::InvalidMode("rejected".into())),
            FailMode::None => {}
        }
        self.writes.lock().unwrap().push(properties.to_vec());
        let mut state = self.state.lock().unwrap();
        if let DeviceState::Ata(ata) = &mut *state {
            for p in properties {
                match p {
                    Property::Power(on) => ata.power = *on,
                    Property::OperationMode(m) => {
                        ata.operation_mode = Some(m.as_vendor_str().to_string())
                    }
                    Property::TargetTemperature(t) => ata.target_temperature = Some(*t),
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

pub fn identity(name: &str, serial: &str) -> DeviceIdentity {
    DeviceIdentity {
        device_id: 1001,
        building_id: 77,
        name: name.to_string(),
        mac: "aa:bb:cc:dd:ee:ff".to_string(),
        serial: serial.to_string(),
        units: Some(vec![
            UnitInfo {
                model: "MSZ-LN25".to_string(),
                serial: "IU-1".to_string(),
            },
            UnitInfo {
                model: "MUZ-LN25".to_string(),
                serial: "OU-1".to_string(),
            },
        ]),
    }
}

pub fn ata_state() -> AtaState {
    AtaState {
        power: true,
        operation_mode: Some("cool".to_string()),
        operation_modes: vec![
            "heat".to_string(),
            "dry".to_string(),
            "cool".to_string(),
            "fan_only".to_string(),
            "heat_cool".to_string(),
        ],
        room_temperature: Some(23.5),
        target_temperature: Some(22.0),
        target_temperature_min: Some(16.0),
        target_temperature_max: Some(31.0),
        temperature_increment: Some(0.5),
        fan_speed: Some("auto".to_string()),
        fan_speeds: vec!["auto".to_string(), "1".to_string(), "2".to_string()],
        vane_vertical: Some("3".to_string()),
        vane_horizontal: Some("split".to_string()),
        vane_vertical_positions: ["auto", "1_up", "2", "3", "4", "5_down", "swing"]
            .map(String::from)
            .to_vec(),
        vane_horizontal_positions: ["auto", "1_left", "2", "3", "4", "5_right", "split", "swing"]
            .map(String::from)
            .to_vec(),
        total_energy_consumed: Some(1234.5),
        has_energy_consumed_meter: true,
    }
}

pub fn atw_state() -> AtwState {
    AtwState {
        power: true,
        status: Some("heat_zones".to_string()),
        operation_mode: Some("auto".to_string()),
        operation_modes: vec!["auto".to_string(), "force_hot_water".to_string()],
        tank_temperature: Some(48.0),
        target_tank_temperature: Some(50.0),
        target_tank_temperature_min: Some(40.0),
        target_tank_temperature_max: Some(60.0),
        outside_temperature: Some(3.5),
        temperature_increment: Some(0.5),
        zones: vec![
            AtwZoneState {
                zone_index: 1,
                name: "Ground floor".to_string(),
                status: Some("heat".to_string()),
                operation_mode: Some("heat".to_string()),
                room_temperature: Some(20.5),
                target_temperature: Some(21.0),
                flow_temperature: Some(35.0),
                return_temperature: Some(30.0),
            },
            AtwZoneState {
                zone_index: 2,
                name: "First floor".to_string(),
                status: Some("idle".to_string()),
                operation_mode: Some("cool".to_string()),
                room_temperature: Some(22.0),
                target_temperature: Some(23.0),
                flow_temperature: None,
                return_temperature: None,
            },
        ],
    }
}

pub fn ata_backend() -> Arc<FakeBackend> {
    FakeBackend::new(identity("Living room", "SER-ATA"), DeviceState::Ata(ata_state()))
}

pub fn atw_backend() -> Arc<FakeBackend> {
    FakeBackend::new(identity("Heat pump", "SER-ATW"), DeviceState::Atw(atw_state()))
}

/// Directory returning a fixed device list, or failing.
pub struct FakeDirectory {
    pub ata: Vec<Arc<FakeBackend>>,
    pub atw: Vec<Arc<FakeBackend>>,
    pub error: Mutex<Option<Error>>,
    pub seen_tokens: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn new(ata: Vec<Arc<FakeBackend>>, atw: Vec<Arc<FakeBackend>>) -> Self {
        Self {
            ata,
            atw,
            error: Mutex::new(None),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn failing(error: Error) -> Self {
        let dir = Self::empty();
        *dir.error.lock().unwrap() = Some(error);
        dir
    }
}

#[async_trait]
impl DeviceDirectory for FakeDirectory {
    async fn get_devices(&self, token: &str) -> Result<DeviceMap> {
        self.seen_tokens.lock().unwrap().push(token.to_string());
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        let mut map = DeviceMap::new();
        map.insert(
            DeviceKind::Ata,
            self.ata.iter().map(|b| b.clone() as Arc<dyn DeviceBackend>).collect(),
        );
        map.insert(
            DeviceKind::Atw,
            self.atw.iter().map(|b| b.clone() as Arc<dyn DeviceBackend>).collect(),
        );
        Ok(map)
    }
}
