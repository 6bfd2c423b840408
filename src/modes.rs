//! Translation between MELCloud operation-mode / vane codes and the host's
//! normalized identifiers.
//!
//! Forward lookups (vendor code to host) fail with [`Error::UnknownCode`] on
//! codes outside the table; reverse lookups fail with [`Error::InvalidMode`]
//! when a host mode has no counterpart for the device class. `undefined`
//! vane positions are deliberately absent.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Normalized HVAC mode of the host's climate entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HvacMode {
    Off,
    Heat,
    Cool,
    HeatCool,
    Auto,
    Dry,
    FanOnly,
}

impl HvacMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HvacMode::Off => "off",
            HvacMode::Heat => "heat",
            HvacMode::Cool => "cool",
            HvacMode::HeatCool => "heat_cool",
            HvacMode::Auto => "auto",
            HvacMode::Dry => "dry",
            HvacMode::FanOnly => "fan_only",
        }
    }
}

impl FromStr for HvacMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "off" => Ok(HvacMode::Off),
            "heat" => Ok(HvacMode::Heat),
            "cool" => Ok(HvacMode::Cool),
            "heat_cool" => Ok(HvacMode::HeatCool),
            "auto" => Ok(HvacMode::Auto),
            "dry" => Ok(HvacMode::Dry),
            "fan_only" => Ok(HvacMode::FanOnly),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation mode of an air-to-air unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtaOperationMode {
    Heat,
    Dry,
    Cool,
    FanOnly,
    HeatCool,
}

impl AtaOperationMode {
    pub const ALL: [AtaOperationMode; 5] = [
        AtaOperationMode::Heat,
        AtaOperationMode::Dry,
        AtaOperationMode::Cool,
        AtaOperationMode::FanOnly,
        AtaOperationMode::HeatCool,
    ];

    pub fn as_vendor_str(&self) -> &'static str {
        match self {
            AtaOperationMode::Heat => "heat",
            AtaOperationMode::Dry => "dry",
            AtaOperationMode::Cool => "cool",
            AtaOperationMode::FanOnly => "fan_only",
            AtaOperationMode::HeatCool => "heat_cool",
        }
    }

    pub fn from_vendor_str(s: &str) -> Result<Self> {
        match s {
            "heat" => Ok(AtaOperationMode::Heat),
            "dry" => Ok(AtaOperationMode::Dry),
            "cool" => Ok(AtaOperationMode::Cool),
            "fan_only" => Ok(AtaOperationMode::FanOnly),
            "heat_cool" => Ok(AtaOperationMode::HeatCool),
            _ => Err(unknown("ata operation mode", s)),
        }
    }

    pub fn hvac_mode(&self) -> HvacMode {
        match self {
            AtaOperationMode::Heat => HvacMode::Heat,
            AtaOperationMode::Dry => HvacMode::Dry,
            AtaOperationMode::Cool => HvacMode::Cool,
            AtaOperationMode::FanOnly => HvacMode::FanOnly,
            AtaOperationMode::HeatCool => HvacMode::HeatCool,
        }
    }

    pub fn from_hvac_mode(mode: HvacMode) -> Result<Self> {
        match mode {
            HvacMode::Heat => Ok(AtaOperationMode::Heat),
            HvacMode::Dry => Ok(AtaOperationMode::Dry),
            HvacMode::Cool => Ok(AtaOperationMode::Cool),
            HvacMode::FanOnly => Ok(AtaOperationMode::FanOnly),
            HvacMode::HeatCool => Ok(AtaOperationMode::HeatCool),
            HvacMode::Off | HvacMode::Auto => Err(Error::InvalidMode(mode.to_string())),
        }
    }
}

/// Operation mode of an air-to-water heating zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtwZoneMode {
    Heat,
    Cool,
}

impl AtwZoneMode {
    pub fn as_vendor_str(&self) -> &'static str {
        match self {
            AtwZoneMode::Heat => "heat",
            AtwZoneMode::Cool => "cool",
        }
    }

    pub fn from_vendor_str(s: &str) -> Result<Self> {
        match s {
            "heat" => Ok(AtwZoneMode::Heat),
            "cool" => Ok(AtwZoneMode::Cool),
            _ => Err(unknown("atw zone mode", s)),
        }
    }

    pub fn hvac_mode(&self) -> HvacMode {
        match self {
            AtwZoneMode::Heat => HvacMode::Heat,
            AtwZoneMode::Cool => HvacMode::Cool,
        }
    }

    pub fn from_hvac_mode(mode: HvacMode) -> Result<Self> {
        match mode {
            HvacMode::Heat => Ok(AtwZoneMode::Heat),
            HvacMode::Cool => Ok(AtwZoneMode::Cool),
            _ => Err(Error::InvalidMode(mode.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalVane {
    Auto,
    Top,
    MiddleTop,
    Middle,
    MiddleBottom,
    Bottom,
    Swing,
}

impl VerticalVane {
    pub const ALL: [VerticalVane; 7] = [
        VerticalVane::Auto,
        VerticalVane::Top,
        VerticalVane::MiddleTop,
        VerticalVane::Middle,
        VerticalVane::MiddleBottom,
        VerticalVane::Bottom,
        VerticalVane::Swing,
    ];

    pub fn as_vendor_str(&self) -> &'static str {
        match self {
            VerticalVane::Auto => "auto",
            VerticalVane::Top => "1_up",
            VerticalVane::MiddleTop => "2",
            VerticalVane::Middle => "3",
            VerticalVane::MiddleBottom => "4",
            VerticalVane::Bottom => "5_down",
            VerticalVane::Swing => "swing",
        }
    }

    pub fn from_vendor_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_vendor_str() == s)
            .ok_or_else(|| unknown("vertical vane", s))
    }

    pub fn swing_name(&self) -> &'static str {
        match self {
            VerticalVane::Auto => "VerticalAuto",
            VerticalVane::Top => "VerticalTop",
            VerticalVane::MiddleTop => "VerticalMiddleTop",
            VerticalVane::Middle => "VerticalMiddle",
            VerticalVane::MiddleBottom => "VerticalMiddleBottom",
            VerticalVane::Bottom => "VerticalBottom",
            VerticalVane::Swing => "VerticalSwing",
        }
    }

    pub fn from_swing_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.swing_name() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalVane {
    Auto,
    Left,
    MiddleLeft,
    Middle,
    MiddleRight,
    Right,
    Split,
    Swing,
}

impl HorizontalVane {
    pub const ALL: [HorizontalVane; 8] = [
        HorizontalVane::Auto,
        HorizontalVane::Left,
        HorizontalVane::MiddleLeft,
        HorizontalVane::Middle,
        HorizontalVane::MiddleRight,
        HorizontalVane::Right,
        HorizontalVane::Split,
        HorizontalVane::Swing,
    ];

    pub fn as_vendor_str(&self) -> &'static str {
        match self {
            HorizontalVane::Auto => "auto",
            HorizontalVane::Left => "1_left",
            HorizontalVane::MiddleLeft => "2",
            HorizontalVane::Middle => "3",
            HorizontalVane::MiddleRight => "4",
            HorizontalVane::Right => "5_right",
            HorizontalVane::Split => "split",
            HorizontalVane::Swing => "swing",
        }
    }

    pub fn from_vendor_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_vendor_str() == s)
            .ok_or_else(|| unknown("horizontal vane", s))
    }

    pub fn swing_name(&self) -> &'static str {
        match self {
            HorizontalVane::Auto => "HorizontalAuto",
            HorizontalVane::Left => "HorizontalLeft",
            HorizontalVane::MiddleLeft => "HorizontalMiddleLeft",
            HorizontalVane::Middle => "HorizontalMiddle",
            HorizontalVane::MiddleRight => "HorizontalMiddleRight",
            HorizontalVane::Right => "HorizontalRight",
            HorizontalVane::Split => "HorizontalSplit",
            HorizontalVane::Swing => "HorizontalSwing",
        }
    }

    pub fn from_swing_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.swing_name() == s)
    }
}

/// Swing mode as exposed to the host: one position of either vane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingMode {
    Vertical(VerticalVane),
    Horizontal(HorizontalVane),
}

impl SwingMode {
    /// Reported when the device gives no usable vane position.
    pub const AUTO_SENTINEL: &'static str = "Auto";

    pub fn name(&self) -> &'static str {
        match self {
            SwingMode::Vertical(v) => v.swing_name(),
            SwingMode::Horizontal(h) => h.swing_name(),
        }
    }

    pub fn vendor_code(&self) -> &'static str {
        match self {
            SwingMode::Vertical(v) => v.as_vendor_str(),
            SwingMode::Horizontal(h) => h.as_vendor_str(),
        }
    }
}

impl FromStr for SwingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(v) = VerticalVane::from_swing_name(s) {
            return Ok(SwingMode::Vertical(v));
        }
        HorizontalVane::from_swing_name(s)
            .map(SwingMode::Horizontal)
            .ok_or_else(|| Error::InvalidSwingMode(s.to_string()))
    }
}

fn unknown(table: &'static str, code: &str) -> Error {
    Error::UnknownCode {
        table,
        code: code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ata_modes_round_trip_through_host_modes() {
        for mode in AtaOperationMode::ALL {
            let code = mode.as_vendor_str();
            let host = AtaOperationMode::from_vendor_str(code).unwrap().hvac_mode();
            let back = AtaOperationMode::from_hvac_mode(host).unwrap();
            assert_eq!(back.as_vendor_str(), code);
        }
    }

    #[test]
    fn ata_rejects_off_and_auto() {
        assert!(matches!(
            AtaOperationMode::from_hvac_mode(HvacMode::Off),
            Err(Error::InvalidMode(m)) if m == "off"
        ));
        assert!(AtaOperationMode::from_hvac_mode(HvacMode::Auto).is_err());
    }

    #[test]
    fn atw_zone_supports_heat_and_cool_only() {
        assert_eq!(AtwZoneMode::from_vendor_str("heat").unwrap().hvac_mode(), HvacMode::Heat);
        assert_eq!(AtwZoneMode::from_hvac_mode(HvacMode::Cool).unwrap(), AtwZoneMode::Cool);
        assert!(AtwZoneMode::from_hvac_mode(HvacMode::Dry).is_err());
        assert!(AtwZoneMode::from_vendor_str("curve").is_err());
    }

    #[test]
    fn vane_codes_round_trip() {
        for v in VerticalVane::ALL {
            let swing: SwingMode = v.swing_name().parse().unwrap();
            assert_eq!(swing.vendor_code(), v.as_vendor_str());
            assert_eq!(VerticalVane::from_vendor_str(v.as_vendor_str()).unwrap(), v);
        }
        for h in HorizontalVane::ALL {
            let swing: SwingMode = h.swing_name().parse().unwrap();
            assert_eq!(swing.vendor_code(), h.as_vendor_str());
            assert_eq!(HorizontalVane::from_vendor_str(h.as_vendor_str()).unwrap(), h);
        }
    }

    #[test]
    fn undefined_positions_are_rejected() {
        assert!(matches!(
            VerticalVane::from_vendor_str("undefined"),
            Err(Error::UnknownCode { table: "vertical vane", .. })
        ));
        assert!(HorizontalVane::from_vendor_str("undefined").is_err());
    }

    #[test]
    fn swing_names_pick_the_right_vane() {
        assert_eq!(
            "HorizontalSplit".parse::<SwingMode>().unwrap(),
            SwingMode::Horizontal(HorizontalVane::Split)
        );
        assert_eq!(
            "VerticalSwing".parse::<SwingMode>().unwrap(),
            SwingMode::Vertical(VerticalVane::Swing)
        );
        assert!(matches!(
            SwingMode::AUTO_SENTINEL.parse::<SwingMode>(),
            Err(Error::InvalidSwingMode(_))
        ));
    }

    #[test]
    fn hvac_mode_strings() {
        for s in ["off", "heat", "cool", "heat_cool", "auto", "dry", "fan_only"] {
            assert_eq!(s.parse::<HvacMode>().unwrap().as_str(), s);
        }
        assert!("boost".parse::<HvacMode>().is_err());
    }
}
