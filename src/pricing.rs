// 💸 Pricing - flat base fare plus a per-km rate by vehicle tier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::locations::ParseError;

pub const BASE_FARE: f64 = 40.0;
pub const RATE_PER_KM_ENAVROOM: f64 = 10.0;
pub const RATE_PER_KM_CAR_4_SEATER: f64 = 40.0;
pub const RATE_PER_KM_CAR_6_SEATER: f64 = 60.0;

// ============================================================================
// VEHICLE CLASS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    /// Motorcycle taxi, one passenger
    #[serde(rename = "Enavroom-vroom")]
    Enavroom,

    #[serde(rename = "Car (4-seater)")]
    Car4Seater,

    #[serde(rename = "Car (6-seater)")]
    Car6Seater,
}

/// Service families offered on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleFamily {
    Moto,
    Car,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::Enavroom,
        VehicleClass::Car4Seater,
        VehicleClass::Car6Seater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Enavroom => "Enavroom-vroom",
            VehicleClass::Car4Seater => "Car (4-seater)",
            VehicleClass::Car6Seater => "Car (6-seater)",
        }
    }

    pub fn rate_per_km(&self) -> f64 {
        match self {
            VehicleClass::Enavroom => RATE_PER_KM_ENAVROOM,
            VehicleClass::Car4Seater => RATE_PER_KM_CAR_4_SEATER,
            VehicleClass::Car6Seater => RATE_PER_KM_CAR_6_SEATER,
        }
    }

    pub fn family(&self) -> VehicleFamily {
        match self {
            VehicleClass::Enavroom => VehicleFamily::Moto,
            VehicleClass::Car4Seater | VehicleClass::Car6Seater => VehicleFamily::Car,
        }
    }

    pub fn passengers(&self) -> u8 {
        match self {
            VehicleClass::Enavroom => 1,
            VehicleClass::Car4Seater => 4,
            VehicleClass::Car6Seater => 6,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VehicleClass::Enavroom => "Beat the traffic on a motorcycle ride.",
            VehicleClass::Car4Seater => "Get around town affordably, up to 4 passengers.",
            VehicleClass::Car6Seater => "Roomy and affordable rides for up to six.",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = ParseError;

    /// Accepts the display name or a short alias (moto, car4, car6)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "moto" | "enavroom" => return Ok(VehicleClass::Enavroom),
            "car4" | "car" => return Ok(VehicleClass::Car4Seater),
            "car6" => return Ok(VehicleClass::Car6Seater),
            _ => {}
        }

        VehicleClass::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().to_lowercase() == lower)
            .ok_or_else(|| ParseError::UnknownVehicle(s.to_string()))
    }
}

impl VehicleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleFamily::Moto => "Enavroom-vroom",
            VehicleFamily::Car => "Enacar",
        }
    }

    /// Tiers offered on the map page for this family; the first is preselected
    pub fn options(&self) -> &'static [VehicleClass] {
        match self {
            VehicleFamily::Moto => &[VehicleClass::Enavroom],
            VehicleFamily::Car => &[VehicleClass::Car4Seater, VehicleClass::Car6Seater],
        }
    }

    pub fn default_class(&self) -> VehicleClass {
        self.options()[0]
    }
}

// ============================================================================
// FARE
// ============================================================================

/// Round to two decimal places from the exact stored value.
///
/// Scaling by 100 first would turn 221.845 (stored as 221.84499..) into a
/// tie and round it up; formatting rounds the binary value itself.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// base fare + rate[class] * distance, rounded to centavos
pub fn calculate_cost(vehicle: VehicleClass, distance_km: f64) -> f64 {
    round2(BASE_FARE + vehicle.rate_per_km() * distance_km)
}
