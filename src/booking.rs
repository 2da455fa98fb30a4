// 🧾 Booking record - one ride request
//
// Persisted as a flat JSON object:
//   id, vehicle_type, start, end, distance, cost, payment_method, status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::locations::{Location, ParseError};
use crate::pricing::VehicleClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Cash, PaymentMethod::Wallet];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Wallet => "Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "wallet" => Ok(PaymentMethod::Wallet),
            _ => Err(ParseError::UnknownPayment(s.to_string())),
        }
    }
}

/// What happened to a booking, as written to the text log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Booked,
    Cancelled,
}

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Booked => "BOOKED",
            BookingAction::Cancelled => "CANCELLED",
        }
    }
}

// ============================================================================
// BOOKING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub vehicle_type: VehicleClass,
    pub start: Location,
    pub end: Location,
    pub distance: f64,
    pub cost: f64,
    pub payment_method: PaymentMethod,
    pub status: BookingStatus,
}

/// Short random token: the first 8 hex digits of a v4 UUID
pub fn new_booking_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

impl Booking {
    /// New booking in `booked` state with a fresh id
    pub fn new(
        vehicle_type: VehicleClass,
        start: Location,
        end: Location,
        distance: f64,
        cost: f64,
        payment_method: PaymentMethod,
    ) -> Self {
        Booking {
            id: new_booking_id(),
            vehicle_type,
            start,
            end,
            distance,
            cost,
            payment_method,
            status: BookingStatus::Booked,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Booked
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }

    /// One pipe-delimited line for the append-only text log (no newline)
    pub fn log_line(&self, action: BookingAction) -> String {
        format!(
            "{} | ID: {} | {} | {} → {} | {:.1} km | ₱{:.2} | {} | STATUS: {}",
            action.as_str(),
            self.id,
            self.vehicle_type,
            self.start,
            self.end,
            self.distance,
            self.cost,
            self.payment_method,
            self.status,
        )
    }
}
