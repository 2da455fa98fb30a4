// Enavroom - Core Library
// Ride booking ledger, fares and the page controller used by the CLI and TUI

pub mod locations;
pub mod pricing;
pub mod booking;
pub mod ledger;
pub mod config;
pub mod assets;
pub mod shell;

// Re-export commonly used types
pub use locations::{Location, ParseError, Route, RouteError, RouteTable};
pub use pricing::{
    calculate_cost, round2, VehicleClass, VehicleFamily,
    BASE_FARE, RATE_PER_KM_CAR_4_SEATER, RATE_PER_KM_CAR_6_SEATER, RATE_PER_KM_ENAVROOM,
};
pub use booking::{new_booking_id, Booking, BookingAction, BookingStatus, PaymentMethod};
pub use ledger::{BookingLedger, Quote};
pub use config::Config;
pub use assets::{Assets, MapPreview};
pub use shell::{BookingDraft, Notice, NoticeLevel, Page, Prompt, Shell, Timings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
