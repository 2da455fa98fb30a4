// 📒 Booking Ledger - in-memory bookings backed by a JSON file + text log
//
// Every mutation rewrites the whole JSON file (no incremental diff) and
// appends one line to the human-readable log.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::booking::{Booking, BookingAction, PaymentMethod};
use crate::locations::{Location, RouteError, RouteTable};
use crate::pricing::{calculate_cost, VehicleClass};

/// Distance and fare for a trip that has not been booked yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub distance: f64,
    pub cost: f64,
}

pub struct BookingLedger {
    file: PathBuf,
    log_file: PathBuf,
    routes: RouteTable,
    bookings: Vec<Booking>,
}

impl BookingLedger {
    /// Ledger over the standard route table. Call `load()` to read existing bookings.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(file: P, log_file: Q) -> Self {
        Self::with_routes(file, log_file, RouteTable::standard())
    }

    pub fn with_routes<P: AsRef<Path>, Q: AsRef<Path>>(
        file: P,
        log_file: Q,
        routes: RouteTable,
    ) -> Self {
        BookingLedger {
            file: file.as_ref().to_path_buf(),
            log_file: log_file.as_ref().to_path_buf(),
            routes,
            bookings: Vec::new(),
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn find(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Price a trip without touching the ledger
    pub fn quote(
        &self,
        vehicle: VehicleClass,
        start: Location,
        end: Location,
    ) -> Result<Quote, RouteError> {
        let distance = self.routes.checked_distance(start, end)?;
        Ok(Quote {
            distance,
            cost: calculate_cost(vehicle, distance),
        })
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Create a booking. A missing route between distinct points fails with
    /// `RouteError` (downcastable) and leaves the ledger untouched.
    pub fn book(
        &mut self,
        vehicle: VehicleClass,
        start: Location,
        end: Location,
        payment: PaymentMethod,
    ) -> Result<Booking> {
        let quote = match self.quote(vehicle, start, end) {
            Ok(q) => q,
            Err(err) => {
                tracing::warn!(%start, %end, "booking rejected: route not defined");
                return Err(err.into());
            }
        };

        let booking = Booking::new(vehicle, start, end, quote.distance, quote.cost, payment);
        self.bookings.push(booking.clone());
        if let Err(err) = self.save() {
            self.bookings.pop();
            return Err(err);
        }
        self.append_log(&booking, BookingAction::Booked)?;

        tracing::info!(id = %booking.id, vehicle = %vehicle, cost = booking.cost, "booked");
        Ok(booking)
    }

    /// Cancel an active booking. Unknown or already-cancelled ids return
    /// `Ok(false)` and change nothing.
    pub fn cancel(&mut self, booking_id: &str) -> Result<bool> {
        let Some(booking) = self
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id && b.is_active())
        else {
            tracing::debug!(id = booking_id, "nothing to cancel");
            return Ok(false);
        };

        let previous = booking.clone();
        booking.cancel();
        let booking = booking.clone();
        if let Err(err) = self.save() {
            if let Some(entry) = self.bookings.iter_mut().find(|b| b.id == previous.id) {
                *entry = previous;
            }
            return Err(err);
        }
        self.append_log(&booking, BookingAction::Cancelled)?;

        tracing::info!(id = %booking.id, "cancelled");
        Ok(true)
    }

    /// Drop every booking, rewrite the file and truncate the text log
    pub fn clear_all(&mut self) -> Result<()> {
        self.bookings.clear();
        self.save()?;

        if self.log_file.exists() {
            fs::write(&self.log_file, "")
                .with_context(|| format!("Failed to truncate log: {:?}", self.log_file))?;
            tracing::debug!(path = ?self.log_file, "log cleared");
        }

        tracing::info!("all bookings cleared");
        Ok(())
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Write the full ledger as a pretty-printed JSON array
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.bookings)
            .context("Failed to serialize bookings")?;

        fs::write(&self.file, json)
            .with_context(|| format!("Failed to write ledger: {:?}", self.file))?;

        Ok(())
    }

    /// Replace the in-memory ledger with the file contents.
    ///
    /// A missing file starts empty. A file that does not parse is logged and
    /// also starts empty; nothing is salvaged from it.
    pub fn load(&mut self) -> Result<()> {
        self.bookings.clear();

        if !self.file.exists() {
            tracing::debug!(path = ?self.file, "ledger not found, starting empty");
            return Ok(());
        }

        let content = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read ledger: {:?}", self.file))?;

        match serde_json::from_str::<Vec<Booking>>(&content) {
            Ok(bookings) => {
                tracing::debug!(count = bookings.len(), "ledger loaded");
                self.bookings = bookings;
            }
            Err(err) => {
                tracing::warn!(
                    path = ?self.file,
                    error = %err,
                    "could not decode ledger, starting empty"
                );
            }
        }

        Ok(())
    }

    fn append_log(&self, booking: &Booking, action: BookingAction) -> Result<()> {
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log: {:?}", self.log_file))?;

        writeln!(log, "{}", booking.log_line(action))
            .with_context(|| format!("Failed to append to log: {:?}", self.log_file))?;

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use crate::locations::Route;
    use crate::pricing::BASE_FARE;

    /// Unique ledger + log paths under the system temp dir
    fn temp_paths(name: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("enavroom-{}-{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        (dir.join("bookings.json"), dir.join("booking_log.txt"))
    }

    fn temp_ledger(name: &str) -> BookingLedger {
        let (file, log) = temp_paths(name);
        BookingLedger::new(file, log)
    }

    #[test]
    fn test_book_persists_and_logs() {
        let mut ledger = temp_ledger("book");

        let booking = ledger
            .book(VehicleClass::Car4Seater, Location::PupMain, Location::Cea, PaymentMethod::Cash)
            .unwrap();

        assert_eq!(booking.distance, 2.0);
        assert_eq!(booking.cost, 120.0);
        assert_eq!(booking.status, BookingStatus::Booked);
        assert_eq!(ledger.bookings().len(), 1);

        let on_disk: Vec<Booking> =
            serde_json::from_str(&fs::read_to_string(ledger.file()).unwrap()).unwrap();
        assert_eq!(on_disk, vec![booking.clone()]);

        let log = fs::read_to_string(ledger.log_file()).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.starts_with(&format!("BOOKED | ID: {}", booking.id)));
    }

    #[test]
    fn test_book_then_cancel() {
        let mut ledger = temp_ledger("cancel");
        let booking = ledger
            .book(VehicleClass::Enavroom, Location::ITech, Location::Coc, PaymentMethod::Wallet)
            .unwrap();

        assert!(ledger.cancel(&booking.id).unwrap());
        assert_eq!(ledger.find(&booking.id).unwrap().status, BookingStatus::Cancelled);

        let log = fs::read_to_string(ledger.log_file()).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("CANCELLED"));
        assert!(lines[1].ends_with("STATUS: cancelled"));
    }

    #[test]
    fn test_cancel_unknown_id_does_not_mutate() {
        let mut ledger = temp_ledger("cancel-unknown");
        ledger
            .book(VehicleClass::Enavroom, Location::ITech, Location::Coc, PaymentMethod::Cash)
            .unwrap();
        let before = ledger.bookings().to_vec();
        let log_before = fs::read_to_string(ledger.log_file()).unwrap();

        assert!(!ledger.cancel("nope").unwrap());
        assert_eq!(ledger.bookings(), before.as_slice());
        assert_eq!(fs::read_to_string(ledger.log_file()).unwrap(), log_before);
    }

    #[test]
    fn test_cancel_twice_reports_failure() {
        let mut ledger = temp_ledger("cancel-twice");
        let booking = ledger
            .book(VehicleClass::Car6Seater, Location::Cea, Location::Hasmin, PaymentMethod::Cash)
            .unwrap();

        assert!(ledger.cancel(&booking.id).unwrap());
        assert!(!ledger.cancel(&booking.id).unwrap());

        let log = fs::read_to_string(ledger.log_file()).unwrap();
        assert_eq!(log.lines().count(), 2);
    }

    #[test]
    fn test_same_start_and_end_costs_base_fare() {
        let mut ledger = temp_ledger("same");
        let booking = ledger
            .book(
                VehicleClass::Car6Seater,
                Location::Condotel,
                Location::Condotel,
                PaymentMethod::Cash,
            )
            .unwrap();

        assert_eq!(booking.distance, 0.0);
        assert_eq!(booking.cost, BASE_FARE);
    }

    #[test]
    fn test_undefined_route_is_rejected() {
        let (file, log) = temp_paths("undefined");
        let routes = RouteTable::from_routes(vec![Route::new(
            Location::PupMain,
            Location::Cea,
            2.0,
            None,
        )]);
        let mut ledger = BookingLedger::with_routes(&file, &log, routes);

        let err = ledger
            .book(VehicleClass::Enavroom, Location::Hasmin, Location::Coc, PaymentMethod::Cash)
            .unwrap_err();

        let route_err = err.downcast_ref::<RouteError>().expect("route error");
        assert_eq!(route_err.start, Location::Hasmin);
        assert!(ledger.bookings().is_empty());
        assert!(!file.exists());
        assert!(!log.exists());
    }

    #[test]
    fn test_persist_then_load_round_trip() {
        let (file, log) = temp_paths("roundtrip");
        let mut ledger = BookingLedger::new(&file, &log);

        let a = ledger
            .book(VehicleClass::Enavroom, Location::PupMain, Location::Coc, PaymentMethod::Cash)
            .unwrap();
        ledger
            .book(
                VehicleClass::Car4Seater,
                Location::PupLhs,
                Location::Condotel,
                PaymentMethod::Wallet,
            )
            .unwrap();
        ledger.cancel(&a.id).unwrap();

        let mut reloaded = BookingLedger::new(&file, &log);
        reloaded.load().unwrap();

        assert_eq!(reloaded.bookings(), ledger.bookings());
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let mut ledger = temp_ledger("missing");
        ledger.load().unwrap();
        assert!(ledger.bookings().is_empty());
    }

    #[test]
    fn test_load_malformed_file_starts_empty() {
        let (file, log) = temp_paths("malformed");
        let mut ledger = BookingLedger::new(&file, &log);
        ledger
            .book(VehicleClass::Enavroom, Location::PupMain, Location::Coc, PaymentMethod::Cash)
            .unwrap();
        fs::write(&file, "[{\"id\": \"abc\", \"vehicle_type\": ").unwrap();

        ledger.load().unwrap();
        assert!(ledger.bookings().is_empty());
    }

    #[test]
    fn test_clear_all_truncates_log() {
        let mut ledger = temp_ledger("clear");
        ledger
            .book(VehicleClass::Enavroom, Location::PupMain, Location::Coc, PaymentMethod::Cash)
            .unwrap();

        ledger.clear_all().unwrap();

        assert!(ledger.bookings().is_empty());
        assert_eq!(fs::read_to_string(ledger.file()).unwrap().trim(), "[]");
        assert_eq!(fs::read_to_string(ledger.log_file()).unwrap(), "");
    }

    #[test]
    fn test_quote_matches_booking() {
        let mut ledger = temp_ledger("quote");
        let quote = ledger
            .quote(VehicleClass::Car6Seater, Location::Hasmin, Location::ITech)
            .unwrap();
        let booking = ledger
            .book(VehicleClass::Car6Seater, Location::Hasmin, Location::ITech, PaymentMethod::Cash)
            .unwrap();

        assert_eq!(quote.distance, booking.distance);
        assert_eq!(quote.cost, booking.cost);
    }

    #[test]
    fn test_round_trip_keeps_exact_distances() {
        let (file, log) = temp_paths("exact");
        let distances = [13.602956144842313, 0.49598631949896443, 7.1 / 3.0];
        let routes = RouteTable::from_routes(vec![
            Route::new(Location::Cea, Location::Coc, distances[0], None),
            Route::new(Location::Cea, Location::Hasmin, distances[1], None),
            Route::new(Location::Coc, Location::Hasmin, distances[2], None),
        ]);
        let mut ledger = BookingLedger::with_routes(&file, &log, routes);

        for (start, end) in [
            (Location::Cea, Location::Coc),
            (Location::Hasmin, Location::Cea),
            (Location::Coc, Location::Hasmin),
        ] {
            ledger
                .book(VehicleClass::Car6Seater, start, end, PaymentMethod::Cash)
                .unwrap();
        }

        let mut reloaded = BookingLedger::new(&file, &log);
        reloaded.load().unwrap();

        assert_eq!(reloaded.bookings(), ledger.bookings());
        for (booking, expected) in reloaded.bookings().iter().zip(distances) {
            assert_eq!(booking.distance.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let (file, log) = temp_paths("unwritable");
        let mut ledger = BookingLedger::new(&file, &log);
        let booking = ledger
            .book(VehicleClass::Enavroom, Location::PupMain, Location::Coc, PaymentMethod::Cash)
            .unwrap();

        // A directory where the ledger file should be makes every save fail
        fs::remove_file(&file).unwrap();
        fs::create_dir(&file).unwrap();

        assert!(ledger
            .book(VehicleClass::Car4Seater, Location::Cea, Location::Coc, PaymentMethod::Cash)
            .is_err());
        assert_eq!(ledger.bookings(), &[booking.clone()]);

        assert!(ledger.cancel(&booking.id).is_err());
        assert_eq!(ledger.find(&booking.id).unwrap().status, BookingStatus::Booked);

        let log_text = fs::read_to_string(&log).unwrap();
        assert_eq!(log_text.lines().count(), 1);
    }
}
