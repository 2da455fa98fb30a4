// 🧭 Shell - page navigation controller
//
// One controller owns every page's state. Navigation swaps the visible page
// and runs its enter/exit hooks. Pages share a single `BookingDraft` scratch
// with the booking in progress.
//
// Two pages schedule a single-shot deferred transition (Loading → DriverFound,
// DriverFound → Done). Leaving a page cancels whatever it scheduled, so a
// transition never fires against a page that is no longer shown.
//
// Time is passed in explicitly; the terminal loop feeds `Instant::now()`.

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::assets::{Assets, MapPreview};
use crate::booking::{Booking, PaymentMethod};
use crate::config::Config;
use crate::ledger::{BookingLedger, Quote};
use crate::locations::{Location, RouteError};
use crate::pricing::{calculate_cost, VehicleClass, VehicleFamily};

const LOADING_DOT_PERIOD: Duration = Duration::from_millis(500);

// ============================================================================
// PAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Start,
    Home,
    Messages,
    Notifications,
    History,
    PickupDropoff,
    Map,
    Loading,
    DriverFound,
    Done,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Start => "Enavroom",
            Page::Home => "Home",
            Page::Messages => "Messages",
            Page::Notifications => "Notifications",
            Page::History => "Booking History",
            Page::PickupDropoff => "Pick-up & Drop-off",
            Page::Map => "Choose your Enavroom",
            Page::Loading => "Finding a driver",
            Page::DriverFound => "Driver Found!",
            Page::Done => "Ride Completed!",
        }
    }

    /// Where the header's back button leads, if the page has one
    pub fn back(&self) -> Option<Page> {
        match self {
            Page::Messages | Page::History | Page::PickupDropoff | Page::Done => Some(Page::Home),
            Page::Notifications => Some(Page::Messages),
            Page::Map => Some(Page::PickupDropoff),
            Page::Start | Page::Home | Page::Loading | Page::DriverFound => None,
        }
    }
}

// ============================================================================
// SHARED SCRATCH
// ============================================================================

/// Booking in progress, threaded through the pages
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingDraft {
    pub vehicle: Option<VehicleClass>,
    pub pickup: Option<Location>,
    pub dropoff: Option<Location>,
    pub distance: f64,
    pub cost: f64,
    pub payment: PaymentMethod,
    pub booking_id: Option<String>,
}

impl BookingDraft {
    pub fn family(&self) -> VehicleFamily {
        self.vehicle
            .map(|v| v.family())
            .unwrap_or(VehicleFamily::Moto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Pop-up message shown over the current page until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, text: impl Into<String>) -> Self {
        Notice {
            level,
            title: title.to_string(),
            text: text.into(),
        }
    }
}

/// Yes/no questions that need an answer before acting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ClearHistory,
    Exit,
}

impl Prompt {
    pub fn question(&self) -> &'static str {
        match self {
            Prompt::ClearHistory => "Are you sure you want to delete all booking history?",
            Prompt::Exit => "Are you sure you want to exit?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub dispatch_delay: Duration,
    pub driver_found_delay: Duration,
}

impl From<&Config> for Timings {
    fn from(config: &Config) -> Self {
        Timings {
            dispatch_delay: config.dispatch_delay,
            driver_found_delay: config.driver_found_delay,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    due: Instant,
    target: Page,
}

// ============================================================================
// SHELL
// ============================================================================

pub struct Shell {
    ledger: BookingLedger,
    assets: Assets,
    timings: Timings,
    page: Page,
    entered_at: Instant,
    pending: Option<Deferred>,
    pub draft: BookingDraft,
    notice: Option<Notice>,
    prompt: Option<Prompt>,
    exit_requested: bool,
}

impl Shell {
    /// Starts on the start page. The ledger should already be loaded.
    pub fn new(ledger: BookingLedger, assets: Assets, timings: Timings, now: Instant) -> Self {
        Shell {
            ledger,
            assets,
            timings,
            page: Page::Start,
            entered_at: now,
            pending: None,
            draft: BookingDraft::default(),
            notice: None,
            prompt: None,
            exit_requested: false,
        }
    }

    /// Route table, loaded ledger and assets as configured
    pub fn from_config(config: &Config, now: Instant) -> Result<Self> {
        let routes = config.route_table()?;
        let mut ledger = BookingLedger::with_routes(&config.ledger_file, &config.log_file, routes);
        ledger.load()?;

        Ok(Shell::new(
            ledger,
            Assets::new(&config.assets_dir),
            Timings::from(config),
            now,
        ))
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn bookings(&self) -> &[Booking] {
        self.ledger.bookings()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub fn show(&mut self, page: Page, now: Instant) {
        self.on_hide();
        tracing::debug!(from = ?self.page, to = ?page, "show page");
        self.page = page;
        self.entered_at = now;
        self.on_show(now);
    }

    pub fn back(&mut self, now: Instant) {
        if let Some(target) = self.page.back() {
            self.show(target, now);
        }
    }

    fn on_show(&mut self, now: Instant) {
        match self.page {
            Page::History => {
                if let Err(err) = self.ledger.load() {
                    self.report(err);
                }
            }
            Page::PickupDropoff => self.refresh_estimate(),
            Page::Map => {
                let family = self.draft.family();
                match self.draft.vehicle {
                    Some(v) if family.options().contains(&v) => {}
                    _ => self.draft.vehicle = Some(family.default_class()),
                }
            }
            Page::Loading => self.schedule(now + self.timings.dispatch_delay, Page::DriverFound),
            Page::DriverFound => self.schedule(now + self.timings.driver_found_delay, Page::Done),
            _ => {}
        }
    }

    fn on_hide(&mut self) {
        if let Some(cancelled) = self.pending.take() {
            tracing::debug!(target_page = ?cancelled.target, "deferred transition cancelled");
        }
    }

    fn schedule(&mut self, due: Instant, target: Page) {
        self.pending = Some(Deferred { due, target });
    }

    /// Fire a due deferred transition. Returns true if the page changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deferred) if deferred.due <= now => {
                self.pending = None;
                self.show(deferred.target, now);
                true
            }
            _ => false,
        }
    }

    /// When the event loop must wake up next, if anything is scheduled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|d| d.due)
    }

    /// "Finding a driver" dot count, cycling 1, 2, 3, 0 every half second
    pub fn loading_dots(&self, now: Instant) -> usize {
        let ticks = now.saturating_duration_since(self.entered_at).as_millis()
            / LOADING_DOT_PERIOD.as_millis();
        ((ticks + 1) % 4) as usize
    }

    // ========================================================================
    // HOME
    // ========================================================================

    /// Service button: remember the family's default tier, then pick locations
    pub fn choose_service(&mut self, family: VehicleFamily, now: Instant) {
        self.draft.vehicle = Some(family.default_class());
        self.show(Page::PickupDropoff, now);
    }

    // ========================================================================
    // PICK-UP / DROP-OFF
    // ========================================================================

    pub fn set_pickup(&mut self, location: Location) {
        self.draft.pickup = Some(location);
        self.refresh_estimate();
    }

    pub fn set_dropoff(&mut self, location: Location) {
        self.draft.dropoff = Some(location);
        self.refresh_estimate();
    }

    /// Distance and cost shown under the selectors; zero until both ends are
    /// set, distinct and routed.
    pub fn estimate(&self) -> Quote {
        let vehicle = self.draft.vehicle.unwrap_or(VehicleClass::Enavroom);
        match (self.draft.pickup, self.draft.dropoff) {
            (Some(pickup), Some(dropoff)) if pickup != dropoff => self
                .ledger
                .quote(vehicle, pickup, dropoff)
                .unwrap_or(Quote { distance: 0.0, cost: 0.0 }),
            _ => Quote { distance: 0.0, cost: 0.0 },
        }
    }

    fn refresh_estimate(&mut self) {
        let quote = self.estimate();
        self.draft.distance = quote.distance;
        self.draft.cost = quote.cost;
    }

    /// Validate the chosen locations and move on to the map page
    pub fn confirm_route(&mut self, now: Instant) -> bool {
        let (pickup, dropoff) = match (self.draft.pickup, self.draft.dropoff) {
            (Some(p), Some(d)) => (p, d),
            _ => {
                self.error("Please select both pick-up and drop-off locations.");
                return false;
            }
        };

        if pickup == dropoff {
            self.error("Pick-up and drop-off locations cannot be the same.");
            return false;
        }

        let distance = self.ledger.routes().distance(pickup, dropoff);
        if distance == 0.0 {
            self.error(format!(
                "No route defined between {} and {}. Please select different locations.",
                pickup, dropoff
            ));
            return false;
        }

        let vehicle = self.draft.vehicle.unwrap_or(VehicleClass::Enavroom);
        self.draft.distance = distance;
        self.draft.cost = calculate_cost(vehicle, distance);
        self.show(Page::Map, now);
        true
    }

    // ========================================================================
    // MAP / VEHICLE & PAYMENT
    // ========================================================================

    pub fn map_preview(&self) -> Option<MapPreview> {
        let (start, end) = (self.draft.pickup?, self.draft.dropoff?);
        Some(self.assets.route_map(self.ledger.routes(), start, end))
    }

    /// Tiers on offer for the chosen family with their fare for this trip
    pub fn vehicle_options(&self) -> Vec<(VehicleClass, f64)> {
        self.draft
            .family()
            .options()
            .iter()
            .map(|v| (*v, calculate_cost(*v, self.draft.distance)))
            .collect()
    }

    pub fn select_vehicle(&mut self, vehicle: VehicleClass) {
        self.draft.vehicle = Some(vehicle);
        self.draft.cost = calculate_cost(vehicle, self.draft.distance);
    }

    pub fn select_payment(&mut self, payment: PaymentMethod) {
        self.draft.payment = payment;
    }

    /// Record the booking and start dispatch
    pub fn book_now(&mut self, now: Instant) -> bool {
        let Some(vehicle) = self.draft.vehicle else {
            self.notice = Some(Notice::new(
                NoticeLevel::Warning,
                "Selection Missing",
                "Please select a vehicle type before booking.",
            ));
            return false;
        };
        let (Some(pickup), Some(dropoff)) = (self.draft.pickup, self.draft.dropoff) else {
            self.error("Please select both pick-up and drop-off locations.");
            return false;
        };

        match self.ledger.book(vehicle, pickup, dropoff, self.draft.payment) {
            Ok(booking) => {
                self.draft.cost = booking.cost;
                self.draft.distance = booking.distance;
                self.draft.booking_id = Some(booking.id);
                self.show(Page::Loading, now);
                true
            }
            Err(err) if err.downcast_ref::<RouteError>().is_some() => {
                self.error("Failed to confirm booking.");
                false
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Cancel the active booking from the loading or driver-found page and
    /// go back home.
    pub fn cancel_active(&mut self, now: Instant) {
        let cancelled = match self.draft.booking_id.clone() {
            Some(id) => self.ledger.cancel(&id),
            None => Ok(false),
        };

        let (ride, title) = if self.page == Page::DriverFound {
            ("ride", "Ride Cancelled")
        } else {
            ("booking", "Cancelled")
        };
        match cancelled {
            Ok(true) => {
                self.notice = Some(Notice::new(
                    NoticeLevel::Info,
                    title,
                    format!("Your {} has been cancelled.", ride),
                ));
            }
            Ok(false) => {
                self.notice = Some(Notice::new(
                    NoticeLevel::Warning,
                    "Error",
                    format!("Could not cancel {} or no active booking found.", ride),
                ));
            }
            Err(err) => self.report(err),
        }

        self.show(Page::Home, now);
    }

    /// Done page: forget the finished trip and return home
    pub fn finish(&mut self, now: Instant) {
        self.draft = BookingDraft::default();
        self.show(Page::Home, now);
    }

    // ========================================================================
    // PROMPTS
    // ========================================================================

    pub fn ask(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn answer(&mut self, yes: bool) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        if !yes {
            return;
        }

        match prompt {
            Prompt::ClearHistory => match self.ledger.clear_all() {
                Ok(()) => {
                    self.notice = Some(Notice::new(
                        NoticeLevel::Info,
                        "Cleared",
                        "All booking history has been cleared.",
                    ))
                }
                Err(err) => self.report(err),
            },
            Prompt::Exit => {
                if let Err(err) = self.ledger.save() {
                    self.report(err);
                    return;
                }
                self.exit_requested = true;
            }
        }
    }

    fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::new(NoticeLevel::Error, "Error", text));
    }

    fn report(&mut self, err: anyhow::Error) {
        tracing::error!(error = ?err, "ledger operation failed");
        self.error(format!("{:#}", err));
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use std::fs;

    const DISPATCH: Duration = Duration::from_secs(3);
    const DRIVER_FOUND: Duration = Duration::from_secs(5);

    fn test_shell(now: Instant) -> Shell {
        let dir = std::env::temp_dir().join(format!("enavroom-shell-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let ledger = BookingLedger::new(dir.join("bookings.json"), dir.join("booking_log.txt"));

        Shell::new(
            ledger,
            Assets::new(dir.join("assets")),
            Timings {
                dispatch_delay: DISPATCH,
                driver_found_delay: DRIVER_FOUND,
            },
            now,
        )
    }

    /// Drive the shell up to a booked ride on the loading page
    fn book_ride(shell: &mut Shell, now: Instant) {
        shell.show(Page::Home, now);
        shell.choose_service(VehicleFamily::Car, now);
        shell.set_pickup(Location::PupMain);
        shell.set_dropoff(Location::Cea);
        assert!(shell.confirm_route(now));
        assert!(shell.book_now(now));
    }

    #[test]
    fn test_full_ride_flow() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        book_ride(&mut shell, t0);

        assert_eq!(shell.page(), Page::Loading);
        assert_eq!(shell.draft.cost, 120.0);
        let id = shell.draft.booking_id.clone().unwrap();
        assert_eq!(shell.ledger().find(&id).unwrap().status, BookingStatus::Booked);

        // not yet
        assert!(!shell.tick(t0 + Duration::from_millis(2999)));
        assert_eq!(shell.page(), Page::Loading);

        assert!(shell.tick(t0 + DISPATCH));
        assert_eq!(shell.page(), Page::DriverFound);

        let t1 = t0 + DISPATCH;
        assert_eq!(shell.next_deadline(), Some(t1 + DRIVER_FOUND));
        assert!(shell.tick(t1 + DRIVER_FOUND));
        assert_eq!(shell.page(), Page::Done);
        assert_eq!(shell.next_deadline(), None);

        shell.finish(t1 + DRIVER_FOUND);
        assert_eq!(shell.page(), Page::Home);
        assert_eq!(shell.draft, BookingDraft::default());
    }

    #[test]
    fn test_leaving_page_cancels_transition() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        book_ride(&mut shell, t0);

        shell.cancel_active(t0 + Duration::from_secs(1));
        assert_eq!(shell.page(), Page::Home);
        assert_eq!(shell.next_deadline(), None);

        assert!(!shell.tick(t0 + Duration::from_secs(60)));
        assert_eq!(shell.page(), Page::Home);
    }

    #[test]
    fn test_cancel_from_loading_marks_cancelled() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        book_ride(&mut shell, t0);
        let id = shell.draft.booking_id.clone().unwrap();

        shell.cancel_active(t0);

        assert_eq!(shell.ledger().find(&id).unwrap().status, BookingStatus::Cancelled);
        let notice = shell.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.title, "Cancelled");
        assert_eq!(notice.text, "Your booking has been cancelled.");
    }

    #[test]
    fn test_cancel_ride_twice_warns() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        book_ride(&mut shell, t0);
        shell.tick(t0 + DISPATCH);
        assert_eq!(shell.page(), Page::DriverFound);

        shell.cancel_active(t0 + DISPATCH);
        assert_eq!(shell.notice().unwrap().title, "Ride Cancelled");
        assert_eq!(shell.notice().unwrap().text, "Your ride has been cancelled.");

        shell.dismiss_notice();
        shell.show(Page::Loading, t0 + DISPATCH);
        shell.cancel_active(t0 + DISPATCH);
        assert_eq!(shell.notice().unwrap().level, NoticeLevel::Warning);
    }

    #[test]
    fn test_confirm_route_validation() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        shell.choose_service(VehicleFamily::Moto, t0);

        assert!(!shell.confirm_route(t0));
        assert_eq!(
            shell.notice().unwrap().text,
            "Please select both pick-up and drop-off locations."
        );

        shell.set_pickup(Location::Hasmin);
        shell.set_dropoff(Location::Hasmin);
        assert!(!shell.confirm_route(t0));
        assert_eq!(
            shell.notice().unwrap().text,
            "Pick-up and drop-off locations cannot be the same."
        );
        assert_eq!(shell.page(), Page::PickupDropoff);
    }

    #[test]
    fn test_estimate_follows_selection() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        shell.choose_service(VehicleFamily::Moto, t0);

        shell.set_pickup(Location::PupMain);
        assert_eq!(shell.draft.distance, 0.0);

        shell.set_dropoff(Location::Cea);
        assert_eq!(shell.draft.distance, 2.0);
        assert_eq!(shell.draft.cost, 60.0);
    }

    #[test]
    fn test_map_offers_family_options() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        shell.choose_service(VehicleFamily::Car, t0);
        shell.set_pickup(Location::ITech);
        shell.set_dropoff(Location::Condotel);
        shell.confirm_route(t0);

        let options = shell.vehicle_options();
        assert_eq!(
            options,
            vec![(VehicleClass::Car4Seater, 60.0), (VehicleClass::Car6Seater, 70.0)]
        );

        shell.select_vehicle(VehicleClass::Car6Seater);
        shell.select_payment(PaymentMethod::Wallet);
        assert!(shell.book_now(t0));

        let booking = shell.bookings().last().unwrap();
        assert_eq!(booking.vehicle_type, VehicleClass::Car6Seater);
        assert_eq!(booking.payment_method, PaymentMethod::Wallet);
        assert_eq!(booking.cost, 70.0);
    }

    #[test]
    fn test_clear_history_needs_confirmation() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        book_ride(&mut shell, t0);

        shell.show(Page::History, t0);
        assert_eq!(shell.bookings().len(), 1);

        shell.ask(Prompt::ClearHistory);
        shell.answer(false);
        assert_eq!(shell.bookings().len(), 1);

        shell.ask(Prompt::ClearHistory);
        shell.answer(true);
        assert!(shell.bookings().is_empty());
        assert_eq!(shell.prompt(), None);
    }

    #[test]
    fn test_exit_saves_ledger() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);

        shell.ask(Prompt::Exit);
        shell.answer(true);

        assert!(shell.exit_requested());
        assert!(shell.ledger().file().exists());
    }

    #[test]
    fn test_loading_dots_cycle() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        shell.show(Page::Loading, t0);

        assert_eq!(shell.loading_dots(t0), 1);
        assert_eq!(shell.loading_dots(t0 + Duration::from_millis(500)), 2);
        assert_eq!(shell.loading_dots(t0 + Duration::from_millis(1000)), 3);
        assert_eq!(shell.loading_dots(t0 + Duration::from_millis(1500)), 0);
    }

    #[test]
    fn test_back_navigation() {
        let t0 = Instant::now();
        let mut shell = test_shell(t0);
        shell.show(Page::Notifications, t0);

        shell.back(t0);
        assert_eq!(shell.page(), Page::Messages);
        shell.back(t0);
        assert_eq!(shell.page(), Page::Home);
        shell.back(t0);
        assert_eq!(shell.page(), Page::Home);
    }
}
