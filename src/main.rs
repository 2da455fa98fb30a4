// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use enavroom::{
    BookingLedger, BookingStatus, Config, Location, PaymentMethod, RouteError, VehicleClass,
};

const USAGE: &str = "\
Usage:
  enavroom                                   interactive app
  enavroom routes                            list the route table
  enavroom quote <vehicle> <start> <end>     price a trip
  enavroom book <vehicle> <start> <end> [cash|wallet]
  enavroom cancel <id>
  enavroom history
  enavroom clear

Vehicles: moto, car4, car6 (or the full name, e.g. \"Car (6-seater)\")";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?;

    match args.get(1).map(String::as_str) {
        None | Some("ui") => {
            init_tracing(Some(&config))?;
            run_ui_mode(&config)?;
        }
        Some(command) => {
            init_tracing(None)?;
            run_command(&config, command, &args[2..])?;
        }
    }

    Ok(())
}

/// UI mode logs to the trace file so the terminal stays clean; CLI mode logs to stderr
fn init_tracing(ui_config: Option<&Config>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "enavroom=info".into());

    match ui_config {
        Some(config) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.trace_file)
                .with_context(|| format!("Failed to open trace file: {:?}", config.trace_file))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn open_ledger(config: &Config) -> Result<BookingLedger> {
    let routes = config.route_table()?;
    let mut ledger = BookingLedger::with_routes(&config.ledger_file, &config.log_file, routes);
    ledger.load()?;
    Ok(ledger)
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    match args.get(index) {
        Some(value) => Ok(value.as_str()),
        None => bail!("missing <{}>\n\n{}", name, USAGE),
    }
}

fn run_command(config: &Config, command: &str, args: &[String]) -> Result<()> {
    match command {
        "routes" => {
            let ledger = open_ledger(config)?;
            println!("🗺️  Routes ({})", ledger.routes().len());
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for route in ledger.routes().routes() {
                println!(
                    "  {:<10} ↔ {:<10} {:>4.1} km  {}",
                    route.a.as_str(),
                    route.b.as_str(),
                    route.distance_km,
                    route.image.as_deref().unwrap_or("-"),
                );
            }
        }
        "quote" => {
            let vehicle: VehicleClass = arg(args, 0, "vehicle")?.parse()?;
            let start: Location = arg(args, 1, "start")?.parse()?;
            let end: Location = arg(args, 2, "end")?.parse()?;

            let ledger = open_ledger(config)?;
            let quote = ledger.quote(vehicle, start, end)?;
            println!(
                "{} | {} → {} | {:.1} km | ₱{:.2}",
                vehicle, start, end, quote.distance, quote.cost
            );
        }
        "book" => {
            let vehicle: VehicleClass = arg(args, 0, "vehicle")?.parse()?;
            let start: Location = arg(args, 1, "start")?.parse()?;
            let end: Location = arg(args, 2, "end")?.parse()?;
            let payment: PaymentMethod = match args.get(3) {
                Some(p) => p.parse()?,
                None => PaymentMethod::Cash,
            };

            let mut ledger = open_ledger(config)?;
            match ledger.book(vehicle, start, end, payment) {
                Ok(booking) => {
                    println!("✓ Booked {}", booking.id);
                    println!(
                        "  {} | {} → {} | {:.1} km | ₱{:.2} | {}",
                        booking.vehicle_type,
                        booking.start,
                        booking.end,
                        booking.distance,
                        booking.cost,
                        booking.payment_method
                    );
                }
                Err(err) if err.downcast_ref::<RouteError>().is_some() => {
                    eprintln!("❌ {}", err);
                    std::process::exit(2);
                }
                Err(err) => return Err(err),
            }
        }
        "cancel" => {
            let id = arg(args, 0, "id")?;
            let mut ledger = open_ledger(config)?;
            if ledger.cancel(id)? {
                println!("✓ Cancelled {}", id);
            } else {
                eprintln!("❌ No active booking with id {}", id);
                std::process::exit(1);
            }
        }
        "history" => {
            let ledger = open_ledger(config)?;
            if ledger.bookings().is_empty() {
                println!("No past bookings yet.");
            }
            for b in ledger.bookings() {
                let mark = match b.status {
                    BookingStatus::Booked => "●",
                    BookingStatus::Cancelled => "✗",
                };
                println!(
                    "{} {} | {} | {} → {} | {:.1} km | ₱{:.2} ({}) | {}",
                    mark,
                    b.id,
                    b.vehicle_type,
                    b.start,
                    b.end,
                    b.distance,
                    b.cost,
                    b.payment_method,
                    b.status
                );
            }
        }
        "clear" => {
            let mut ledger = open_ledger(config)?;
            ledger.clear_all()?;
            println!("✓ All booking history has been cleared.");
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("unknown command {:?}\n\n{}", other, USAGE),
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &Config) -> Result<()> {
    let shell = enavroom::Shell::from_config(config, std::time::Instant::now())?;
    tracing::info!(bookings = shell.bookings().len(), "starting UI");

    let mut app = ui::App::new(shell);
    ui::run_ui(&mut app)?;

    println!("\n✅ Thanks for riding with Enavroom");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the command line: enavroom help");
    std::process::exit(1);
}
