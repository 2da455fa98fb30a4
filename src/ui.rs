use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use enavroom::{
    BookingStatus, Location, MapPreview, NoticeLevel, Page, PaymentMethod, Prompt, Shell,
    VehicleFamily,
};

const BRAND: Color = Color::Magenta;

/// Redraw often enough for the loading dots even when no key is pressed
const IDLE_REDRAW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Pickup,
    Dropoff,
}

pub struct App {
    pub shell: Shell,
    pub focus: Field,
    pub history_state: TableState,
}

impl App {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            focus: Field::Pickup,
            history_state: TableState::default(),
        }
    }

    /// Step the focused location selector up or down the location list
    fn cycle_location(&mut self, forward: bool) {
        let current = match self.focus {
            Field::Pickup => self.shell.draft.pickup,
            Field::Dropoff => self.shell.draft.dropoff,
        };
        let len = Location::ALL.len();
        let next = match current.and_then(|loc| Location::ALL.iter().position(|l| *l == loc)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };

        match self.focus {
            Field::Pickup => self.shell.set_pickup(Location::ALL[next]),
            Field::Dropoff => self.shell.set_dropoff(Location::ALL[next]),
        }
    }

    /// Move the vehicle highlight among the options of the chosen family
    fn cycle_vehicle(&mut self, forward: bool) {
        let options = self.shell.draft.family().options();
        let len = options.len();
        let current = self
            .shell
            .draft
            .vehicle
            .and_then(|v| options.iter().position(|o| *o == v))
            .unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.shell.select_vehicle(options[next]);
    }

    fn scroll_history(&mut self, forward: bool) {
        let len = self.shell.bookings().len();
        if len == 0 {
            self.history_state.select(None);
            return;
        }
        let i = match self.history_state.selected() {
            Some(i) if forward => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.history_state.select(Some(i));
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant) {
        // Modal layers first: a prompt needs y/n, a notice needs dismissing
        if self.shell.prompt().is_some() {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => self.shell.answer(true),
                KeyCode::Char('n') | KeyCode::Esc => self.shell.answer(false),
                _ => {}
            }
            return;
        }
        if self.shell.notice().is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.shell.dismiss_notice();
            }
            return;
        }

        match (self.shell.page(), code) {
            (_, KeyCode::Char('q')) => self.shell.ask(Prompt::Exit),

            (Page::Start, KeyCode::Enter | KeyCode::Char('s')) => self.shell.show(Page::Home, now),

            (Page::Home, KeyCode::Char('1')) => self.shell.choose_service(VehicleFamily::Moto, now),
            (Page::Home, KeyCode::Char('2')) => self.shell.choose_service(VehicleFamily::Car, now),
            (Page::Home, KeyCode::Char('m')) => self.shell.show(Page::Messages, now),
            (Page::Home, KeyCode::Char('h')) => {
                self.shell.show(Page::History, now);
                let first = if self.shell.bookings().is_empty() { None } else { Some(0) };
                self.history_state.select(first);
            }

            (Page::Messages, KeyCode::Char('n')) => self.shell.show(Page::Notifications, now),

            (Page::History, KeyCode::Down | KeyCode::Char('j')) => self.scroll_history(true),
            (Page::History, KeyCode::Up | KeyCode::Char('k')) => self.scroll_history(false),
            (Page::History, KeyCode::Char('c')) => self.shell.ask(Prompt::ClearHistory),

            (Page::PickupDropoff, KeyCode::Tab) => {
                self.focus = match self.focus {
                    Field::Pickup => Field::Dropoff,
                    Field::Dropoff => Field::Pickup,
                }
            }
            (Page::PickupDropoff, KeyCode::Down | KeyCode::Char('j')) => self.cycle_location(true),
            (Page::PickupDropoff, KeyCode::Up | KeyCode::Char('k')) => self.cycle_location(false),
            (Page::PickupDropoff, KeyCode::Enter) => {
                self.shell.confirm_route(now);
            }

            (Page::Map, KeyCode::Down | KeyCode::Right | KeyCode::Char('j')) => {
                self.cycle_vehicle(true)
            }
            (Page::Map, KeyCode::Up | KeyCode::Left | KeyCode::Char('k')) => {
                self.cycle_vehicle(false)
            }
            (Page::Map, KeyCode::Char('c')) => self.shell.select_payment(PaymentMethod::Cash),
            (Page::Map, KeyCode::Char('w')) => self.shell.select_payment(PaymentMethod::Wallet),
            (Page::Map, KeyCode::Enter | KeyCode::Char('b')) => {
                self.shell.book_now(now);
            }

            (Page::Loading | Page::DriverFound, KeyCode::Char('c') | KeyCode::Char('x')) => {
                self.shell.cancel_active(now)
            }

            (Page::Done, KeyCode::Enter) => self.shell.finish(now),
            (Page::Start | Page::Done, KeyCode::Char('x')) => self.shell.ask(Prompt::Exit),

            (_, KeyCode::Esc | KeyCode::Backspace) => self.shell.back(now),
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("Terminal I/O failed")?;

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if app.shell.exit_requested() {
            return Ok(());
        }

        let now = Instant::now();
        let timeout = app
            .shell
            .next_deadline()
            .map(|due| due.saturating_duration_since(now).min(IDLE_REDRAW))
            .unwrap_or(IDLE_REDRAW);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, Instant::now());
                }
            }
        }

        app.shell.tick(Instant::now());
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Page content
            Constraint::Length(3), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let now = Instant::now();
    match app.shell.page() {
        Page::Start => render_start(f, chunks[1]),
        Page::Home => render_home(f, chunks[1]),
        Page::Messages => render_message(f, chunks[1], "You have no new messages."),
        Page::Notifications => render_message(f, chunks[1], "No new notifications."),
        Page::History => render_history(f, chunks[1], app),
        Page::PickupDropoff => render_pickup_dropoff(f, chunks[1], app),
        Page::Map => render_map(f, chunks[1], app),
        Page::Loading => render_loading(f, chunks[1], app, now),
        Page::DriverFound => render_driver_found(f, chunks[1], app),
        Page::Done => render_done(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    if let Some(prompt) = app.shell.prompt() {
        render_popup(f, " Confirm ", prompt.question(), "y Yes | n No", Color::Yellow);
    } else if let Some(notice) = app.shell.notice() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        render_popup(f, &format!(" {} ", notice.title), &notice.text, "Enter OK", color);
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}

fn location_field(name: &str, value: Option<Location>, focused: bool) -> Line<'static> {
    let marker = if focused {
        Span::styled("▶ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    };
    Line::from(vec![
        Span::raw("  "),
        marker,
        label(name),
        Span::styled(
            value.map(|l| l.as_str()).unwrap_or("(select)"),
            Style::default().fg(if value.is_some() { Color::White } else { Color::DarkGray }),
        ),
    ])
}

fn page_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let page = app.shell.page();
    let mut spans = vec![Span::styled(
        " ENAVROOM ",
        Style::default().fg(Color::White).bg(BRAND).add_modifier(Modifier::BOLD),
    )];

    if page.back().is_some() {
        spans.push(Span::styled("  < ", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::raw("    "));
    }
    spans.push(Span::styled(
        page.title(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    let active = app.shell.bookings().iter().filter(|b| b.is_active()).count();
    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Bookings: {}", app.shell.bookings().len()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(format!("● {}", active), Style::default().fg(Color::Green)));

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(BRAND)));

    f.render_widget(header, area);
}

fn render_start(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "E N A V R O O M",
            Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Rides around campus, one key away",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Start    "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(" Exit"),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(page_block(""));
    f.render_widget(paragraph, area);
}

fn render_home(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Where to today?",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  ╔══════════════════════════════════════╗"),
        Line::from(vec![
            Span::raw("  ║ "),
            Span::styled("1", Style::default().fg(Color::Yellow)),
            Span::raw(". Moto Taxi   (Enavroom-vroom)        ║"),
        ]),
        Line::from(vec![
            Span::raw("  ║ "),
            Span::styled("2", Style::default().fg(Color::Yellow)),
            Span::raw(". Car         (4 or 6 seats)          ║"),
        ]),
        Line::from("  ╠══════════════════════════════════════╣"),
        Line::from(vec![
            Span::raw("  ║ "),
            Span::styled("m", Style::default().fg(Color::Yellow)),
            Span::raw(". Messages                            ║"),
        ]),
        Line::from(vec![
            Span::raw("  ║ "),
            Span::styled("h", Style::default().fg(Color::Yellow)),
            Span::raw(". History                             ║"),
        ]),
        Line::from("  ╚══════════════════════════════════════╝"),
    ];

    f.render_widget(Paragraph::new(content).block(page_block(" Services ")), area);
}

fn render_message(f: &mut Frame, area: Rect, text: &str) {
    let content = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(page_block(""));
    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &mut App) {
    if app.shell.bookings().is_empty() {
        render_message(f, area, "No past bookings yet.");
        return;
    }

    let header_cells = ["ID", "Vehicle", "Route", "Distance", "Cost", "Payment", "Status"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.shell.bookings().iter().map(|b| {
        let color = match b.status {
            BookingStatus::Booked => Color::Green,
            BookingStatus::Cancelled => Color::Red,
        };

        Row::new(vec![
            Cell::from(b.id.clone()),
            Cell::from(b.vehicle_type.as_str()),
            Cell::from(format!("{} → {}", b.start, b.end)),
            Cell::from(format!("{:.1} km", b.distance)),
            Cell::from(format!("₱{:.2}", b.cost)),
            Cell::from(b.payment_method.as_str()),
            Cell::from(b.status.as_str()).style(Style::default().fg(color)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(page_block(" Past Bookings "))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.history_state);
}

fn render_pickup_dropoff(f: &mut Frame, area: Rect, app: &App) {
    let draft = &app.shell.draft;
    let estimate = app.shell.estimate();

    let content = vec![
        Line::from(""),
        location_field("Pick-up Location:  ", draft.pickup, app.focus == Field::Pickup),
        Line::from(""),
        location_field("Drop-off Location: ", draft.dropoff, app.focus == Field::Dropoff),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            label("Vehicle: "),
            Span::raw(draft.vehicle.map(|v| v.as_str()).unwrap_or("-")),
        ]),
        Line::from(vec![
            Span::raw("  "),
            label("Estimated Distance: "),
            Span::raw(format!("{:.1} km", estimate.distance)),
        ]),
        Line::from(vec![
            Span::raw("  "),
            label("Estimated Cost: "),
            Span::styled(format!("₱{:.2}", estimate.cost), Style::default().fg(Color::Green)),
        ]),
    ];

    f.render_widget(Paragraph::new(content).block(page_block(" Where are you going? ")), area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let draft = &app.shell.draft;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    // Route map
    let (pickup, dropoff) = (
        draft.pickup.map(|l| l.as_str()).unwrap_or("?"),
        draft.dropoff.map(|l| l.as_str()).unwrap_or("?"),
    );
    let map_line = match app.shell.map_preview() {
        Some(MapPreview::Image(path)) => {
            Span::styled(format!("Map: {}", path.display()), Style::default().fg(Color::Green))
        }
        Some(MapPreview::Missing(path)) => Span::styled(
            format!("Map Not Found (Tried: {})", path.display()),
            Style::default().fg(Color::DarkGray),
        ),
        Some(MapPreview::NoImage { start, end }) => Span::styled(
            format!("Map Not Found (Route: {} to {})", start, end),
            Style::default().fg(Color::DarkGray),
        ),
        None => Span::raw(""),
    };
    let map = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(pickup, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw(" → "),
            Span::styled(dropoff, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw(format!("   {:.1} km", draft.distance)),
        ]),
        Line::from(""),
        Line::from(map_line),
    ])
    .block(page_block(" Route "));
    f.render_widget(map, chunks[0]);

    // Vehicle options + payment
    let mut content = vec![Line::from("")];
    for (vehicle, price) in app.shell.vehicle_options() {
        let selected = draft.vehicle == Some(vehicle);
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        content.push(Line::from(vec![
            Span::raw(if selected { "  → " } else { "    " }),
            Span::styled(format!("{:<16}", vehicle.as_str()), style),
            Span::styled(
                format!("👤 {}  ", vehicle.passengers()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("₱{:.2}", price), Style::default().fg(Color::Green)),
        ]));
        content.push(Line::from(Span::styled(
            format!("      {}", vehicle.description()),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    content.push(Line::from(""));
    let mut payment_spans = vec![Span::raw("  "), label("Payment: ")];
    for method in PaymentMethod::ALL {
        let style = if draft.payment == method {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        payment_spans.push(Span::styled(format!(" {} ", method), style));
        payment_spans.push(Span::raw(" "));
    }
    content.push(Line::from(payment_spans));
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            " Book Now ",
            Style::default()
                .fg(Color::White)
                .bg(BRAND)
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    f.render_widget(
        Paragraph::new(content).block(page_block(" Choose your Enavroom ")),
        chunks[1],
    );
}

fn render_loading(f: &mut Frame, area: Rect, app: &App, now: Instant) {
    let dots = ".".repeat(app.shell.loading_dots(now));
    let content = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("Finding a driver{:<3}", dots),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("c", Style::default().fg(Color::Red)),
            Span::raw(" Cancel Booking"),
        ]),
    ];
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(page_block(""));
    f.render_widget(paragraph, area);
}

fn render_driver_found(f: &mut Frame, area: Rect, app: &App) {
    let vehicle = match app.shell.draft.family() {
        VehicleFamily::Car => "Car",
        VehicleFamily::Moto => "Enavroom-vroom",
    };
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("We found your driver for your {}!", vehicle),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Driver Name: John Doe"),
        Line::from("Plate No: ABC 123"),
        Line::from("ETA: 5 mins"),
        Line::from(""),
        Line::from(vec![
            Span::styled("c", Style::default().fg(Color::Red)),
            Span::raw(" Cancel Ride"),
        ]),
    ];
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(page_block(""));
    f.render_widget(paragraph, area);
}

fn render_done(f: &mut Frame, area: Rect, app: &App) {
    let draft = &app.shell.draft;
    let or_na = |loc: Option<Location>| loc.map(|l| l.as_str()).unwrap_or("N/A");

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your ride is complete!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Vehicle: {}", draft.vehicle.map(|v| v.as_str()).unwrap_or("N/A"))),
        Line::from(format!("From: {}", or_na(draft.pickup))),
        Line::from(format!("To: {}", or_na(draft.dropoff))),
        Line::from(format!("Distance: {:.1} km", draft.distance)),
        Line::from(format!("Total Paid: ₱{:.2} ({})", draft.cost, draft.payment)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Done    "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(" Exit Application"),
        ]),
    ];
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(page_block(""));
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let hints: &[(&str, &str)] = match app.shell.page() {
        Page::Start => &[("Enter", "Start"), ("x", "Exit")],
        Page::Home => &[("1/2", "Service"), ("m", "Messages"), ("h", "History")],
        Page::Messages => &[("n", "Notifications"), ("Esc", "Back")],
        Page::Notifications => &[("Esc", "Back")],
        Page::History => &[("↑/↓", "Nav"), ("c", "Clear All"), ("Esc", "Back")],
        Page::PickupDropoff => &[
            ("Tab", "Field"),
            ("↑/↓", "Location"),
            ("Enter", "Confirm Ride"),
            ("Esc", "Back"),
        ],
        Page::Map => &[
            ("↑/↓", "Vehicle"),
            ("c/w", "Cash/Wallet"),
            ("Enter", "Book Now"),
            ("Esc", "Back"),
        ],
        Page::Loading => &[("c", "Cancel Booking")],
        Page::DriverFound => &[("c", "Cancel Ride")],
        Page::Done => &[("Enter", "Done"), ("x", "Exit")],
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {} | ", action)));
    }
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_popup(f: &mut Frame, title: &str, text: &str, hint: &str, color: Color) {
    let area = centered_rect(50, 30, f.size());

    let content = vec![
        Line::from(""),
        Line::from(text.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];
    let popup = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title.to_string()),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
