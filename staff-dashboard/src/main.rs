//! Staff Dashboard - terminal UI for the staff server
//!
//! Run: cargo run -p staff-dashboard
//!
//! `STAFF_API_URL` points it at a server (default `http://localhost:5000`).

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use staff_client::ClientConfig;
use staff_dashboard::{Dashboard, Outcome, Worker, ui};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logs go to the activity panel, never to stdout
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let config = ClientConfig::from_env();
    let client = config.build_http_client()?;
    tracing::info!("Connected to {}", client.base_url());

    let (worker, mut outcomes) = Worker::new(client);
    let mut app = Dashboard::new();
    let logger_state = TuiWidgetState::new();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    worker.dispatch_all(app.start());
    let res = run_app(&mut terminal, &mut app, &worker, &mut outcomes, &logger_state).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut Dashboard,
    worker: &Worker,
    outcomes: &mut mpsc::Receiver<Outcome>,
    logger_state: &TuiWidgetState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, logger_state))?;

        // Input
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            match key.code {
                KeyCode::PageUp => logger_state.transition(TuiWidgetEvent::PrevPageKey),
                KeyCode::PageDown => logger_state.transition(TuiWidgetEvent::NextPageKey),
                _ => worker.dispatch_all(app.handle_key(key)),
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Request outcomes (non-blocking)
        while let Ok(outcome) = outcomes.try_recv() {
            worker.dispatch_all(app.apply(outcome));
        }
    }
}
