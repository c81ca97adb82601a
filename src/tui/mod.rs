//! Live terminal dashboard over a simulation session.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Application state over the shared session.
pub mod runtime;
mod style;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::sim::clock::HourSource;
use crate::sim::session::SharedSession;
use crate::sim::ticker::spawn_ticker;
use runtime::App;

/// How long the event loop waits for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches the TUI event loop over `session`.
///
/// The temperature ticker runs on a background runtime for as long as the
/// dashboard is open. Sets up the terminal (raw mode, alternate screen) and
/// restores it on exit.
pub fn run<C: HourSource>(session: SharedSession, preset_name: &str, clock: C, tick: Duration) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to start runtime: {e}");
            std::process::exit(1);
        });
    let token = CancellationToken::new();
    let ticker = {
        let _guard = rt.enter();
        spawn_ticker(session.clone(), clock, tick, token.clone())
    };

    enable_raw_mode().unwrap_or_else(|e| {
        eprintln!("error: failed to enable raw mode: {e}");
        std::process::exit(1);
    });

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).unwrap_or_else(|e| {
        let _ = disable_raw_mode();
        eprintln!("error: failed to enter alternate screen: {e}");
        std::process::exit(1);
    });

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).unwrap_or_else(|e| {
        let _ = disable_raw_mode();
        eprintln!("error: failed to create terminal: {e}");
        std::process::exit(1);
    });

    let mut app = App::new(session, preset_name);
    let result = event_loop(&mut terminal, &mut app);

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    token.cancel();
    let _ = rt.block_on(ticker);
    info!("dashboard closed");

    if let Err(e) = result {
        eprintln!("error: TUI crashed: {e}");
        std::process::exit(1);
    }
}

/// Core event loop: draw, then poll input. Ticker updates show on the next draw.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, app))?;

        if app.quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
        }
    }
}
