use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{error, info, warn};
use tui::{backend::CrosstermBackend, Terminal};

pub mod app;
pub mod cli;
pub mod error;
pub mod generator;
pub mod graph;
pub mod letters;
pub mod logging;
pub mod theme;
pub mod timer;
pub mod tracker;
pub mod ui;
pub mod wpm;

use app::config::{config_file, TestConfig};
use app::input::{handle_key, KeyOutcome};
use app::state::App;
use error::Result;
use theme::Theme;

/// How long the loop waits for a key before running the 1 Hz refresh check.
const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// Raw mode plus the alternate screen. Dropping it hands the terminal back,
/// whichever way `run` leaves.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // each step runs even if an earlier one failed
        if let Err(err) = disable_raw_mode() {
            error!(error = %err, "could not leave raw mode");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            error!(error = %err, "could not leave alternate screen");
        }
    }
}

/// Run the interactive test until the user quits.
pub fn run(config: TestConfig) -> Result<()> {
    let theme = Theme::load();
    let mut app = App::new(config);
    match config_file() {
        Ok(path) => app = app.with_config_path(path),
        Err(err) => warn!(error = %err, "config changes will not be saved"),
    }

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    info!("terminal ready");

    let res = event_loop(&mut terminal, &mut app, &theme);
    if let Err(err) = &res {
        error!(error = %err, "event loop failed");
    }
    res
}

fn event_loop<B: tui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw::draw(f, app, theme))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases as well
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, key, Instant::now()) == KeyOutcome::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}
