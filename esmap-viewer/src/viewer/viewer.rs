//! Main viewer entry point and event loop.
//!
//! Single-threaded and event-driven: the loop renders every frame, polls
//! for input with a timeout, and drains the connector redraw schedule on
//! each tick. Teardown cancels pending redraw deadlines and restores the
//! terminal even when the loop errors.

use super::app::App;
use super::model::Model;
use super::ui;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use esmap_config::EsmapConfig;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long the loop waits for input before ticking timers.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the viewer over the given initial document text.
pub fn run_viewer(
    initial_text: String,
    config: &EsmapConfig,
    state_path: Option<PathBuf>,
    export_dir: PathBuf,
) -> io::Result<()> {
    let model = Model::new(initial_text);
    let mut app = App::new(model, config, state_path, export_dir);

    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Detach timers before the terminal goes back to normal mode.
    app.schedule.cancel();

    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {
                    app.on_resize(Instant::now());
                }
                _ => {}
            }
        }

        app.on_tick(Instant::now());
    }
}
