//! filament - Terminal Note Manager
//!
//! A terminal-based note-taking application with notebooks, full-text
//! search, a note-link graph, a calendar view, export and a code sandbox.
//! All state lives as JSON documents in the per-user data directory.
//!
//! Run with no arguments for the TUI; pass a command (`list`, `show`,
//! `search`, `export`, ...) for the CLI.

use std::error::Error;
use std::io;
use std::time::Duration;

use color_eyre::Result;
use filament::app::App;
use filament::{cli, handlers, logging, models::StorageManager};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return cli::execute_cli(&args);
    }

    color_eyre::install()?;

    // Logging goes to files under the data directory; a failure here is
    // reported once and the application continues without logs.
    match StorageManager::new() {
        Ok(storage) => {
            if let Err(e) = logging::init(&storage.log_dir()) {
                eprintln!("Warning: logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {e}"),
    }

    // A malformed persisted store is fatal at load, before the terminal is
    // put into raw mode.
    let mut app = App::new()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                should_quit = handlers::keys::handle_key_events(key, &mut app);
            }
        }
        app.tick();
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
