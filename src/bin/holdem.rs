use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use holdem_rs::config::SessionConfig;
use holdem_rs::tui::{app::AppState, controller};
use ratatui::prelude::*;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

const LOG_FILE: &str = "holdem-rs.log";
const LOG_ENV: &str = "HOLDEM_LOG";

/// The terminal belongs to the TUI, so log lines go to a file.
fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    match File::create(LOG_FILE) {
        Ok(file) => {
            let _ = WriteLogger::init(level, config, file);
        }
        Err(err) => eprintln!("cannot open {LOG_FILE}: {err}; logging disabled"),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "holdem-rs needs a real terminal (TTY).\nRun it in a terminal and press q to quit. Version: {}",
            holdem_rs::VERSION
        );
        return Ok(());
    }
    init_logging();

    let config = match SessionConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("holdem-rs: {err}");
            std::process::exit(2);
        }
    };
    let mut app = match AppState::new(config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("holdem-rs: {err}");
            std::process::exit(2);
        }
    };
    log::info!("holdem-rs {} starting", holdem_rs::VERSION);

    let mut terminal = setup_terminal()?;
    let res = controller::run(&mut terminal, &mut app, Duration::from_millis(100));

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
