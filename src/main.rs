// Entry point for the terminal Minesweeper
// Sets up logging and configuration, checks the terminal, then runs the session loop

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::process;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

// Module declarations
mod xtm_color;   // Terminal color matching for board glyphs
mod xtm_config;  // Persisted user configuration
mod xtm_error;   // Crate error type
mod xtm_grid;    // Grid engine: mines, counts, open/flag
mod xtm_lang;    // Multi-language string resources
mod xtm_session; // Cursor, command dispatch and frame building
mod xtm_term;    // Raw mode guard and crossterm console

use xtm_config::{load_or_create_config, log_path};
use xtm_error::XtmError;
use xtm_grid::{COLS, ROWS};
use xtm_lang::Lang;
use xtm_session::{Session, run};
use xtm_term::{RawModeGuard, TermConsole};

/// Send tracing output to a log file; the terminal belongs to the board
/// Logging stays off when no log file can be opened
fn init_logging() {
    let Some(path) = log_path() else { return };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    // Load or create user configuration (mine count, colors, language)
    let cfg = load_or_create_config();
    let lang = Lang::new(&cfg.language);

    // Raw mode is restored when the guard drops, on every exit path
    let _guard = match RawModeGuard::acquire() {
        Ok(guard) => guard,
        Err(XtmError::NotATerminal) => {
            eprintln!("ERROR: {}", lang.assets.err_not_tty);
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let mut session = Session::new(ROWS, COLS, cfg.mines, rand::thread_rng(), lang);
    let mut console = TermConsole::stdout(cfg.colors);
    run(&mut session, &mut console)?;
    Ok(())
}
