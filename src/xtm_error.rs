// Crate-wide error type

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XtmError {
    /// Standard input is not an interactive terminal
    #[error("stdin is not a terminal")]
    NotATerminal,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
