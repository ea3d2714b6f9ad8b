// Session loop: cursor, command dispatch and frame building
// Talks to the terminal only through the `Console` trait

use rand::Rng;
use std::io;

use crate::xtm_grid::{CellKind, Grid};
use crate::xtm_lang::Lang;

/// Terminal collaborator consumed by the loop
pub trait Console {
    /// Block until one key arrives, returned as the byte it would produce
    fn read_key(&mut self) -> io::Result<char>;
    /// Draw a whole frame, replacing the previous one
    fn render(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Player commands, one per key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Left,
    Down,
    Right,
    Open,
    Flag,
    Reset,
    Quit,
}

impl Command {
    /// Decode a key; unknown keys map to None and are ignored
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            'w' => Some(Command::Up),
            'a' => Some(Command::Left),
            's' => Some(Command::Down),
            'd' => Some(Command::Right),
            ' ' => Some(Command::Open),
            'f' => Some(Command::Flag),
            'r' => Some(Command::Reset),
            // Ctrl-C arrives as ETX while the terminal is raw
            'q' | '\u{3}' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Selected cell, always inside the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// Move by (drow, dcol), clamped to [0, rows) x [0, cols)
    pub fn step(&mut self, drow: isize, dcol: isize, rows: usize, cols: usize) {
        self.row = self.row.saturating_add_signed(drow).min(rows - 1);
        self.col = self.col.saturating_add_signed(dcol).min(cols - 1);
    }
}

/// One game session: the grid, the cursor and the source of randomness
pub struct Session<R: Rng> {
    pub grid: Grid,
    pub cursor: Cursor,
    mines: usize,
    rng: R,
    lang: Lang,
    quit: bool,
}

impl<R: Rng> Session<R> {
    /// Build a session with a freshly randomized grid
    pub fn new(rows: usize, cols: usize, mines: usize, rng: R, lang: Lang) -> Self {
        let mut session = Session {
            grid: Grid::new(rows, cols),
            cursor: Cursor::default(),
            mines,
            rng,
            lang,
            quit: false,
        };
        session.reset();
        session
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// New mine layout with the same mine count
    pub fn reset(&mut self) {
        self.grid.initialize(self.mines, &mut self.rng);
    }

    /// Apply one command to the grid or cursor
    pub fn dispatch(&mut self, cmd: Command) {
        tracing::debug!(?cmd, row = self.cursor.row, col = self.cursor.col, "dispatch");
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let Cursor { row, col } = self.cursor;
        match cmd {
            Command::Up => self.cursor.step(-1, 0, rows, cols),
            Command::Left => self.cursor.step(0, -1, rows, cols),
            Command::Down => self.cursor.step(1, 0, rows, cols),
            Command::Right => self.cursor.step(0, 1, rows, cols),
            Command::Open => self.grid.open_cell(row, col),
            Command::Flag => self.grid.toggle_flag(row, col),
            Command::Reset => self.reset(),
            Command::Quit => self.quit = true,
        }
    }

    /// Feed a raw key; returns whether it was a known command
    pub fn handle_key(&mut self, key: char) -> bool {
        match Command::from_key(key) {
            Some(cmd) => {
                self.dispatch(cmd);
                true
            }
            None => false,
        }
    }

    /// Glyph for the cell at (row, col) as the player sees it
    pub fn glyph(&self, row: usize, col: usize) -> char {
        let cell = self.grid.cell_at(row, col);
        if !cell.open {
            return if cell.flagged { 'F' } else { '#' };
        }
        match cell.kind {
            CellKind::Mine => '*',
            CellKind::Empty => match self.grid.neighbor_mine_count(row, col) {
                0 => ' ',
                n => char::from_digit(n as u32, 10).unwrap_or('?'),
            },
        }
    }

    /// Header, top border, one line per row, bottom border
    pub fn frame(&self) -> Vec<String> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let border = "-".repeat(cols * 3 + 2);
        let mut lines = Vec::with_capacity(rows + 3);
        lines.push(self.lang.header(
            rows,
            cols,
            self.grid.mine_count(),
            self.grid.open_count(),
        ));
        lines.push(border.clone());
        for r in 0..rows {
            let mut line = String::with_capacity(cols * 3 + 2);
            line.push('|');
            for c in 0..cols {
                let selected = self.cursor == Cursor { row: r, col: c };
                line.push(if selected { '[' } else { ' ' });
                line.push(self.glyph(r, c));
                line.push(if selected { ']' } else { ' ' });
            }
            line.push('|');
            lines.push(line);
        }
        lines.push(border);
        lines
    }
}

/// Main loop: render, read one key, dispatch, until quit
pub fn run<R: Rng, C: Console>(session: &mut Session<R>, console: &mut C) -> io::Result<()> {
    while !session.is_quit() {
        console.render(&session.frame())?;
        let key = console.read_key()?;
        if !session.handle_key(key) {
            tracing::trace!(?key, "ignored key");
        }
    }
    tracing::info!(open = session.grid.open_count(), "quit");
    Ok(())
}
