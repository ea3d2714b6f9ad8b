// Terminal collaborator: raw mode, single-key input and in-place redraw
// Everything that touches the real terminal goes through here

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::tty::IsTty;
use crossterm::{execute, queue};
use std::io::{self, Write};

use crate::xtm_color::Palette;
use crate::xtm_error::XtmError;
use crate::xtm_session::Console;

/// Raw mode held for the guard's lifetime
/// Dropping it (also while unwinding) restores the terminal
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Fails with `NotATerminal` before touching any terminal state
    pub fn acquire() -> Result<Self, XtmError> {
        if !io::stdin().is_tty() {
            return Err(XtmError::NotATerminal);
        }
        terminal::enable_raw_mode()?;
        let guard = RawModeGuard { _private: () };
        let mut stdout = io::stdout();
        execute!(stdout, Hide)?;
        tracing::debug!("raw mode enabled");
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show);
        let _ = terminal::disable_raw_mode();
        tracing::debug!("raw mode restored");
    }
}

/// Map a key event to the byte a cooked terminal would have delivered
/// Ctrl+letter becomes its control byte; Alt combinations are dropped
pub fn key_to_char(key: &KeyEvent) -> char {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return '\0';
    }
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if c.is_ascii_alphabetic() {
                (c.to_ascii_lowercase() as u8 & 0x1f) as char
            } else {
                '\0'
            }
        }
        KeyCode::Char(c) => c,
        KeyCode::Enter => '\r',
        KeyCode::Esc => '\u{1b}',
        KeyCode::Tab => '\t',
        _ => '\0',
    }
}

/// Console drawing frames on stdout and reading keys from the terminal
pub struct TermConsole<W: Write> {
    out: W,
    palette: Option<Palette>,
    last_height: Option<u16>,
}

impl TermConsole<io::Stdout> {
    pub fn stdout(colors: bool) -> Self {
        TermConsole::new(io::stdout(), colors.then(Palette::detect))
    }
}

impl<W: Write> TermConsole<W> {
    pub fn new(out: W, palette: Option<Palette>) -> Self {
        TermConsole {
            out,
            palette,
            last_height: None,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Console for TermConsole<W> {
    fn read_key(&mut self) -> io::Result<char> {
        loop {
            // only presses count; releases and repeats are reported by some terminals
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key_to_char(&key));
                }
            }
        }
    }

    fn render(&mut self, lines: &[String]) -> io::Result<()> {
        // rewind over the previous frame so this one overwrites it
        if let Some(height) = self.last_height {
            queue!(self.out, MoveUp(height), MoveToColumn(0))?;
        }
        for (i, line) in lines.iter().enumerate() {
            match (&self.palette, i) {
                (Some(palette), 1..) => {
                    for styled in palette.paint(line) {
                        queue!(self.out, Print(styled))?;
                    }
                }
                _ => queue!(self.out, Print(line))?,
            }
            queue!(self.out, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }
        self.out.flush()?;
        self.last_height = Some(lines.len() as u16);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtm_session::Command;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn maps_keys_to_bytes() {
        assert_eq!(key_to_char(&press(KeyCode::Char('w'), KeyModifiers::NONE)), 'w');
        assert_eq!(key_to_char(&press(KeyCode::Char(' '), KeyModifiers::NONE)), ' ');
        assert_eq!(key_to_char(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)), '\u{3}');
        assert_eq!(key_to_char(&press(KeyCode::Enter, KeyModifiers::NONE)), '\r');
        assert_eq!(key_to_char(&press(KeyCode::Up, KeyModifiers::NONE)), '\0');
        assert_eq!(key_to_char(&press(KeyCode::Char('W'), KeyModifiers::CONTROL)), '\u{17}');
        assert_eq!(key_to_char(&press(KeyCode::Char('d'), KeyModifiers::ALT)), '\0');
    }

    #[test]
    fn modified_command_letters_are_ignored() {
        for c in ['w', 'a', 's', 'd', 'f', 'r', 'q'] {
            let ctrl = key_to_char(&press(KeyCode::Char(c), KeyModifiers::CONTROL));
            assert_eq!(Command::from_key(ctrl), None, "ctrl-{}", c);
            let alt = key_to_char(&press(KeyCode::Char(c), KeyModifiers::ALT));
            assert_eq!(Command::from_key(alt), None, "alt-{}", c);
        }
        let ctrl_c = key_to_char(&press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(Command::from_key(ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn first_frame_is_not_rewound() {
        let mut console = TermConsole::new(Vec::new(), None);
        console.render(&["abc".to_string(), "def".to_string()]).unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.starts_with("abc"));
        assert!(out.contains("def"));
        assert_eq!(out.matches("\r\n").count(), 2);
        assert!(!out.contains("\x1b[2A"));
    }

    #[test]
    fn later_frames_move_up_by_previous_height() {
        let mut console = TermConsole::new(Vec::new(), None);
        let frame: Vec<String> = (0..13).map(|i| format!("line {}", i)).collect();
        console.render(&frame).unwrap();
        console.render(&frame).unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out.matches("\x1b[13A").count(), 1);
        assert_eq!(out.matches("line 12").count(), 2);
    }

    #[test]
    fn colored_frames_keep_header_plain() {
        let palette = Palette::for_depth(crate::xtm_color::ColorDepth::Basic);
        let mut console = TermConsole::new(Vec::new(), Some(palette));
        console
            .render(&["10 x 10 | mines: 25".to_string(), "|[#]|".to_string()])
            .unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.starts_with("10 x 10 | mines: 25"));
        assert!(out.contains('#'));
    }
}
