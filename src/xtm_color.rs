use crossterm::style::{Color, StyledContent, Stylize};
use term_color_support::ColorSupport;

/// How many colors the output terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Basic,
    Ansi256,
    TrueColor,
}

impl ColorDepth {
    /// Detect terminal color support (TrueColor, 256, or Basic)
    pub fn detect() -> Self {
        let support = ColorSupport::stdout();
        if support.has_16m {
            ColorDepth::TrueColor
        } else if support.has_256 {
            ColorDepth::Ansi256
        } else {
            ColorDepth::Basic
        }
    }
}

/// A trait to extend crossterm's Color with cross-platform consistency methods.
pub trait WTMatch {
    /// Adjusts the color to match the Windows Terminal (Campbell) visual style
    /// based on the terminal's color depth.
    fn wtmatch(self, depth: ColorDepth) -> Color;
}

impl WTMatch for Color {
    fn wtmatch(self, depth: ColorDepth) -> Color {
        // Mapping table based on Windows Terminal "Campbell" RGB values.
        // Format: Some(((R, G, B), ANSI_256_Index))
        let mapping = match self {
            Color::DarkRed =>     Some(((197, 15, 31),  160)),
            Color::DarkGreen =>   Some(((19, 161, 14),  28)),
            Color::DarkBlue =>    Some(((0, 55, 218),   20)),
            Color::DarkMagenta => Some(((136, 23, 152), 90)),
            Color::DarkCyan =>    Some(((58, 150, 221), 38)),
            Color::DarkYellow =>  Some(((193, 156, 0),  178)),
            Color::Grey =>        Some(((204, 204, 204), 250)),
            Color::DarkGrey =>    Some(((118, 118, 118), 243)),
            Color::Red =>         Some(((231, 72, 86),  203)),
            Color::Blue =>        Some(((59, 120, 255), 63)),
            Color::White =>       Some(((242, 242, 242), 255)),
            _ => None, // Custom RGB or Indexed colors are returned as-is
        };

        match mapping {
            Some((rgb, index256)) => match depth {
                ColorDepth::TrueColor => Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 },
                // stable 16-255 index, e.g. macOS Terminal
                ColorDepth::Ansi256 => Color::AnsiValue(index256),
                ColorDepth::Basic => self,
            },
            None => self,
        }
    }
}

/// Board palette resolved once against the terminal's capabilities
#[derive(Debug, Clone)]
pub struct Palette {
    closed: Color,
    flag: Color,
    mine: Color,
    frame: Color,
    numbers: [Color; 8],
}

impl Palette {
    pub fn detect() -> Self {
        Palette::for_depth(ColorDepth::detect())
    }

    pub fn for_depth(depth: ColorDepth) -> Self {
        Palette {
            closed: Color::Grey.wtmatch(depth),
            flag: Color::Red.wtmatch(depth),
            mine: Color::DarkRed.wtmatch(depth),
            frame: Color::DarkGrey.wtmatch(depth),
            // classic 1..8 colors
            numbers: [
                Color::Blue.wtmatch(depth),
                Color::DarkGreen.wtmatch(depth),
                Color::Red.wtmatch(depth),
                Color::DarkBlue.wtmatch(depth),
                Color::DarkRed.wtmatch(depth),
                Color::DarkCyan.wtmatch(depth),
                Color::DarkMagenta.wtmatch(depth),
                Color::DarkGrey.wtmatch(depth),
            ],
        }
    }

    /// Color for one board glyph, None for glyphs left unstyled
    pub fn glyph_color(&self, glyph: char) -> Option<Color> {
        match glyph {
            '#' => Some(self.closed),
            'F' => Some(self.flag),
            '*' => Some(self.mine),
            '|' | '-' | '[' | ']' => Some(self.frame),
            '1'..='8' => self.numbers.get(glyph as usize - '1' as usize).copied(),
            _ => None,
        }
    }

    /// Style every character of a board line (frame borders and cell rows)
    pub fn paint(&self, line: &str) -> Vec<StyledContent<char>> {
        line.chars()
            .map(|ch| match self.glyph_color(ch) {
                Some(color) => ch.with(color),
                None => ch.stylize(),
            })
            .collect()
    }
}
