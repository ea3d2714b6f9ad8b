// Multi-language support module
// Provides localized header and error strings for English and Chinese

#[derive(Clone, Debug)]
pub struct Assets {
    // Header line
    pub header_mines: &'static str,
    pub header_open: &'static str,

    // Startup errors
    pub err_not_tty: &'static str,
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        header_mines: "mines",
        header_open: "open",

        err_not_tty: "stdin is not a terminal!",
    }
}

/// Returns Chinese language assets
pub fn chinese_assets() -> Assets {
    Assets {
        header_mines: "地雷",
        header_open: "已开",

        err_not_tty: "标准输入不是终端！",
    }
}

/// Main language manager struct
/// Holds the active string assets
#[derive(Clone, Debug)]
pub struct Lang {
    pub assets: Assets,
}

impl Lang {
    /// Creates a new Lang instance from a language code
    /// Normalizes input (e.g., "zh-CN" → "zh") and defaults to English for unsupported languages
    pub fn new(lang_code: &str) -> Self {
        let assets = if lang_code.to_lowercase().starts_with("zh") {
            chinese_assets()
        } else {
            english_assets()
        };
        Lang { assets }
    }

    /// Header line: dimensions, mine count and opened/total cells
    pub fn header(&self, rows: usize, cols: usize, mines: usize, open: usize) -> String {
        format!(
            "{} x {} | {}: {} | {}: {}/{}",
            cols,
            rows,
            self.assets.header_mines,
            mines,
            self.assets.header_open,
            open,
            rows * cols
        )
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_language_codes() {
        assert_eq!(Lang::new("zh-CN").assets.header_mines, "地雷");
        assert_eq!(Lang::new("ZH_tw").assets.header_mines, "地雷");
        assert_eq!(Lang::new("en-US").assets.header_mines, "mines");
        assert_eq!(Lang::new("fr").assets.header_mines, "mines");
    }

    #[test]
    fn english_header_matches_classic_layout() {
        let lang = Lang::new("en");
        assert_eq!(lang.header(10, 10, 25, 3), "10 x 10 | mines: 25 | open: 3/100");
    }

    #[test]
    fn chinese_header_uses_localized_labels() {
        let lang = Lang::new("zh");
        assert_eq!(lang.header(10, 10, 25, 0), "10 x 10 | 地雷: 25 | 已开: 0/100");
    }
}
