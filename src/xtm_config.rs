// Configuration management
// Loads user preferences from a TOML file in the platform config directory

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::xtm_grid::{COLS, ROWS};

/// Mine count of the reference configuration
pub const DEFAULT_MINES: usize = 25;

/// User configuration
/// Persisted to disk as TOML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mines: usize,     // Mines laid on every (re)initialization
    pub colors: bool,     // Colorize glyphs when the terminal supports it
    pub language: String, // Language code ("en" or "zh")
}

impl Default for Config {
    fn default() -> Self {
        // Auto-detect system language on first run
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang = if system_lang.to_lowercase().starts_with("zh") {
            "zh".to_string()
        } else {
            "en".to_string()
        };

        Config {
            mines: DEFAULT_MINES,
            colors: true,
            language: lang,
        }
    }
}

impl Config {
    /// Parse a config file body and normalize it
    pub fn from_toml(s: &str) -> Result<Config, toml::de::Error> {
        let mut cfg = toml::from_str::<Config>(s)?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Keep at least one safe cell on the fixed-size board
    pub fn normalize(&mut self) {
        let max = ROWS * COLS - 1;
        if self.mines > max {
            tracing::warn!(requested = self.mines, max, "mine count too large, clamping");
            self.mines = max;
        }
    }
}

fn exe_stem() -> Option<String> {
    let exe = env::current_exe().ok()?;
    exe.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}

/// Get the configuration file path
/// Uses platform-specific config directory (e.g., ~/.config/xtmine/xtmine.toml on Linux)
/// Falls back to current directory if ProjectDirs is unavailable
pub fn config_path() -> Option<PathBuf> {
    let name = exe_stem()?;
    let mut path = match ProjectDirs::from("com", "xhbl", &name) {
        Some(proj) => proj.config_dir().to_path_buf(),
        None => env::current_dir().ok()?,
    };
    path.push(format!("{}.toml", name));
    Some(path)
}

/// Get the log file path, next to other per-user application data
pub fn log_path() -> Option<PathBuf> {
    let name = exe_stem()?;
    let mut path = match ProjectDirs::from("com", "xhbl", &name) {
        Some(proj) => proj.data_local_dir().to_path_buf(),
        None => env::current_dir().ok()?,
    };
    path.push(format!("{}.log", name));
    Some(path)
}

/// Load configuration from disk, or create default if not found
pub fn load_or_create_config() -> Config {
    match config_path() {
        Some(path) => load_or_create_at(&path),
        None => Config::default(),
    }
}

/// Only a missing file gets defaults written; a file that exists but does not
/// load is left untouched and defaults are used for this run
fn load_or_create_at(path: &Path) -> Config {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(s) => match Config::from_toml(&s) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults"),
            },
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults"),
        }
        return Config::default();
    }
    let cfg = Config::default();
    if let Ok(s) = toml::to_string(&cfg) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(path, s) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default config");
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("xtmine-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = Config::from_toml("mines = 10\n").unwrap();
        assert_eq!(cfg.mines, 10);
        assert!(cfg.colors);
    }

    #[test]
    fn empty_file_is_default() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.mines, DEFAULT_MINES);
    }

    #[test]
    fn mine_count_is_clamped_below_board_size() {
        let cfg = Config::from_toml("mines = 500").unwrap();
        assert_eq!(cfg.mines, ROWS * COLS - 1);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(Config::from_toml("mines = \"many\"").is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            mines: 12,
            colors: false,
            language: "zh".to_string(),
        };
        let s = toml::to_string(&cfg).unwrap();
        assert_eq!(Config::from_toml(&s).unwrap(), cfg);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = scratch_dir("missing");
        let path = dir.join("xtmine.toml");
        let cfg = load_or_create_at(&path);
        assert_eq!(cfg.mines, DEFAULT_MINES);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(Config::from_toml(&written).unwrap(), cfg);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_file_is_not_overwritten() {
        let dir = scratch_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("xtmine.toml");
        let body = "mines = -1\ncolors = false\nlanguage = \"zh\"\n";
        fs::write(&path, body).unwrap();

        let cfg = load_or_create_at(&path);
        assert_eq!(cfg.mines, DEFAULT_MINES);
        assert_eq!(fs::read_to_string(&path).unwrap(), body);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn valid_file_is_loaded() {
        let dir = scratch_dir("valid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("xtmine.toml");
        fs::write(&path, "mines = 7\ncolors = false\n").unwrap();

        let cfg = load_or_create_at(&path);
        assert_eq!(cfg.mines, 7);
        assert!(!cfg.colors);
        let _ = fs::remove_dir_all(&dir);
    }
}
