/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from
/// an explicit path given on the command line.
/// Falls back to sensible defaults if the file is missing or incomplete.

use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Items placed on each generated grid.
    pub item_count: usize,
    /// Cosmetic pause after each resolved move.
    pub turn_delay_ms: u64,
    /// Console window title.
    pub title: String,
    /// Fixed gameplay seed; `None` means OS entropy.
    pub seed: Option<u64>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_item_count")]
    item_count: usize,
    #[serde(default = "default_turn_delay")]
    turn_delay_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    seed: Option<u64>,
}

// ── Defaults ──

fn default_item_count() -> usize { 10 }
fn default_turn_delay() -> u64 { 50 }
fn default_title() -> String { "Treasure Hunt".into() }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            item_count: default_item_count(),
            turn_delay_ms: default_turn_delay(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            title: default_title(),
            seed: None,
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        GameConfig {
            item_count: cfg.game.item_count,
            turn_delay_ms: cfg.game.turn_delay_ms,
            title: cfg.general.title,
            seed: cfg.general.seed,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config.
    ///
    /// With an explicit path, the file must exist and parse.
    /// Otherwise search order is (1) exe directory, (2) current working
    /// directory; missing file or missing keys fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    GameError::Config(format!("could not read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&text)
                    .map_err(|e| GameError::Config(format!("{}: {e}", path.display())))
            }
            None => Ok(load_toml(&candidate_dirs()).into()),
        }
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Into::into)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => {
                        debug!("loaded {}", path.display());
                        return cfg;
                    }
                    Err(e) => {
                        warn!("config.toml parse error: {e}; using default settings");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
