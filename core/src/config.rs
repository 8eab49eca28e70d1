// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game configuration loaded from TOML

use crate::board::Board;
use crate::engine::DEFAULT_SYMBOLS;
use crate::GameError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board rows, clamped to [3, 9]
    pub rows: u8,
    /// Board columns, clamped to [3, 9]
    pub cols: u8,
    /// Run length needed to win; the shorter board side when unset
    pub win_on: Option<u8>,
    /// Symbols handed out in order to players without one
    pub symbols: Vec<String>,
    /// Number of players seated at start
    pub players: usize,
    /// Display names, by seat
    pub names: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            win_on: None,
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            players: 2,
            names: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Build the empty board this config describes
    pub fn board(&self) -> Result<Board, GameError> {
        let board = Board::new(self.rows, self.cols);
        match self.win_on {
            Some(win_on) => board.with_win_on(win_on),
            None => Ok(board),
        }
    }

    /// Check the palette and win length
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            anyhow::bail!("Symbol palette must not be empty");
        }
        if let Some(bad) = self.symbols.iter().find(|s| s.trim().is_empty()) {
            anyhow::bail!("Invalid symbol {:?} in palette", bad);
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.symbols.iter().find(|s| !seen.insert(s.as_str())) {
            anyhow::bail!("Symbol {:?} appears twice in palette", dup);
        }
        if self.players == 0 {
            anyhow::bail!("At least one player is required");
        }
        self.board().context("Invalid board settings")?;
        Ok(())
    }
}

/// Default location of the config file
pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "gridtoe", "gridtoe")
        .context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Read and validate a config file
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = toml::from_str::<GameConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Load `path` if given, else the default file if it exists, else defaults
pub fn load_or_default(path: Option<&Path>) -> Result<GameConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = get_config_path()?;
    if default_path.exists() {
        tracing::info!("Loading config from: {}", default_path.display());
        return load_config(&default_path);
    }

    tracing::debug!("No config file at {}, using defaults", default_path.display());
    Ok(GameConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.cols), (3, 3));
        assert_eq!(config.symbols, ["X", "O", "H", "W", ">", "<"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "rows = 5\ncols = 7\nwin_on = 4\n")?;

        let config = load_config(&path)?;
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 7);
        assert_eq!(config.board()?.win_on(), 4);
        assert_eq!(config.players, 2);
        Ok(())
    }

    #[test]
    fn test_rejects_duplicate_palette_symbols() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "symbols = [\"X\", \"O\", \"X\"]\n")?;

        assert!(load_config(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_unreachable_win_length() {
        let config = GameConfig {
            win_on: Some(5),
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let deserialized: GameConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }
}
