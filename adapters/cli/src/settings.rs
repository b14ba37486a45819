//! Startup settings merged from defaults, an optional TOML file and flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_COLUMNS: u32 = 32;
const DEFAULT_ROWS: u32 = 24;
const DEFAULT_CELL_LENGTH: f32 = 20.0;
const DEFAULT_TICK_RATE: u32 = 20;
const DEFAULT_SEED: u64 = 0x5eed_5eed_5eed_5eed;

/// Fully resolved startup settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Settings {
    /// Number of cell columns on the board.
    pub(crate) columns: u32,
    /// Number of cell rows on the board.
    pub(crate) rows: u32,
    /// Side length of a single cell in pixels.
    pub(crate) cell_length: f32,
    /// Simulation steps per second.
    pub(crate) tick_rate: u32,
    /// Seed for the food placement RNG.
    pub(crate) seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            cell_length: DEFAULT_CELL_LENGTH,
            tick_rate: DEFAULT_TICK_RATE,
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// Returns a copy with every populated override applied on top.
    pub(crate) fn apply(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(columns) = overrides.columns {
            self.columns = columns;
        }
        if let Some(rows) = overrides.rows {
            self.rows = rows;
        }
        if let Some(cell_length) = overrides.cell_length {
            self.cell_length = cell_length;
        }
        if let Some(tick_rate) = overrides.tick_rate {
            self.tick_rate = tick_rate;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        self
    }
}

/// Partial settings sourced from a TOML file or command-line flags.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsOverrides {
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) cell_length: Option<f32>,
    pub(crate) tick_rate: Option<u32>,
    pub(crate) seed: Option<u64>,
}

impl SettingsOverrides {
    /// Loads overrides from a TOML file at the provided path.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid settings toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_original_playfield() {
        let settings = Settings::default();
        assert_eq!(settings.columns, 32);
        assert_eq!(settings.rows, 24);
        assert!((settings.cell_length - 20.0).abs() < f32::EPSILON);
        assert_eq!(settings.tick_rate, 20);
    }

    #[test]
    fn toml_overrides_parse_partially() {
        let overrides =
            SettingsOverrides::parse("columns = 16\ntick_rate = 10\n").expect("valid toml");

        assert_eq!(overrides.columns, Some(16));
        assert_eq!(overrides.tick_rate, Some(10));
        assert_eq!(overrides.rows, None);
        assert_eq!(overrides.seed, None);
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(SettingsOverrides::parse("speed = 3\n").is_err());
    }

    #[test]
    fn later_overrides_win() {
        let file = SettingsOverrides {
            columns: Some(16),
            tick_rate: Some(10),
            ..SettingsOverrides::default()
        };
        let flags = SettingsOverrides {
            tick_rate: Some(30),
            ..SettingsOverrides::default()
        };

        let settings = Settings::default().apply(&file).apply(&flags);

        assert_eq!(settings.columns, 16);
        assert_eq!(settings.tick_rate, 30);
        assert_eq!(settings.rows, 24);
    }
}
