use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GRID_KEY_SEPARATOR: char = ':';
pub const GRID_KEY_PARTS: usize = 5;

/// The five scalar fields that select one decision grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub hero: String,
    #[serde(default)]
    pub facing: String,
    #[serde(default)]
    pub bucket: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("grid key must have {GRID_KEY_PARTS} ':'-separated parts, found {found}: {key:?}")]
    PartCount { key: String, found: usize },
}

impl GridState {
    pub fn new(mode: &str, scenario: &str, hero: &str, facing: &str, bucket: &str) -> Self {
        Self {
            mode: mode.to_string(),
            scenario: scenario.to_string(),
            hero: hero.to_string(),
            facing: facing.to_string(),
            bucket: bucket.to_string(),
        }
    }

    /// Splits a grid key back into its fields, verbatim (no normalization).
    pub fn from_key(key: &str) -> Result<Self, KeyError> {
        let parts: Vec<&str> = key.split(GRID_KEY_SEPARATOR).collect();
        let [mode, scenario, hero, facing, bucket] = parts.as_slice() else {
            return Err(KeyError::PartCount {
                key: key.to_string(),
                found: parts.len(),
            });
        };
        Ok(Self::new(mode, scenario, hero, facing, bucket))
    }
}

/// Canonical router key: each field trimmed and uppercased, joined by `:`.
pub fn grid_key(state: &GridState) -> String {
    [
        &state.mode,
        &state.scenario,
        &state.hero,
        &state.facing,
        &state.bucket,
    ]
    .iter()
    .map(|field| field.trim().to_uppercase())
    .collect::<Vec<_>>()
    .join(":")
}
