//! User settings for tallybook
//!
//! A small preferences file kept next to the data directory. Amounts are
//! always formatted with two decimals behind a leading currency symbol; the
//! symbol itself is the user's choice.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::DataPaths;
use crate::error::{Error, Result};
use crate::models::Money;

/// User preferences persisted as `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Format an amount with the configured currency symbol
    pub fn format_amount(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Load settings from disk
    ///
    /// A missing file gives the defaults; so does one that cannot be read
    /// or parsed, after a logged warning.
    pub fn load_or_create(paths: &DataPaths) -> Result<Self> {
        let path = paths.settings_file();
        if !path.exists() {
            // First run; nothing is written until the caller saves
            return Ok(Self::default());
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read {}, using defaults: {}", path.display(), e);
                return Ok(Self::default());
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Saved settings are unreadable, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// Save settings to disk, creating the directories if needed
    pub fn save(&self, paths: &DataPaths) -> Result<()> {
        paths.ensure_directories()?;

        let path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }
}
