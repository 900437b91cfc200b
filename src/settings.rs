//! Run settings
//!
//! Built once from the command line; nothing is persisted between runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Quiz run settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Seed for the first round's question order (random when unset)
    pub seed: Option<u64>,

    // === HUD ===
    /// Show the keypad legend under the answer box
    pub show_keypad: bool,

    // === Output ===
    /// Print the last finished report as JSON on exit
    pub print_json: bool,
    /// Write log output here instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            show_keypad: true,
            print_json: false,
            log_file: None,
        }
    }
}

impl Settings {
    /// Seed to use: the configured one, or a fresh random seed
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
