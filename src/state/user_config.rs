use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{MultiDayGroup, SlotKey};

pub const USER_CONFIG_FILE: &str = "user_config.json";

fn default_household_size() -> u32 {
    2
}

/// Standing household settings applied to every generated plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_household_size")]
    pub household_size: u32,
    /// Multi-day groups applied right after generation.
    #[serde(default)]
    pub multi_day_preferences: Vec<MultiDayGroup>,
    /// Slots that always get "Kein Gericht" (selected index -1).
    #[serde(default)]
    pub skipped_slots: Vec<SlotKey>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            household_size: default_household_size(),
            multi_day_preferences: Vec::new(),
            skipped_slots: Vec::new(),
        }
    }
}

impl UserConfig {
    fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(USER_CONFIG_FILE)
    }

    /// Load the config, falling back to defaults when the file is missing.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let path = Self::path(data_dir.as_ref());
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(data_dir.as_ref()), json)?;
        Ok(())
    }

    pub fn is_skipped(&self, key: SlotKey) -> bool {
        self.skipped_slots.contains(&key)
    }

    /// Add a skipped slot; returns false when it was already present.
    pub fn skip_slot(&mut self, key: SlotKey) -> bool {
        if self.is_skipped(key) {
            return false;
        }
        self.skipped_slots.push(key);
        true
    }

    /// Remove a skipped slot; returns false when it was not present.
    pub fn unskip_slot(&mut self, key: SlotKey) -> bool {
        let before = self.skipped_slots.len();
        self.skipped_slots.retain(|k| *k != key);
        self.skipped_slots.len() != before
    }
}
