//! Loyalty program configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Program policy and the files the program data is loaded from.
#[derive(Debug, Clone, Deserialize)]
pub struct LoyaltyConfig {
    /// YAML cashback level table. The built-in table is used when unset.
    #[serde(default)]
    pub level_table_path: Option<PathBuf>,

    /// YAML achievement catalog. When unset the host reads the catalog from
    /// the database.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Whether achievement rewards also raise lifetime spend (and so the
    /// cashback level). Off by default: only purchases move the level.
    #[serde(default)]
    pub rewards_count_toward_level: bool,

    /// Window, in days, in which an active subscription counts as expiring soon.
    #[serde(default = "default_expiry_reminder_days")]
    pub expiry_reminder_days: u32,
}

impl LoyaltyConfig {
    pub fn level_table_path(&self) -> Option<&Path> {
        self.level_table_path.as_deref()
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=365).contains(&self.expiry_reminder_days) {
            return Err(ValidationError::InvalidReminderWindow(
                self.expiry_reminder_days,
            ));
        }
        if is_blank(&self.level_table_path) {
            return Err(ValidationError::BlankPath("loyalty.level_table_path"));
        }
        if is_blank(&self.catalog_path) {
            return Err(ValidationError::BlankPath("loyalty.catalog_path"));
        }
        Ok(())
    }
}

fn is_blank(path: &Option<PathBuf>) -> bool {
    path.as_ref()
        .is_some_and(|p| p.as_os_str().to_string_lossy().trim().is_empty())
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            level_table_path: None,
            catalog_path: None,
            rewards_count_toward_level: false,
            expiry_reminder_days: default_expiry_reminder_days(),
        }
    }
}

fn default_expiry_reminder_days() -> u32 {
    7
}
