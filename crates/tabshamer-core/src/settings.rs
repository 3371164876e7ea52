//! User-configurable shame settings.
//!
//! Stores the tab-count threshold, the ancient-tab age threshold, and the
//! tone used to pick a message table. Settings are persisted as TOML by
//! [`crate::storage::SettingsStore`]; this module owns the record itself,
//! its defaults, and its validation rules.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Default tab-count threshold.
pub const DEFAULT_TAB_LIMIT: u32 = 20;
/// Default ancient-tab age threshold in days.
pub const DEFAULT_AGE_LIMIT_DAYS: u32 = 7;
/// Lowest accepted age threshold.
pub const MIN_AGE_LIMIT_DAYS: u32 = 1;
/// Highest accepted age threshold.
pub const MAX_AGE_LIMIT_DAYS: u32 = 365;

/// Severity/voice of the shame messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Nice,
    Firm,
    Unhinged,
}

/// User settings.
///
/// Every field has a serde default so a partially-written settings file
/// still deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Tab count at which shaming starts.
    #[serde(default = "default_tab_limit")]
    pub tab_limit: u32,
    /// Age in days at which a tab counts as ancient.
    #[serde(default = "default_age_limit_days")]
    pub age_limit_days: u32,
    /// Which message table to use.
    #[serde(default = "default_tone")]
    pub tone: Tone,
    /// Whether ancient tabs trigger notifications.
    #[serde(default = "default_true")]
    pub shame_ancient_tabs: bool,
    /// Placeholder, not yet wired to anything.
    #[serde(default)]
    pub sound_enabled: bool,
    /// Always true. Closing tabs without confirmation is not supported.
    #[serde(default = "default_true")]
    pub always_ask_before_closing: bool,
}

fn default_tab_limit() -> u32 {
    DEFAULT_TAB_LIMIT
}
fn default_age_limit_days() -> u32 {
    DEFAULT_AGE_LIMIT_DAYS
}
fn default_tone() -> Tone {
    Tone::Firm
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_limit: DEFAULT_TAB_LIMIT,
            age_limit_days: DEFAULT_AGE_LIMIT_DAYS,
            tone: Tone::Firm,
            shame_ancient_tabs: true,
            sound_enabled: false,
            always_ask_before_closing: true,
        }
    }
}

impl Settings {
    /// Check field bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `tab_limit` is zero or `age_limit_days` falls
    /// outside `MIN_AGE_LIMIT_DAYS..=MAX_AGE_LIMIT_DAYS`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tab_limit < 1 {
            return Err(SettingsError::InvalidValue {
                key: "tab_limit".into(),
                message: "must be at least 1".into(),
            });
        }
        if !(MIN_AGE_LIMIT_DAYS..=MAX_AGE_LIMIT_DAYS).contains(&self.age_limit_days) {
            return Err(SettingsError::InvalidValue {
                key: "age_limit_days".into(),
                message: format!("must be between {MIN_AGE_LIMIT_DAYS} and {MAX_AGE_LIMIT_DAYS}"),
            });
        }
        Ok(())
    }

    /// Get a settings value as a string by field name.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = json.get(key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by field name, parsing `value` according to the
    /// field's type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the result fails validation, or the key is `always_ask_before_closing`
    /// (confirmation before closing is mandatory and not configurable).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        if key == "always_ask_before_closing" {
            return Err(SettingsError::InvalidValue {
                key: key.into(),
                message: "confirmation before closing is mandatory".into(),
            });
        }

        let mut json = serde_json::to_value(&*self).map_err(|e| SettingsError::InvalidValue {
            key: key.into(),
            message: e.to_string(),
        })?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| SettingsError::UnknownKey(key.into()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.into()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>().map_err(
                |_| SettingsError::InvalidValue {
                    key: key.into(),
                    message: format!("cannot parse '{value}' as bool"),
                },
            )?),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u32>()
                    .map_err(|_| SettingsError::InvalidValue {
                        key: key.into(),
                        message: format!("cannot parse '{value}' as number"),
                    })?;
                serde_json::Value::Number(n.into())
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(key.to_string(), new_value);

        let updated: Settings =
            serde_json::from_value(json).map_err(|_| SettingsError::InvalidValue {
                key: key.into(),
                message: format!("'{value}' is not a valid value"),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
