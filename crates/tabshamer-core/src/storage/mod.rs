mod settings_store;
mod tab_store;

pub use settings_store::SettingsStore;
pub use tab_store::{SyncSummary, TabStore};

use std::path::PathBuf;

/// Returns `~/.config/tabshamer[-dev]/` based on TABSHAMER_ENV.
///
/// Set TABSHAMER_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TABSHAMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tabshamer-dev")
    } else {
        base_dir.join("tabshamer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
