pub mod review;
pub mod settings;
pub mod status;
pub mod tab;
pub mod watch;

use std::path::{Path, PathBuf};

use tabshamer_core::{storage, OpenTab};

/// Resolve the tab enumeration export path: explicit override, otherwise
/// `tabs.json` in the data dir.
pub(crate) fn tabs_file_path(
    override_path: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(storage::data_dir()?.join("tabs.json")),
    }
}

/// Read the host bridge's exported tab list.
pub(crate) fn load_open_tabs(path: &Path) -> Result<Vec<OpenTab>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!(
            "no tab export found at {}; is the host bridge running?",
            path.display()
        )
        .into());
    }
    let content = std::fs::read_to_string(path)?;
    let tabs: Vec<OpenTab> = serde_json::from_str(&content)?;
    Ok(tabs)
}
