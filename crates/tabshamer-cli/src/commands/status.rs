use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tabshamer_core::{shame, tabs, AncientTab, SettingsStore, TabStore};

use super::{load_open_tabs, tabs_file_path};

/// JSON shape of `status --json`.
#[derive(Serialize)]
struct StatusReport<'a> {
    tab_count: usize,
    tab_limit: u32,
    message: &'a str,
    ancient_count: usize,
    oldest_days: Option<i64>,
    ancient: Vec<AncientTab>,
}

pub fn run(json: bool, tabs_file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::open()?.load()?;
    let open = load_open_tabs(&tabs_file_path(tabs_file)?)?;
    let meta = TabStore::open()?.all()?;
    let now = Utc::now();

    let message = shame::count_message(open.len(), &settings);
    let ancient = tabs::ancient_tabs(&open, &meta, &settings, now);
    let oldest_days = ancient.first().map(|t| t.age_days);

    if json {
        let report = StatusReport {
            tab_count: open.len(),
            tab_limit: settings.tab_limit,
            message,
            ancient_count: ancient.len(),
            oldest_days,
            ancient,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let plural = if open.len() == 1 { "" } else { "s" };
    println!("You have {} tab{plural} open.", open.len());
    println!("{message}");
    if settings.shame_ancient_tabs && !ancient.is_empty() {
        let plural = if ancient.len() == 1 { "" } else { "s" };
        println!(
            "{} ancient tab{plural} ({}+ days old), oldest {} days. Run `tabshamer review list` to see them.",
            ancient.len(),
            settings.age_limit_days,
            oldest_days.unwrap_or(0),
        );
    }
    Ok(())
}
