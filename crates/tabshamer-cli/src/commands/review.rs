use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use tabshamer_core::{storage, tabs, SettingsStore, TabId, TabStore};

use super::{load_open_tabs, tabs_file_path};

#[derive(Subcommand)]
pub enum ReviewAction {
    /// List ancient tabs, oldest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Tab enumeration export to read
        #[arg(long)]
        tabs_file: Option<PathBuf>,
    },
    /// Close the given tabs: queues a close request for the host bridge
    Close {
        /// Tab ids to close
        #[arg(required = true)]
        ids: Vec<TabId>,
        /// Confirm. Without this flag nothing is closed.
        #[arg(long)]
        yes: bool,
        /// Tab enumeration export to read
        #[arg(long)]
        tabs_file: Option<PathBuf>,
    },
}

pub fn run(action: ReviewAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReviewAction::List { json, tabs_file } => list(json, tabs_file),
        ReviewAction::Close {
            ids,
            yes,
            tabs_file,
        } => close(&ids, yes, tabs_file),
    }
}

fn list(json: bool, tabs_file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::open()?.load()?;
    let open = load_open_tabs(&tabs_file_path(tabs_file)?)?;
    let meta = TabStore::open()?.all()?;
    let ancient = tabs::ancient_tabs(&open, &meta, &settings, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&ancient)?);
        return Ok(());
    }

    if ancient.is_empty() {
        println!("No ancient tabs. Keep it up!");
        return Ok(());
    }
    for tab in &ancient {
        println!("{:>5}  {:>4}d  {}  {}", tab.tab_id, tab.age_days, tab.title, tab.url);
    }
    Ok(())
}

fn close(
    ids: &[TabId],
    yes: bool,
    tabs_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let open = load_open_tabs(&tabs_file_path(tabs_file)?)?;

    println!("Tabs to close:");
    for id in ids {
        match open.iter().find(|t| t.id == *id) {
            Some(tab) => println!(
                "  {id}  {}",
                tab.title.as_deref().or(tab.url.as_deref()).unwrap_or("(untitled)")
            ),
            None => println!("  {id}  (not in the current tab list)"),
        }
    }

    if !yes {
        // Closing without explicit confirmation is not supported.
        println!("Nothing closed. Re-run with --yes to confirm.");
        return Ok(());
    }

    let outbox = storage::data_dir()?.join("pending_closes.json");
    let mut pending: Vec<TabId> = match std::fs::read_to_string(&outbox) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => Vec::new(),
    };
    for id in ids {
        if !pending.contains(id) {
            pending.push(*id);
        }
    }
    std::fs::write(&outbox, serde_json::to_string_pretty(&pending)?)?;

    let store = TabStore::open()?;
    for id in ids {
        store.remove(*id)?;
    }

    let plural = if ids.len() == 1 { "" } else { "s" };
    println!("Queued {} tab{plural} for closing.", ids.len());
    Ok(())
}
