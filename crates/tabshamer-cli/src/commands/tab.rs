use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use tabshamer_core::{
    events::{self, TabEvent},
    TabId, TabStore,
};

use super::{load_open_tabs, tabs_file_path};

#[derive(Subcommand)]
pub enum TabAction {
    /// Record a newly opened tab
    Opened {
        /// Host tab id
        id: TabId,
        /// RFC 3339 open time (defaults to now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Drop the record for a closed tab
    Closed {
        /// Host tab id
        id: TabId,
    },
    /// Adopt a tab on completed navigation if it has no record yet
    Navigated {
        /// Host tab id
        id: TabId,
        /// Navigated URL
        #[arg(long)]
        url: String,
    },
    /// Reconcile records against a tab enumeration export
    Sync {
        /// Tab enumeration export to read
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub fn run(action: TabAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = TabStore::open()?;
    match action {
        TabAction::Opened { id, at } => {
            events::apply(
                &store,
                &TabEvent::Opened {
                    id,
                    at: at.unwrap_or_else(Utc::now),
                },
            )?;
            println!("recorded tab {id}");
        }
        TabAction::Closed { id } => {
            events::apply(&store, &TabEvent::Closed { id })?;
            println!("removed tab {id}");
        }
        TabAction::Navigated { id, url } => {
            events::apply(
                &store,
                &TabEvent::Navigated {
                    id,
                    url,
                    at: Utc::now(),
                },
            )?;
            println!("observed tab {id}");
        }
        TabAction::Sync { file } => {
            let open = load_open_tabs(&tabs_file_path(file)?)?;
            let ids: Vec<TabId> = open.iter().map(|t| t.id).collect();
            let summary = store.sync(&ids, Utc::now())?;
            println!("adopted {}, dropped {}", summary.adopted, summary.dropped);
        }
    }
    Ok(())
}
