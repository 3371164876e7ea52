//! Host tab-lifecycle events and their effect on the tab store.
//!
//! Whatever delivers these (browser bridge, CLI, test harness) is outside
//! this crate; the core only sees the event data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::TabStore;
use crate::tabs::TabId;

/// A tab lifecycle event from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TabEvent {
    /// A new tab was created.
    Opened { id: TabId, at: DateTime<Utc> },
    /// A tab was closed.
    Closed { id: TabId },
    /// A tab finished a navigation. Used to adopt tabs that existed before
    /// this system started observing.
    Navigated {
        id: TabId,
        url: String,
        at: DateTime<Utc>,
    },
}

/// Apply one event to the store.
///
/// `Opened` writes the record, `Closed` deletes it, and `Navigated` writes
/// one only if the tab has none yet.
///
/// # Errors
/// Returns an error if the underlying store read or write fails.
pub fn apply(store: &TabStore, event: &TabEvent) -> Result<(), StoreError> {
    match event {
        TabEvent::Opened { id, at } => store.record(*id, *at),
        TabEvent::Closed { id } => store.remove(*id),
        TabEvent::Navigated { id, at, .. } => {
            if store.get(*id)?.is_none() {
                store.record(*id, *at)
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opened_then_closed() {
        let store = TabStore::open_memory().unwrap();
        let t = Utc::now();

        apply(&store, &TabEvent::Opened { id: 9, at: t }).unwrap();
        assert_eq!(store.get(9).unwrap().map(|r| r.opened_at), Some(t));

        apply(&store, &TabEvent::Closed { id: 9 }).unwrap();
        assert_eq!(store.get(9).unwrap(), None);
    }

    #[test]
    fn navigation_adopts_unknown_tabs_only() {
        let store = TabStore::open_memory().unwrap();
        let t0 = Utc::now() - chrono::Duration::days(2);
        let t1 = Utc::now();

        apply(
            &store,
            &TabEvent::Navigated {
                id: 3,
                url: "https://example.com".into(),
                at: t0,
            },
        )
        .unwrap();
        assert_eq!(store.get(3).unwrap().map(|r| r.opened_at), Some(t0));

        // A later navigation must not reset the open time.
        apply(
            &store,
            &TabEvent::Navigated {
                id: 3,
                url: "https://example.com/other".into(),
                at: t1,
            },
        )
        .unwrap();
        assert_eq!(store.get(3).unwrap().map(|r| r.opened_at), Some(t0));
    }

    #[test]
    fn event_json_shape() {
        let event = TabEvent::Closed { id: 12 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Closed");
        assert_eq!(json["id"], 12);
    }
}
