//! Tab metadata types and the ancient-tab view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::shame::age_in_days;

/// Host-assigned tab identifier. Opaque to this crate.
pub type TabId = i64;

/// Per-tab bookkeeping: when the tab was first observed.
///
/// Created when a tab opens (or on first navigation for tabs that pre-date
/// installation), deleted when the tab closes, never otherwise mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub opened_at: DateTime<Utc>,
}

/// One entry of a host tab enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTab {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A tab whose age meets or exceeds the configured threshold. Derived per
/// query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncientTab {
    pub tab_id: TabId,
    pub url: String,
    pub title: String,
    pub age_days: i64,
}

/// Compute the ancient-tab view: open tabs whose age is at least
/// `settings.age_limit_days`, ordered oldest first.
///
/// Tabs with no stored record or missing url/title are skipped.
pub fn ancient_tabs(
    tabs: &[OpenTab],
    meta: &HashMap<TabId, TabRecord>,
    settings: &Settings,
    now: DateTime<Utc>,
) -> Vec<AncientTab> {
    let mut ancient: Vec<AncientTab> = tabs
        .iter()
        .filter_map(|tab| {
            let record = meta.get(&tab.id)?;
            let url = tab.url.as_deref()?;
            let title = tab.title.as_deref()?;
            let age_days = age_in_days(record.opened_at, now);
            if age_days >= i64::from(settings.age_limit_days) {
                Some(AncientTab {
                    tab_id: tab.id,
                    url: url.to_string(),
                    title: title.to_string(),
                    age_days,
                })
            } else {
                None
            }
        })
        .collect();

    ancient.sort_by(|a, b| b.age_days.cmp(&a.age_days));
    ancient
}
