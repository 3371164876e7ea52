//! The periodic shame checker: a tokio interval loop driving one check
//! cycle per tick, delivering desktop notifications.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tabshamer_core::{NotificationSink, NotifyError, SettingsStore, ShameNotifier, TabStore};

use super::{load_open_tabs, tabs_file_path};

/// Desktop notification surface.
struct DesktopSink;

impl NotificationSink for DesktopSink {
    fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .timeout(notify_rust::Timeout::Milliseconds(10_000))
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))
    }
}

pub fn run(
    interval_secs: u64,
    once: bool,
    tabs_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tabs_path = tabs_file_path(tabs_file)?;
    let mut notifier = ShameNotifier::new();
    let mut sink = DesktopSink;

    if once {
        return check_once(&mut notifier, &mut sink, &tabs_path);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(watch_loop(interval_secs, notifier, sink, tabs_path))
}

async fn watch_loop(
    interval_secs: u64,
    mut notifier: ShameNotifier,
    mut sink: DesktopSink,
    tabs_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
    loop {
        // First tick completes immediately, covering the startup check.
        interval.tick().await;
        if let Err(e) = check_once(&mut notifier, &mut sink, &tabs_path) {
            tracing::warn!("check cycle failed: {e}");
        }
    }
}

fn check_once(
    notifier: &mut ShameNotifier,
    sink: &mut DesktopSink,
    tabs_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsStore::open()?.load()?;
    let tabs = load_open_tabs(tabs_path)?;
    let meta = TabStore::open()?.all()?;

    let outcome = notifier.run_check(&tabs, &meta, &settings, Utc::now(), sink);
    tracing::info!(
        tab_count = outcome.tab_count,
        ancient_count = outcome.ancient.len(),
        count_shame_sent = outcome.count_shame_sent,
        ancient_shame_sent = outcome.ancient_shame_sent,
        "check cycle complete"
    );
    Ok(())
}
