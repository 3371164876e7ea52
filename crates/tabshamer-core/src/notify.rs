//! Cooldown-governed shame notifier.
//!
//! One check cycle looks at the current tab enumeration and fires up to two
//! notifications: a count shame when the tab count reaches the limit, and an
//! age shame when ancient tabs exist. Each topic has its own cooldown
//! timestamp, owned by [`ShameNotifier`] so tests can construct, reset, and
//! inspect it. Timestamps advance only when the sink actually displayed the
//! notification; a failed display is logged and retried next cycle.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::NotifyError;
use crate::settings::Settings;
use crate::shame;
use crate::tabs::{ancient_tabs, AncientTab, OpenTab, TabId, TabRecord};

/// Title of count-shame notifications.
pub const COUNT_SHAME_TITLE: &str = "Tab Shamer 😒";
/// Title of age-shame notifications.
pub const ANCIENT_SHAME_TITLE: &str = "Ancient Tabs Detected 🏺";

/// Minimum time between two notifications of the same topic.
pub fn default_cooldown() -> Duration {
    Duration::minutes(5)
}

/// Contract for the host notification surface.
pub trait NotificationSink {
    /// Display a notification.
    ///
    /// # Errors
    /// Returns an error if the host refuses or fails to show it.
    fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// What one check cycle did.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub tab_count: usize,
    pub count_shame_sent: bool,
    pub ancient_shame_sent: bool,
    /// Ancient-tab view, oldest first. Empty when age shaming is disabled.
    pub ancient: Vec<AncientTab>,
}

/// Runs check cycles and owns the per-topic cooldown state.
///
/// State is in-memory only; a process restart resets both cooldowns.
#[derive(Debug, Clone)]
pub struct ShameNotifier {
    cooldown: Duration,
    last_count_shame: Option<DateTime<Utc>>,
    last_ancient_shame: Option<DateTime<Utc>>,
}

impl Default for ShameNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ShameNotifier {
    /// Create a notifier with the default 5-minute cooldown.
    pub fn new() -> Self {
        Self::with_cooldown(default_cooldown())
    }

    /// Create a notifier with a custom cooldown.
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_count_shame: None,
            last_ancient_shame: None,
        }
    }

    /// Clear both cooldown timestamps.
    pub fn reset(&mut self) {
        self.last_count_shame = None;
        self.last_ancient_shame = None;
    }

    /// When the last count shame was displayed, if ever.
    pub fn last_count_shame(&self) -> Option<DateTime<Utc>> {
        self.last_count_shame
    }

    /// When the last age shame was displayed, if ever.
    pub fn last_ancient_shame(&self) -> Option<DateTime<Utc>> {
        self.last_ancient_shame
    }

    fn cooled_down(last: Option<DateTime<Utc>>, now: DateTime<Utc>, cooldown: Duration) -> bool {
        last.is_none_or(|at| now - at >= cooldown)
    }

    /// Run one check cycle against the current tab enumeration.
    ///
    /// Sink failures never abort the cycle: they are logged, the cooldown
    /// stays untouched, and the cycle carries on.
    pub fn run_check(
        &mut self,
        tabs: &[OpenTab],
        meta: &HashMap<TabId, TabRecord>,
        settings: &Settings,
        now: DateTime<Utc>,
        sink: &mut dyn NotificationSink,
    ) -> CheckOutcome {
        let tab_count = tabs.len();
        let mut outcome = CheckOutcome {
            tab_count,
            count_shame_sent: false,
            ancient_shame_sent: false,
            ancient: Vec::new(),
        };

        if tab_count as u64 >= u64::from(settings.tab_limit)
            && Self::cooled_down(self.last_count_shame, now, self.cooldown)
        {
            let body = shame::count_message(tab_count, settings);
            match sink.show(COUNT_SHAME_TITLE, body) {
                Ok(()) => {
                    self.last_count_shame = Some(now);
                    outcome.count_shame_sent = true;
                }
                Err(e) => tracing::warn!("failed to show tab count notification: {e}"),
            }
        }

        if settings.shame_ancient_tabs {
            let ancient = ancient_tabs(tabs, meta, settings, now);
            if !ancient.is_empty()
                && Self::cooled_down(self.last_ancient_shame, now, self.cooldown)
            {
                let oldest = ancient.iter().map(|t| t.age_days).max().unwrap_or(0);
                let body = shame::ancient_message(ancient.len(), oldest, settings);
                match sink.show(ANCIENT_SHAME_TITLE, &body) {
                    Ok(()) => {
                        self.last_ancient_shame = Some(now);
                        outcome.ancient_shame_sent = true;
                    }
                    Err(e) => tracing::warn!("failed to show ancient tab notification: {e}"),
                }
            }
            outcome.ancient = ancient;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tone;

    /// Sink that records every displayed notification.
    #[derive(Default)]
    struct RecordingSink {
        shown: Vec<(String, String)>,
        fail: bool,
    }

    impl NotificationSink for RecordingSink {
        fn show(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::PermissionDenied("notifications blocked".into()));
            }
            self.shown.push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn tabs(n: usize) -> Vec<OpenTab> {
        (0..n as i64)
            .map(|id| OpenTab {
                id,
                url: Some(format!("https://example.com/{id}")),
                title: Some(format!("Tab {id}")),
            })
            .collect()
    }

    fn settings(tab_limit: u32) -> Settings {
        Settings {
            tab_limit,
            tone: Tone::Firm,
            ..Settings::default()
        }
    }

    #[test]
    fn below_limit_stays_quiet() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink::default();
        let outcome = notifier.run_check(
            &tabs(3),
            &HashMap::new(),
            &settings(10),
            Utc::now(),
            &mut sink,
        );
        assert!(!outcome.count_shame_sent);
        assert!(sink.shown.is_empty());
    }

    #[test]
    fn at_limit_fires_with_firm_message() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink::default();
        let outcome = notifier.run_check(
            &tabs(10),
            &HashMap::new(),
            &settings(10),
            Utc::now(),
            &mut sink,
        );
        assert!(outcome.count_shame_sent);
        assert_eq!(sink.shown.len(), 1);
        assert_eq!(sink.shown[0].0, COUNT_SHAME_TITLE);
        assert_eq!(sink.shown[0].1, "😒 Be honest. You won't read all of these.");
    }

    #[test]
    fn cooldown_suppresses_and_then_releases() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink::default();
        let s = settings(5);
        let t0 = Utc::now();

        let first = notifier.run_check(&tabs(6), &HashMap::new(), &s, t0, &mut sink);
        assert!(first.count_shame_sent);

        // Two minutes later: still cooling down.
        let second = notifier.run_check(
            &tabs(6),
            &HashMap::new(),
            &s,
            t0 + Duration::minutes(2),
            &mut sink,
        );
        assert!(!second.count_shame_sent);
        assert_eq!(sink.shown.len(), 1);

        // Exactly five minutes later: fires again.
        let third = notifier.run_check(
            &tabs(6),
            &HashMap::new(),
            &s,
            t0 + Duration::minutes(5),
            &mut sink,
        );
        assert!(third.count_shame_sent);
        assert_eq!(sink.shown.len(), 2);
    }

    #[test]
    fn failed_display_does_not_consume_the_cooldown() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let s = settings(5);
        let t0 = Utc::now();

        let outcome = notifier.run_check(&tabs(6), &HashMap::new(), &s, t0, &mut sink);
        assert!(!outcome.count_shame_sent);
        assert_eq!(notifier.last_count_shame(), None);

        // Next cycle succeeds immediately, no cooldown in the way.
        sink.fail = false;
        let outcome = notifier.run_check(
            &tabs(6),
            &HashMap::new(),
            &s,
            t0 + Duration::seconds(1),
            &mut sink,
        );
        assert!(outcome.count_shame_sent);
    }

    #[test]
    fn ancient_shame_has_its_own_cooldown() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink::default();
        let s = settings(100); // count shame never triggers
        let t0 = Utc::now();

        let open = tabs(2);
        let meta: HashMap<TabId, TabRecord> = open
            .iter()
            .map(|t| {
                (
                    t.id,
                    TabRecord {
                        opened_at: t0 - Duration::days(10),
                    },
                )
            })
            .collect();

        let outcome = notifier.run_check(&open, &meta, &s, t0, &mut sink);
        assert!(outcome.ancient_shame_sent);
        assert!(!outcome.count_shame_sent);
        assert_eq!(outcome.ancient.len(), 2);
        assert_eq!(sink.shown[0].0, ANCIENT_SHAME_TITLE);
        assert_eq!(
            sink.shown[0].1,
            "You have 2 tabs older than 7 days. They are probably not coming back."
        );

        // Count cooldown was never consumed.
        assert_eq!(notifier.last_count_shame(), None);
        assert_eq!(notifier.last_ancient_shame(), Some(t0));

        let again = notifier.run_check(&open, &meta, &s, t0 + Duration::minutes(1), &mut sink);
        assert!(!again.ancient_shame_sent);
        assert_eq!(sink.shown.len(), 1);
    }

    #[test]
    fn disabled_age_shaming_skips_the_view() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink::default();
        let mut s = settings(100);
        s.shame_ancient_tabs = false;
        let t0 = Utc::now();

        let open = tabs(1);
        let meta: HashMap<TabId, TabRecord> = [(
            0,
            TabRecord {
                opened_at: t0 - Duration::days(30),
            },
        )]
        .into();

        let outcome = notifier.run_check(&open, &meta, &s, t0, &mut sink);
        assert!(!outcome.ancient_shame_sent);
        assert!(outcome.ancient.is_empty());
        assert!(sink.shown.is_empty());
    }

    #[test]
    fn reset_clears_both_timestamps() {
        let mut notifier = ShameNotifier::new();
        let mut sink = RecordingSink::default();
        let t0 = Utc::now();
        notifier.run_check(&tabs(10), &HashMap::new(), &settings(5), t0, &mut sink);
        assert!(notifier.last_count_shame().is_some());

        notifier.reset();
        assert_eq!(notifier.last_count_shame(), None);
        assert_eq!(notifier.last_ancient_shame(), None);
    }
}
