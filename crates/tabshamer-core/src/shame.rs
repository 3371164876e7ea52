//! Shame policy engine.
//!
//! Pure functions mapping (tab count, tab age, settings) to a message
//! string. Message selection is a tiered lookup against multiples of the
//! configured tab limit; comparisons use `>=`, so a count sitting exactly on
//! a boundary lands in the higher tier. No randomness anywhere.
//!
//! The half-step tiers (1.5x, 2.5x) are compared in integer math
//! (`2 * count >= 3 * limit` etc.) so results are exact for any inputs.

use chrono::{DateTime, Utc};

use crate::settings::{Settings, Tone};

const DAY_MS: i64 = 86_400_000;

/// Whole days elapsed between `opened_at` and `now`, floor division.
///
/// A skewed clock (`now` before `opened_at`) yields a negative value; it is
/// propagated as-is. Callers that filter on `age >= threshold` with a
/// threshold of at least one day never see skewed records qualify.
pub fn age_in_days(opened_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - opened_at).num_milliseconds().div_euclid(DAY_MS)
}

/// Pick the count-shame message for the current tab count.
pub fn count_message(count: usize, settings: &Settings) -> &'static str {
    let count = count as u64;
    let limit = u64::from(settings.tab_limit);

    match settings.tone {
        Tone::Nice => {
            if count >= limit * 2 {
                "😊 You have quite a few tabs open. Consider closing some?"
            } else if count >= limit {
                "🙂 You've reached your tab limit. Maybe time for a cleanup?"
            } else {
                "✨ You're doing great with your tabs!"
            }
        }
        Tone::Firm => {
            if 2 * count >= 5 * limit {
                "😒 This is getting out of hand. You don't need all of these."
            } else if 2 * count >= 3 * limit {
                "😬 You've lost control of the situation."
            } else if count >= limit {
                "😒 Be honest. You won't read all of these."
            } else {
                "🙂 You are still a good person."
            }
        }
        Tone::Unhinged => {
            if 2 * count >= 5 * limit {
                "🚨 This is not multitasking. This is avoidance."
            } else if 2 * count >= 3 * limit {
                "🚨 This is a cry for help."
            } else if count >= limit {
                "😒 You have too many tabs. This is chaos."
            } else {
                "🙂 You are still redeemable."
            }
        }
    }
}

/// Pick the age-shame message for `count` ancient tabs, the oldest of which
/// has been open `oldest_days` days.
///
/// The nice tone ignores `oldest_days`; firm and unhinged escalate past 14
/// and 21 days (strict comparison).
pub fn ancient_message(count: usize, oldest_days: i64, settings: &Settings) -> String {
    let plural = if count > 1 { "s" } else { "" };
    let limit = settings.age_limit_days;

    match settings.tone {
        Tone::Nice => {
            format!("You have {count} tab{plural} older than {limit} days. Consider reviewing them?")
        }
        Tone::Firm => {
            if oldest_days > 14 {
                format!(
                    "Some of your tabs are old enough to vote. You have {count} tabs older than {limit} days."
                )
            } else {
                format!(
                    "You have {count} tab{plural} older than {limit} days. They are probably not coming back."
                )
            }
        }
        Tone::Unhinged => {
            if oldest_days > 21 {
                format!(
                    "🚨 You have a tab that's been open for {oldest_days} days. This is not a bookmark, it's a cry for help."
                )
            } else if oldest_days > 14 {
                format!("🚨 Some of your tabs are old enough to drive. You have {count} ancient tabs.")
            } else {
                format!("😬 You have {count} tab{plural} older than {limit} days. Let them go.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_tone(tone: Tone, tab_limit: u32) -> Settings {
        Settings {
            tab_limit,
            tone,
            ..Settings::default()
        }
    }

    #[test]
    fn age_zero_for_same_instant() {
        let t = Utc::now();
        assert_eq!(age_in_days(t, t), 0);
    }

    #[test]
    fn age_one_after_exactly_a_day() {
        let now = Utc::now();
        let opened = now - chrono::Duration::milliseconds(DAY_MS);
        assert_eq!(age_in_days(opened, now), 1);
        // One millisecond short of a day still rounds down.
        let opened = now - chrono::Duration::milliseconds(DAY_MS - 1);
        assert_eq!(age_in_days(opened, now), 0);
    }

    #[test]
    fn age_is_negative_under_clock_skew() {
        let opened = Utc::now();
        let now = opened - chrono::Duration::hours(30);
        assert_eq!(age_in_days(opened, now), -2);
    }

    #[test]
    fn firm_tiers() {
        let s = with_tone(Tone::Firm, 10);
        assert_eq!(
            count_message(26, &s),
            "😒 This is getting out of hand. You don't need all of these."
        );
        assert_eq!(count_message(15, &s), "😬 You've lost control of the situation.");
        assert_eq!(count_message(10, &s), "😒 Be honest. You won't read all of these.");
        assert_eq!(count_message(9, &s), "🙂 You are still a good person.");
    }

    #[test]
    fn ties_go_to_the_higher_tier() {
        let s = with_tone(Tone::Firm, 10);
        // 25 is exactly 2.5x and must not fall to the 1.5x string.
        assert_eq!(
            count_message(25, &s),
            "😒 This is getting out of hand. You don't need all of these."
        );
        assert_eq!(count_message(15, &s), "😬 You've lost control of the situation.");
    }

    #[test]
    fn nice_tiers() {
        let s = with_tone(Tone::Nice, 10);
        assert_eq!(
            count_message(20, &s),
            "😊 You have quite a few tabs open. Consider closing some?"
        );
        assert_eq!(
            count_message(10, &s),
            "🙂 You've reached your tab limit. Maybe time for a cleanup?"
        );
        assert_eq!(count_message(3, &s), "✨ You're doing great with your tabs!");
    }

    #[test]
    fn unhinged_tiers() {
        let s = with_tone(Tone::Unhinged, 4);
        assert_eq!(count_message(10, &s), "🚨 This is not multitasking. This is avoidance.");
        assert_eq!(count_message(6, &s), "🚨 This is a cry for help.");
        assert_eq!(count_message(4, &s), "😒 You have too many tabs. This is chaos.");
        assert_eq!(count_message(1, &s), "🙂 You are still redeemable.");
    }

    #[test]
    fn ancient_message_nice_ignores_oldest() {
        let s = with_tone(Tone::Nice, 10);
        assert_eq!(
            ancient_message(1, 99, &s),
            "You have 1 tab older than 7 days. Consider reviewing them?"
        );
        assert_eq!(
            ancient_message(3, 5, &s),
            "You have 3 tabs older than 7 days. Consider reviewing them?"
        );
    }

    #[test]
    fn ancient_message_firm_escalates_past_two_weeks() {
        let s = with_tone(Tone::Firm, 10);
        assert_eq!(
            ancient_message(2, 15, &s),
            "Some of your tabs are old enough to vote. You have 2 tabs older than 7 days."
        );
        // Exactly 14 days stays on the lower branch.
        assert_eq!(
            ancient_message(2, 14, &s),
            "You have 2 tabs older than 7 days. They are probably not coming back."
        );
        assert_eq!(
            ancient_message(1, 8, &s),
            "You have 1 tab older than 7 days. They are probably not coming back."
        );
    }

    #[test]
    fn ancient_message_unhinged_escalates_twice() {
        let s = with_tone(Tone::Unhinged, 10);
        assert_eq!(
            ancient_message(1, 22, &s),
            "🚨 You have a tab that's been open for 22 days. This is not a bookmark, it's a cry for help."
        );
        assert_eq!(
            ancient_message(4, 20, &s),
            "🚨 Some of your tabs are old enough to drive. You have 4 ancient tabs."
        );
        assert_eq!(
            ancient_message(2, 9, &s),
            "😬 You have 2 tabs older than 7 days. Let them go."
        );
    }

    proptest! {
        #[test]
        fn count_message_is_total_and_deterministic(count in 0usize..10_000, limit in 1u32..500) {
            for tone in [Tone::Nice, Tone::Firm, Tone::Unhinged] {
                let s = with_tone(tone, limit);
                let a = count_message(count, &s);
                let b = count_message(count, &s);
                prop_assert_eq!(a, b);
                prop_assert!(!a.is_empty());
            }
        }

        #[test]
        fn higher_counts_never_soften_the_firm_tier(count in 0usize..1000, limit in 1u32..100) {
            // Tier index is non-decreasing in count.
            let s = with_tone(Tone::Firm, limit);
            let tier = |c: usize| -> u8 {
                match count_message(c, &s) {
                    "🙂 You are still a good person." => 0,
                    "😒 Be honest. You won't read all of these." => 1,
                    "😬 You've lost control of the situation." => 2,
                    _ => 3,
                }
            };
            prop_assert!(tier(count + 1) >= tier(count));
        }

        #[test]
        fn age_in_days_matches_floor_division(offset_ms in -10i64 * DAY_MS..10 * DAY_MS) {
            let now = Utc::now();
            let opened = now - chrono::Duration::milliseconds(offset_ms);
            prop_assert_eq!(age_in_days(opened, now), offset_ms.div_euclid(DAY_MS));
        }
    }
}
