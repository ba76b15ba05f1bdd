//! Decides whether an entry is due for a check in this run.

use chrono::{Days, NaiveDate};

/// Days after which a checked entry becomes stale.
pub const DEFAULT_RECHECK_INTERVAL_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessGate {
    interval_days: u32,
}

impl Default for StalenessGate {
    fn default() -> Self {
        Self::new(DEFAULT_RECHECK_INTERVAL_DAYS)
    }
}

impl StalenessGate {
    pub fn new(interval_days: u32) -> Self {
        Self { interval_days }
    }

    /// Due when forced, never checked, or last checked at least `interval_days` ago.
    /// A check date in the future (clock skew) is not due.
    pub fn is_due(&self, last_checked_at: Option<NaiveDate>, force: bool, today: NaiveDate) -> bool {
        if force {
            return true;
        }
        match last_checked_at {
            None => true,
            Some(last) => (today - last).num_days() >= i64::from(self.interval_days),
        }
    }

    /// First date on which an entry checked on `last_checked_at` becomes due.
    pub fn next_due(&self, last_checked_at: Option<NaiveDate>) -> Option<NaiveDate> {
        last_checked_at?.checked_add_days(Days::new(u64::from(self.interval_days)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn never_checked_is_always_due() {
        let g = StalenessGate::default();
        assert!(g.is_due(None, false, d(2024, 6, 1)));
        assert!(g.is_due(None, true, d(2024, 6, 1)));
    }

    #[test]
    fn recent_checks_are_skipped_until_seven_days() {
        let g = StalenessGate::default();
        let today = d(2024, 6, 10);
        for ago in 0..7u64 {
            let last = today.checked_sub_days(Days::new(ago)).unwrap();
            assert!(!g.is_due(Some(last), false, today), "{ago} days ago");
        }
        assert!(g.is_due(Some(d(2024, 6, 3)), false, today));
        assert!(g.is_due(Some(d(2023, 1, 1)), false, today));
    }

    #[test]
    fn force_overrides_recent_check() {
        let g = StalenessGate::default();
        let today = d(2024, 6, 10);
        assert!(g.is_due(Some(today), true, today));
    }

    #[test]
    fn future_check_date_is_not_due() {
        let g = StalenessGate::default();
        assert!(!g.is_due(Some(d(2024, 7, 1)), false, d(2024, 6, 10)));
    }

    #[test]
    fn custom_interval_and_next_due() {
        let g = StalenessGate::new(1);
        assert!(g.is_due(Some(d(2024, 6, 9)), false, d(2024, 6, 10)));
        assert_eq!(g.next_due(Some(d(2024, 6, 9))), Some(d(2024, 6, 10)));
        assert_eq!(StalenessGate::default().next_due(None), None);
    }
}
