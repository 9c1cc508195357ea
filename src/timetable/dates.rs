//! Occurrence-date expansion for weekly recurring classes.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Expands a class-commencement anchor into its weekly occurrence dates.
///
/// Steps forward from `start` in 7-day increments, skipping any date in
/// `excluded`, until exactly `week_count` dates have been collected. Skipped
/// weeks do not count toward the total, so exclusions push the sequence past
/// `start + 7 * week_count` days.
///
/// # Arguments
/// * `start` - Anchor date; `None` yields an empty sequence
/// * `week_count` - Number of occurrence dates to produce
/// * `excluded` - Calendar dates to skip
///
/// # Returns
/// Strictly increasing dates, exactly `week_count` of them unless
/// `week_count < 1` or `start` is missing.
pub fn expand(
    start: Option<NaiveDate>,
    week_count: i64,
    excluded: &HashSet<NaiveDate>,
) -> Vec<NaiveDate> {
    let Some(start) = start else {
        return Vec::new();
    };

    if week_count < 1 {
        return Vec::new();
    }

    let mut dates = Vec::with_capacity(week_count as usize);
    let mut current = start;

    while (dates.len() as i64) < week_count {
        if !excluded.contains(&current) {
            dates.push(current);
        }
        current += Duration::days(7);
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_expands_weekly_from_anchor() {
        let dates = expand(Some(date("2026-02-09")), 2, &HashSet::new());
        assert_eq!(dates, vec![date("2026-02-09"), date("2026-02-16")]);
    }

    #[test]
    fn test_exclusion_skips_week_and_extends() {
        let excluded: HashSet<_> = [date("2026-02-16")].into_iter().collect();
        let dates = expand(Some(date("2026-02-09")), 2, &excluded);
        assert_eq!(dates, vec![date("2026-02-09"), date("2026-02-23")]);
    }

    #[test]
    fn test_excluded_anchor_not_included() {
        let excluded: HashSet<_> = [date("2026-02-09")].into_iter().collect();
        let dates = expand(Some(date("2026-02-09")), 2, &excluded);
        assert_eq!(dates, vec![date("2026-02-16"), date("2026-02-23")]);
    }

    #[test]
    fn test_exact_count_and_strictly_increasing() {
        let excluded: HashSet<_> = [date("2026-03-02"), date("2026-03-23")]
            .into_iter()
            .collect();
        let dates = expand(Some(date("2026-02-09")), 10, &excluded);

        assert_eq!(dates.len(), 10);
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!((pair[1] - pair[0]).num_days() % 7, 0);
        }
        for d in &dates {
            assert!(!excluded.contains(d));
        }
    }

    #[test]
    fn test_zero_week_count_is_empty() {
        assert!(expand(Some(date("2026-02-09")), 0, &HashSet::new()).is_empty());
        assert!(expand(Some(date("2026-02-09")), -3, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_missing_start_is_empty() {
        assert!(expand(None, 5, &HashSet::new()).is_empty());
    }
}
