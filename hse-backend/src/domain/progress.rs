// src/domain/progress.rs
//
// Progress derivation for objectives. Both functions are pure and
// recompute from the full update list on every call: edits and deletes
// of historical updates must change the result retroactively, so no
// incremental counter is kept anywhere.

use chrono::NaiveDate;

/// Program start used as the reference point for planned progress.
pub const PROGRAM_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(date) => date,
    None => panic!("invalid program start date"),
};

/// One progress update as seen by the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub achieved_count: i32,
    /// Percent multiplier; `None` means the default of 100.
    pub efficiency: Option<i32>,
    pub update_date: NaiveDate,
}

/// Progress expected purely from elapsed time between the program start
/// and the objective's target date. Monotonically non-decreasing in `now`.
pub fn planned_progress(target_date: NaiveDate, now: NaiveDate) -> i32 {
    if now < PROGRAM_START {
        return 0;
    }
    if now > target_date {
        return 100;
    }

    let total_days = (target_date - PROGRAM_START).num_days();
    if total_days <= 0 {
        return 100;
    }
    let elapsed_days = (now - PROGRAM_START).num_days();

    let planned = (100.0 * elapsed_days as f64 / total_days as f64).round() as i32;
    planned.clamp(0, 100)
}

/// Efficiency-weighted achieved progress.
///
/// The cumulative achieved count is summed over all updates; the
/// efficiency of the latest update (by date, ties keeping insertion
/// order) scales the raw percentage. `num_activities >= 1` is a
/// precondition enforced when the objective is created.
pub fn effective_progress(updates: &[ProgressUpdate], num_activities: i32) -> i32 {
    if updates.is_empty() || num_activities <= 0 {
        return 0;
    }

    let mut sorted: Vec<&ProgressUpdate> = updates.iter().collect();
    sorted.sort_by_key(|u| u.update_date);

    let cumulative: i64 = sorted.iter().map(|u| u.achieved_count as i64).sum();
    // Raw progress may exceed 100 before clamping
    let raw = 100.0 * cumulative as f64 / num_activities as f64;

    let efficiency = sorted
        .last()
        .and_then(|u| u.efficiency)
        .unwrap_or(100);

    let effective = raw * efficiency as f64 / 100.0;
    effective.min(100.0).round() as i32
}

/// Cumulative achieved count across all updates.
pub fn cumulative_achieved(updates: &[ProgressUpdate]) -> i64 {
    updates.iter().map(|u| u.achieved_count as i64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn update(achieved: i32, efficiency: Option<i32>, on: NaiveDate) -> ProgressUpdate {
        ProgressUpdate {
            achieved_count: achieved,
            efficiency,
            update_date: on,
        }
    }

    #[test]
    fn test_planned_progress_before_start() {
        assert_eq!(planned_progress(date(2025, 12, 31), date(2024, 12, 31)), 0);
    }

    #[test]
    fn test_planned_progress_at_start() {
        assert_eq!(planned_progress(date(2025, 12, 31), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_planned_progress_midway() {
        // 2025-07-02 is 182 of 364 days into the year
        assert_eq!(planned_progress(date(2025, 12, 31), date(2025, 7, 2)), 50);
    }

    #[test]
    fn test_planned_progress_past_target() {
        assert_eq!(planned_progress(date(2025, 12, 31), date(2026, 1, 1)), 100);
        assert_eq!(planned_progress(date(2025, 3, 31), date(2025, 6, 1)), 100);
    }

    #[test]
    fn test_planned_progress_monotonic() {
        let target = date(2025, 9, 30);
        let mut previous = 0;
        let mut now = date(2024, 11, 15);
        while now < date(2026, 2, 1) {
            let planned = planned_progress(target, now);
            assert!(
                planned >= previous,
                "planned progress decreased at {}: {} < {}",
                now,
                planned,
                previous
            );
            previous = planned;
            now = now.succ_opt().unwrap();
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_effective_progress_no_updates() {
        assert_eq!(effective_progress(&[], 10), 0);
    }

    #[test]
    fn test_effective_progress_simple() {
        let updates = vec![update(5, None, date(2025, 2, 1))];
        assert_eq!(effective_progress(&updates, 10), 50);
    }

    #[test]
    fn test_effective_progress_efficiency_weighting() {
        // num_activities = 20, cumulative 10 (raw 50%), latest efficiency 50 -> 25
        let updates = vec![
            update(5, Some(100), date(2025, 2, 1)),
            update(5, Some(50), date(2025, 3, 1)),
        ];
        assert_eq!(effective_progress(&updates, 20), 25);
    }

    #[test]
    fn test_effective_progress_uses_latest_efficiency_by_date() {
        // The later-dated update decides the efficiency regardless of slice order
        let updates = vec![
            update(5, Some(50), date(2025, 3, 1)),
            update(5, Some(100), date(2025, 2, 1)),
        ];
        assert_eq!(effective_progress(&updates, 20), 25);
    }

    #[test]
    fn test_effective_progress_ties_keep_insertion_order() {
        let day = date(2025, 4, 1);
        let updates = vec![update(2, Some(100), day), update(2, Some(80), day)];
        // Stable sort: the second entry stays latest
        assert_eq!(effective_progress(&updates, 10), 32);
    }

    #[test]
    fn test_effective_progress_zero_count_append_is_noop() {
        let base = vec![
            update(3, Some(80), date(2025, 2, 1)),
            update(4, Some(80), date(2025, 3, 1)),
        ];
        let before = effective_progress(&base, 20);

        let mut appended = base.clone();
        appended.push(update(0, Some(80), date(2025, 4, 1)));
        assert_eq!(effective_progress(&appended, 20), before);
    }

    #[test]
    fn test_effective_progress_clamps_at_100() {
        let updates = vec![
            update(15, Some(100), date(2025, 2, 1)),
            update(10, Some(100), date(2025, 3, 1)),
        ];
        // Cumulative 25 of 20 (raw 125%) clamps to exactly 100
        assert_eq!(effective_progress(&updates, 20), 100);
    }

    #[test]
    fn test_effective_progress_default_efficiency() {
        let updates = vec![update(10, None, date(2025, 2, 1))];
        assert_eq!(effective_progress(&updates, 20), 50);
    }

    #[test]
    fn test_cumulative_achieved() {
        let updates = vec![
            update(3, None, date(2025, 2, 1)),
            update(4, None, date(2025, 3, 1)),
        ];
        assert_eq!(cumulative_achieved(&updates), 7);
    }
}
