// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Year-long workout consistency grid.
//!
//! Twelve month buckets, each a list of Monday-first weeks. Cells outside the
//! month are `Empty` placeholders, never "missed" days.

use crate::models::EntryStore;
use crate::time_utils::{days_in_month, to_date_key};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MONTH_SHORT_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One slot of a week row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyCell {
    #[default]
    Empty,
    Day {
        date: NaiveDate,
        date_key: String,
        done: bool,
    },
}

impl ConsistencyCell {
    pub fn is_done(&self) -> bool {
        matches!(self, ConsistencyCell::Day { done: true, .. })
    }
}

/// One month of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ConsistencyMonth {
    /// "YYYY-M" (month not zero-padded)
    pub key: String,
    /// 1-based month number
    pub month: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub label: &'static str,
    pub weeks: Vec<[ConsistencyCell; 7]>,
}

impl ConsistencyMonth {
    /// Non-placeholder cells in calendar order.
    pub fn days(&self) -> impl Iterator<Item = &ConsistencyCell> {
        self.weeks
            .iter()
            .flat_map(|week| week.iter())
            .filter(|cell| !matches!(cell, ConsistencyCell::Empty))
    }

    pub fn done_days(&self) -> usize {
        self.days().filter(|cell| cell.is_done()).count()
    }
}

/// Build the consistency grid of `store` for `year`.
pub fn build_consistency_grid(store: &EntryStore, year: i32) -> Vec<ConsistencyMonth> {
    let completed = store.date_keys();

    (1..=12u32)
        .map(|month| {
            let mut weeks = Vec::new();
            let mut week: [ConsistencyCell; 7] = Default::default();

            for day in 1..=days_in_month(year, month) {
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                let slot = date.weekday().num_days_from_monday() as usize;
                let date_key = to_date_key(&date);
                let done = completed.contains(date_key.as_str());

                week[slot] = ConsistencyCell::Day {
                    date,
                    date_key,
                    done,
                };

                if slot == 6 {
                    weeks.push(std::mem::take(&mut week));
                }
            }

            if week.iter().any(|cell| !matches!(cell, ConsistencyCell::Empty)) {
                weeks.push(week);
            }

            ConsistencyMonth {
                key: format!("{}-{}", year, month),
                month,
                label: MONTH_SHORT_LABELS[(month - 1) as usize],
                weeks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDraft;
    use chrono::Utc;

    #[test]
    fn test_single_entry_marks_one_day() {
        let mut store = EntryStore::new();
        store.upsert("2026-01-01", EntryDraft::new("Run", "30", "Focused"), Utc::now());

        let grid = build_consistency_grid(&store, 2026);

        assert_eq!(grid.len(), 12);
        let days: Vec<&ConsistencyCell> = grid.iter().flat_map(|m| m.days()).collect();
        assert_eq!(days.len(), 365);
        assert_eq!(days.iter().filter(|c| c.is_done()).count(), 1);
        assert!(days[0].is_done());
    }

    #[test]
    fn test_weeks_start_monday_with_placeholders() {
        let grid = build_consistency_grid(&EntryStore::new(), 2026);
        let january = &grid[0];

        // 2026-01-01 is a Thursday
        let first_week = &january.weeks[0];
        assert_eq!(first_week[0], ConsistencyCell::Empty);
        assert_eq!(first_week[2], ConsistencyCell::Empty);
        assert!(matches!(
            &first_week[3],
            ConsistencyCell::Day { date_key, done: false, .. } if date_key == "2026-01-01"
        ));
        assert_eq!(january.key, "2026-1");
        assert_eq!(january.label, "Jan");
        assert_eq!(january.weeks.len(), 5);

        // 2026-01-31 is a Saturday, so Sunday is a trailing placeholder
        let last_week = january.weeks.last().unwrap();
        assert_eq!(last_week[6], ConsistencyCell::Empty);
    }

    #[test]
    fn test_february_and_leap_year() {
        let grid_2026 = build_consistency_grid(&EntryStore::new(), 2026);
        assert_eq!(grid_2026[1].days().count(), 28);

        let grid_2024 = build_consistency_grid(&EntryStore::new(), 2024);
        assert_eq!(grid_2024[1].days().count(), 29);
        assert_eq!(grid_2024[11].label, "Dec");
    }

    #[test]
    fn test_entries_outside_year_ignored() {
        let mut store = EntryStore::new();
        store.upsert("2025-12-31", EntryDraft::default(), Utc::now());

        let grid = build_consistency_grid(&store, 2026);
        assert_eq!(grid.iter().map(|m| m.done_days()).sum::<usize>(), 0);
    }

    #[test]
    fn test_grid_is_deterministic() {
        let mut store = EntryStore::new();
        store.upsert("2026-05-10", EntryDraft::default(), Utc::now());
        store.upsert("2026-05-11", EntryDraft::default(), Utc::now());

        assert_eq!(
            build_consistency_grid(&store, 2026),
            build_consistency_grid(&store, 2026)
        );
    }
}
