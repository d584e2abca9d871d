// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user month calendar and the day-view policy.

use crate::models::EntryStore;
use crate::time_utils::{days_in_month, to_date_key};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Status of a calendar day relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Today,
    Done,
    Missed,
    Future,
}

/// Which view opening a day should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum DayView {
    /// Editable form (always on the reference date)
    Form,
    /// Read-only entry details
    Details,
    /// Past day with nothing logged
    Missed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub date_key: String,
    pub status: DayStatus,
    /// Whether an entry exists (also true on a logged "today")
    pub logged: bool,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarMonth {
    /// 1-based month number
    pub month: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub label: &'static str,
    /// Leading `None`s pad the first row to a Monday start.
    pub days: Vec<Option<CalendarDay>>,
}

pub fn day_status(date: NaiveDate, logged: bool, today: NaiveDate) -> DayStatus {
    if date == today {
        DayStatus::Today
    } else if logged {
        DayStatus::Done
    } else if date > today {
        DayStatus::Future
    } else {
        DayStatus::Missed
    }
}

pub fn day_view(date_key: &str, reference_key: &str, logged: bool) -> DayView {
    if date_key == reference_key {
        DayView::Form
    } else if logged {
        DayView::Details
    } else {
        DayView::Missed
    }
}

/// Build the twelve month pages of `year` for one user's entries.
pub fn build_year_calendar(store: &EntryStore, year: i32, today: NaiveDate) -> Vec<CalendarMonth> {
    (1..=12u32)
        .map(|month| {
            let mut days = Vec::new();

            if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
                let offset = first.weekday().num_days_from_monday() as usize;
                days.resize(offset, None);
            }

            for day in 1..=days_in_month(year, month) {
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                let date_key = to_date_key(&date);
                let entry = store.lookup(&date_key);
                let logged = entry.is_some();

                days.push(Some(CalendarDay {
                    date,
                    status: day_status(date, logged, today),
                    logged,
                    duration: entry.map(|e| e.duration.clone()),
                    date_key,
                }));
            }

            CalendarMonth {
                month,
                label: MONTH_LABELS[(month - 1) as usize],
                days,
            }
        })
        .collect()
}
