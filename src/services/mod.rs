// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calendar;
pub mod consistency;
pub mod leaderboard;
pub mod session;

pub use calendar::{build_year_calendar, day_view, CalendarDay, CalendarMonth, DayStatus, DayView};
pub use consistency::{build_consistency_grid, ConsistencyCell, ConsistencyMonth};
pub use leaderboard::{rank, Standing};
pub use session::{SaveOutcome, WorkoutSession};
