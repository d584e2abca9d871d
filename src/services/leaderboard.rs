// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Yearly leaderboard.

use crate::models::User;

/// A user's place on the leaderboard.
#[derive(Debug, Clone, Copy)]
pub struct Standing<'a> {
    pub user: &'a User,
    /// Entries logged in the ranked year
    pub year_count: usize,
}

/// Rank users by the number of entries in `year`, most first.
///
/// Ties keep their input order (`sort_by` is stable).
pub fn rank(users: &[User], year: i32) -> Vec<Standing<'_>> {
    let mut standings: Vec<Standing<'_>> = users
        .iter()
        .map(|user| Standing {
            user,
            year_count: user.entries.count_in_year(year),
        })
        .collect();

    standings.sort_by(|a, b| b.year_count.cmp(&a.year_count));
    standings
}
