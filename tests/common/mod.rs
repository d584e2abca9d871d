// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use fitquest::config::{Clock, SessionContext};
use fitquest::models::default_users;
use fitquest::sync::{SnapshotClient, SyncDispatcher};
use fitquest::WorkoutSession;

/// Noon UTC on the given day of 2026.
#[allow(dead_code)]
pub fn noon(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, 12, 0, 0)
        .single()
        .expect("valid test date")
}

/// Session context pinned to a fixed instant.
#[allow(dead_code)]
pub fn fixed_context(now: DateTime<Utc>) -> SessionContext {
    SessionContext::default().with_clock(Clock::Fixed(now))
}

/// Session over the default users that never syncs.
#[allow(dead_code)]
pub fn offline_session(now: DateTime<Utc>) -> WorkoutSession {
    WorkoutSession::new(
        default_users(),
        fixed_context(now),
        SyncDispatcher::new(SnapshotClient::new_offline()),
    )
}

/// Snapshot body as the remote API returns it.
#[allow(dead_code)]
pub fn remote_snapshot() -> serde_json::Value {
    serde_json::json!([
        {
            "name": "Jahnvi", "initials": "JA", "color": "coral", "vibe": "Strength + dance",
            "total": 2, "streak": 2, "badges": 1,
            "entries": [
                { "workout": "Dance", "duration": "00:40", "intensity": "Beast mode", "notes": "",
                  "dateKey": "2026-02-14", "time": "2026-02-14T18:00:00.000Z" },
                { "workout": "Squats", "duration": "00:25", "intensity": "Focused", "notes": "legs",
                  "dateKey": "2026-02-10", "time": null }
            ],
            "createdAt": "2026-01-01T00:00:00.000Z",
            "updatedAt": "2026-02-14T18:00:01.000Z"
        },
        {
            "name": "Divesh", "initials": "DI", "color": "mint", "vibe": "Cardio + core",
            "total": 1, "streak": 1, "badges": 0,
            "entries": [
                { "workout": "Run", "duration": "00:30", "intensity": "Focused", "notes": "",
                  "dateKey": "2026-02-11", "time": 1770796800000_i64 }
            ]
        },
        {
            "name": "Paresh", "initials": "PA", "color": "sun", "vibe": "Mobility + strength",
            "total": 0, "streak": 0, "badges": 0, "entries": []
        }
    ])
}
