// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout session: the group's in-memory state plus the active user.
//!
//! Handles the core workflow:
//! 1. Load the group snapshot (falling back to the default users)
//! 2. Save or delete the active user's entry for a date key
//! 3. Update that user's running counters
//! 4. Replicate the new snapshot in the background (last write wins)

use crate::config::SessionContext;
use crate::error::{AppError, Result};
use crate::models::{
    default_users, recompute_counters, Counters, Entry, EntryChange, EntryDraft, Message, User,
};
use crate::services::calendar::{build_year_calendar, day_view, CalendarMonth, DayView};
use crate::services::consistency::{build_consistency_grid, ConsistencyMonth};
use crate::services::leaderboard::{rank, Standing};
use crate::sync::{SnapshotClient, SyncDispatcher};
use crate::time_utils::{local_midnight, parse_date_key, reference_date, to_date_key, to_local_date_key};
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Result of saving an entry.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub entry: Entry,
    /// `false` when an existing entry was overwritten
    pub was_new: bool,
    pub counters: Counters,
}

pub struct WorkoutSession {
    users: Vec<User>,
    /// Index into `users`; users are never removed.
    active: usize,
    context: SessionContext,
    sync: SyncDispatcher,
}

impl WorkoutSession {
    /// Build a session from an already-loaded user list.
    pub fn new(users: Vec<User>, context: SessionContext, sync: SyncDispatcher) -> Self {
        let users = if users.is_empty() {
            default_users()
        } else {
            users
        };

        let active = context
            .active_user
            .as_deref()
            .and_then(|name| users.iter().position(|user| user.name == name))
            .unwrap_or(0);

        Self {
            users,
            active,
            context,
            sync,
        }
    }

    /// Load the snapshot through `client` and start a session.
    ///
    /// A failed or empty load starts from the default users.
    pub async fn load(client: SnapshotClient, context: SessionContext) -> Self {
        let users = match client.load_users().await {
            Ok(users) if !users.is_empty() => users,
            Ok(_) => {
                tracing::info!("Snapshot is empty, seeding default users");
                default_users()
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    code = e.error_code(),
                    "Failed to load snapshot, using default users"
                );
                default_users()
            }
        };

        let session = Self::new(users, context, SyncDispatcher::new(client));
        tracing::info!(
            users = session.users.len(),
            active_user = %session.active_user().name,
            reference_year = session.context.reference_year,
            "Session loaded"
        );
        session
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn active_user(&self) -> &User {
        &self.users[self.active]
    }

    /// Switch the active user by name.
    pub fn select_user(&mut self, name: &str) -> Result<()> {
        let index = self
            .users
            .iter()
            .position(|user| user.name == name)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", name)))?;
        self.active = index;
        self.context.active_user = Some(name.to_string());
        Ok(())
    }

    /// "Today" for this session (never before the reference year).
    pub fn reference_date(&self) -> DateTime<Utc> {
        reference_date(self.context.clock.now(), self.context.reference_year)
    }

    pub fn reference_key(&self) -> String {
        to_local_date_key(self.reference_date())
    }

    /// The active user's entry for `date_key`.
    pub fn entry_for(&self, date_key: &str) -> Result<Option<&Entry>> {
        let key = canonical_key(date_key)?.1;
        Ok(self.active_user().entries.lookup(&key))
    }

    /// Which view opening `date_key` should show for the active user.
    pub fn day_view(&self, date_key: &str) -> Result<DayView> {
        let key = canonical_key(date_key)?.1;
        let logged = self.active_user().entries.contains(&key);
        Ok(day_view(&key, &self.reference_key(), logged))
    }

    /// Create or overwrite the active user's entry for `date_key`.
    ///
    /// The reference date is stamped with the current moment; any other date
    /// with its local midnight.
    pub fn save_entry(&mut self, date_key: &str, draft: EntryDraft) -> Result<SaveOutcome> {
        let (date, key) = canonical_key(date_key)?;
        let reference = self.reference_date();
        let time = if key == to_local_date_key(reference) {
            reference
        } else {
            local_midnight(date)
        };

        let user = &mut self.users[self.active];
        let (entry, was_new) = user.entries.upsert(&key, draft, time);
        let change = if was_new {
            EntryChange::Created(entry.intensity.clone())
        } else {
            EntryChange::Edited
        };
        let counters = recompute_counters(user.counters(), &change);
        user.set_counters(counters);

        tracing::info!(
            user = %user.name,
            date_key = %key,
            was_new,
            intensity = %entry.intensity,
            "Entry saved"
        );
        tracing::debug!(
            total = counters.total,
            streak = counters.streak,
            badges = counters.badges,
            "Counters updated"
        );

        self.sync.dispatch(self.users.clone());

        Ok(SaveOutcome {
            entry,
            was_new,
            counters,
        })
    }

    /// Delete the active user's entry for `date_key`.
    ///
    /// A missing entry is `NotFound` and leaves the counters untouched.
    pub fn delete_entry(&mut self, date_key: &str) -> Result<Entry> {
        let key = canonical_key(date_key)?.1;

        let user = &mut self.users[self.active];
        let removed = user
            .entries
            .remove(&key)
            .ok_or_else(|| AppError::NotFound(format!("No entry for {} on {}", user.name, key)))?;

        let counters = recompute_counters(
            user.counters(),
            &EntryChange::Deleted(removed.intensity.clone()),
        );
        user.set_counters(counters);

        tracing::info!(user = %user.name, date_key = %key, "Entry deleted");
        tracing::debug!(
            total = counters.total,
            streak = counters.streak,
            badges = counters.badges,
            "Counters updated"
        );

        self.sync.dispatch(self.users.clone());

        Ok(removed)
    }

    /// Leaderboard for the reference year.
    pub fn leaderboard(&self) -> Vec<Standing<'_>> {
        rank(&self.users, self.context.reference_year)
    }

    /// Consistency grid of `name` for the reference year.
    pub fn consistency_grid(&self, name: &str) -> Result<Vec<ConsistencyMonth>> {
        let user = self
            .users
            .iter()
            .find(|user| user.name == name)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", name)))?;
        Ok(build_consistency_grid(&user.entries, self.context.reference_year))
    }

    /// The active user's calendar for the reference year.
    pub fn year_calendar(&self) -> Vec<CalendarMonth> {
        let today = self.reference_date().with_timezone(&Local).date_naive();
        build_year_calendar(
            &self.active_user().entries,
            self.context.reference_year,
            today,
        )
    }

    /// Recent group chat, oldest first.
    pub async fn messages(&self) -> Result<Vec<Message>> {
        self.sync.client().load_messages(self.context.clock.now()).await
    }

    /// Post `text` to the group chat as the active user.
    pub async fn send_message(&self, text: &str) -> Result<Message> {
        let sender = &self.active_user().name;
        let message = self.sync.client().post_message(sender, text).await?;
        tracing::info!(user = %message.user, id = %message.id, "Chat message sent");
        Ok(message)
    }

    /// Wait for the latest background save.
    pub async fn flush(&mut self) {
        self.sync.flush().await;
    }
}

/// Validate a date key and return its date and zero-padded form.
fn canonical_key(date_key: &str) -> Result<(NaiveDate, String)> {
    let date = parse_date_key(date_key)?;
    Ok((date, to_date_key(&date)))
}
