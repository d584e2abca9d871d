// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user map from date key to workout entry.
//!
//! Serialized as a JSON array, newest entries first. Keys are unique: an
//! inbound array with repeated date keys keeps the first occurrence.

use crate::models::entry::{Entry, EntryDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `date_key`.
    ///
    /// Returns the stored entry and `true` when it was newly created. An edit
    /// keeps the entry's position; a new entry goes first.
    pub fn upsert(&mut self, date_key: &str, draft: EntryDraft, time: DateTime<Utc>) -> (Entry, bool) {
        let entry = Entry::from_draft(date_key, draft, time);

        match self.position(date_key) {
            Some(index) => {
                self.entries[index] = entry.clone();
                (entry, false)
            }
            None => {
                self.entries.insert(0, entry.clone());
                (entry, true)
            }
        }
    }

    /// Remove and return the entry for `date_key`, if any.
    pub fn remove(&mut self, date_key: &str) -> Option<Entry> {
        self.position(date_key).map(|index| self.entries.remove(index))
    }

    pub fn lookup(&self, date_key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.date_key == date_key)
    }

    pub fn contains(&self, date_key: &str) -> bool {
        self.position(date_key).is_some()
    }

    /// Number of entries whose date key falls in `year`.
    pub fn count_in_year(&self, year: i32) -> usize {
        let prefix = format!("{}-", year);
        self.entries
            .iter()
            .filter(|entry| entry.date_key.starts_with(&prefix))
            .count()
    }

    /// All date keys with an entry.
    pub fn date_keys(&self) -> HashSet<&str> {
        self.entries.iter().map(|entry| entry.date_key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, date_key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.date_key == date_key)
    }
}

impl From<Vec<Entry>> for EntryStore {
    fn from(entries: Vec<Entry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.date_key.clone()))
            .collect();
        Self { entries }
    }
}

impl Serialize for EntryStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EntryStore {
    /// A missing or non-array value yields an empty store.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        match raw {
            Some(serde_json::Value::Array(items)) => {
                let entries: Vec<Entry> = serde_json::from_value(serde_json::Value::Array(items))
                    .map_err(serde::de::Error::custom)?;
                Ok(EntryStore::from(entries))
            }
            _ => Ok(EntryStore::default()),
        }
    }
}
