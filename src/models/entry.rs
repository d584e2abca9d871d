// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout entry model and its snapshot wire format.

use crate::time_utils::{
    format_utc_rfc3339_millis, local_midnight, parse_date_key, to_date_key, to_local_date_key,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Longest duration an entry can record (23:59).
const MAX_DURATION_MINUTES: u64 = 23 * 60 + 59;

/// How hard a workout was. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intensity {
    #[default]
    Focused,
    BeastMode,
    Other(String),
}

impl Intensity {
    pub fn as_str(&self) -> &str {
        match self {
            Intensity::Focused => "Focused",
            Intensity::BeastMode => "Beast mode",
            Intensity::Other(label) => label,
        }
    }

    /// Beast-mode workouts earn a badge.
    pub fn earns_badge(&self) -> bool {
        matches!(self, Intensity::BeastMode)
    }
}

impl From<String> for Intensity {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Focused" => Intensity::Focused,
            "Beast mode" => Intensity::BeastMode,
            _ => Intensity::Other(label),
        }
    }
}

impl From<&str> for Intensity {
    fn from(label: &str) -> Self {
        Intensity::from(label.to_string())
    }
}

impl From<Intensity> for String {
    fn from(intensity: Intensity) -> Self {
        match intensity {
            Intensity::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied fields of an entry, before trimming and normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryDraft {
    #[serde(default)]
    pub workout: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub notes: String,
}

impl EntryDraft {
    pub fn new(
        workout: impl Into<String>,
        duration: impl Into<String>,
        intensity: impl Into<Intensity>,
    ) -> Self {
        Self {
            workout: workout.into(),
            duration: duration.into(),
            intensity: intensity.into(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A logged workout. At most one exists per user and date key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryRecord")]
pub struct Entry {
    pub workout: String,
    /// Normalized "HH:MM"; empty when no duration was given.
    pub duration: String,
    pub intensity: Intensity,
    pub notes: String,
    #[serde(rename = "dateKey")]
    pub date_key: String,
    #[serde(serialize_with = "serialize_time")]
    pub time: DateTime<Utc>,
    /// Fields this crate does not interpret, passed through on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Build an entry from a draft, trimming text and normalizing the duration.
    pub fn from_draft(date_key: &str, draft: EntryDraft, time: DateTime<Utc>) -> Self {
        Self {
            workout: draft.workout.trim().to_string(),
            duration: normalize_duration(draft.duration.trim()),
            intensity: draft.intensity,
            notes: draft.notes.trim().to_string(),
            date_key: date_key.to_string(),
            time,
            extra: Map::new(),
        }
    }

    /// Duration in minutes, or 0 when none was recorded.
    pub fn duration_minutes(&self) -> u64 {
        parse_duration_minutes(&self.duration)
    }
}

pub(crate) fn serialize_time<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_utc_rfc3339_millis(*time))
}

/// Inbound shape of an entry. Every field is optional; `time` may be an
/// epoch-millis number or an ISO string.
#[derive(Deserialize)]
struct EntryRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    workout: String,
    #[serde(default, deserialize_with = "nullable_string")]
    duration: String,
    #[serde(default)]
    intensity: Option<Intensity>,
    #[serde(default, deserialize_with = "nullable_string")]
    notes: String,
    #[serde(rename = "dateKey", default)]
    date_key: Option<String>,
    #[serde(default)]
    time: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        let time = resolve_time(record.time.as_ref(), record.date_key.as_deref());
        let date_key = record
            .date_key
            .filter(|key| !key.is_empty())
            .map(canonical_date_key)
            .unwrap_or_else(|| to_local_date_key(time));

        Self {
            workout: record.workout,
            duration: record.duration,
            intensity: record.intensity.unwrap_or_default(),
            notes: record.notes,
            date_key,
            time,
            extra: record.extra,
        }
    }
}

/// Zero-pad a parseable key; anything else is kept verbatim.
fn canonical_date_key(key: String) -> String {
    match parse_date_key(&key) {
        Ok(date) => to_date_key(&date),
        Err(_) => key,
    }
}

/// Entry time from the stored value, else the date key's local midnight, else now.
fn resolve_time(raw: Option<&Value>, date_key: Option<&str>) -> DateTime<Utc> {
    raw.and_then(parse_time_value)
        .or_else(|| {
            date_key
                .and_then(|key| parse_date_key(key).ok())
                .map(local_midnight)
        })
        .unwrap_or_else(Utc::now)
}

pub(crate) fn parse_time_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .filter(|millis| *millis != 0)
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) if !s.is_empty() => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| parse_date_key(s).ok().map(local_midnight)),
        _ => None,
    }
}

pub(crate) fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Duration ────────────────────────────────────────────────

/// Parse a free-form duration into minutes.
///
/// Accepts "H:MM", or the first two digit runs as hours and minutes
/// ("1h 30m"), or a single digit run as minutes ("45").
pub fn parse_duration_minutes(value: &str) -> u64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Some((hours, rest)) = trimmed.split_once(':') {
        let minutes = rest.split(':').next().unwrap_or("");
        if let (Some(h), Some(m)) = (numeric_part(hours), numeric_part(minutes)) {
            return h.saturating_mul(60).saturating_add(m);
        }
    }

    let runs: Vec<u64> = trimmed
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u64>().unwrap_or(u64::MAX))
        .collect();

    match runs.as_slice() {
        [] => 0,
        [minutes] => *minutes,
        [hours, minutes, ..] => hours.saturating_mul(60).saturating_add(*minutes),
    }
}

/// A blank part counts as zero; anything non-numeric rejects the colon form.
fn numeric_part(part: &str) -> Option<u64> {
    let part = part.trim();
    if part.is_empty() {
        Some(0)
    } else {
        part.parse().ok()
    }
}

/// Format minutes as "HH:MM", clamped to 00:00..=23:59.
pub fn format_duration(minutes: u64) -> String {
    let clamped = minutes.min(MAX_DURATION_MINUTES);
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

/// Normalize user input to "HH:MM". Empty input stays empty.
pub fn normalize_duration(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format_duration(parse_duration_minutes(value))
}
