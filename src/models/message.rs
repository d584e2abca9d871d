// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Group chat message as served by the messages API.
//!
//! The remote keeps messages for a week; the same window is applied locally
//! so stale messages drop out between reloads.

use crate::models::entry::{nullable_string, parse_time_value, serialize_time};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// How long a message stays visible.
pub const MESSAGE_TTL_DAYS: i64 = 7;

const UNKNOWN_SENDER: &str = "Unknown";

static LOCAL_ID_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MessageRecord")]
pub struct Message {
    pub id: String,
    pub user: String,
    pub text: String,
    #[serde(serialize_with = "serialize_time")]
    pub time: DateTime<Utc>,
}

/// Inbound shape. Older records carry `_id` and `createdAt`/`created_at`
/// instead of `id` and `time`.
#[derive(Deserialize)]
struct MessageRecord {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<Value>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    text: String,
    #[serde(default)]
    time: Option<Value>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<Value>,
    #[serde(default, rename = "created_at")]
    created_at_snake: Option<Value>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        // The first present timestamp wins; if it is unreadable, use now.
        let time = [record.time, record.created_at, record.created_at_snake]
            .into_iter()
            .flatten()
            .next()
            .and_then(|value| parse_time_value(&value))
            .unwrap_or_else(Utc::now);

        let id = [record.id, record.legacy_id]
            .into_iter()
            .flatten()
            .find_map(|value| id_string(&value))
            .unwrap_or_else(|| local_id(time));

        Self {
            id,
            user: record.user.unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            text: record.text,
            time,
        }
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Id for a message the remote returned without one.
fn local_id(time: DateTime<Utc>) -> String {
    let seq = LOCAL_ID_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{:x}", time.timestamp_millis(), seq)
}

/// Keep messages no older than the TTL window before `now`.
pub fn filter_recent(messages: Vec<Message>, now: DateTime<Utc>) -> Vec<Message> {
    let ttl = Duration::days(MESSAGE_TTL_DAYS);
    messages
        .into_iter()
        .filter(|message| now - message.time <= ttl)
        .collect()
}

/// Oldest first; equal timestamps keep their order.
pub fn sort_by_time(messages: &mut [Message]) {
    messages.sort_by_key(|message| message.time);
}

/// The chat as shown: recent messages, oldest first.
pub fn recent_messages(messages: Vec<Message>, now: DateTime<Utc>) -> Vec<Message> {
    let mut recent = filter_recent(messages, now);
    sort_by_time(&mut recent);
    recent
}
