// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the group snapshot API.
//!
//! Handles:
//! - Loading the full user list (`GET /api/users`)
//! - Bulk upserting the full user list (`PUT /api/users`)
//! - Health checks (`GET /api/health`)
//! - Reading and posting group chat messages (`/api/messages`)

use crate::error::{AppError, Result};
use crate::models::message::recent_messages;
use crate::models::{Message, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot API client.
///
/// An offline client (no HTTP transport) fails every call with `SyncFailure`.
#[derive(Clone)]
pub struct SnapshotClient {
    http: Option<reqwest::Client>,
    base_url: String,
}

/// The remote answers with either a bare array or `{ "users": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum UsersPayload {
    List(Vec<User>),
    Wrapped { users: Vec<User> },
}

impl From<UsersPayload> for Vec<User> {
    fn from(payload: UsersPayload) -> Self {
        match payload {
            UsersPayload::List(users) | UsersPayload::Wrapped { users } => users,
        }
    }
}

#[derive(Serialize)]
struct SaveUsersBody<'a> {
    users: Vec<&'a User>,
}

#[derive(Serialize)]
struct PostMessageBody<'a> {
    user: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct HealthResponse {
    #[serde(default)]
    ok: bool,
}

impl SnapshotClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:4000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client that never touches the network.
    pub fn new_offline() -> Self {
        Self {
            http: None,
            base_url: String::new(),
        }
    }

    pub fn is_online(&self) -> bool {
        self.http.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_http(&self) -> Result<&reqwest::Client> {
        self.http
            .as_ref()
            .ok_or_else(|| AppError::SyncFailure("Snapshot client is offline".to_string()))
    }

    /// Ask the remote for its health; `true` when it reports `{ "ok": true }`.
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .get_http()?
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SyncFailure(e.to_string()))?;

        let health: HealthResponse = check_response_json(response).await?;
        Ok(health.ok)
    }

    /// Load the full user list.
    pub async fn load_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/api/users", self.base_url);
        let response = self
            .get_http()?
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SyncFailure(e.to_string()))?;

        let payload: UsersPayload = check_response_json(response).await?;
        let users: Vec<User> = payload.into();
        tracing::debug!(count = users.len(), "Loaded user snapshot");
        Ok(users)
    }

    /// Upsert the full user list by name; returns the remote's resulting list.
    ///
    /// Users without a name are skipped since they have no upsert key.
    pub async fn save_users(&self, users: &[User]) -> Result<Vec<User>> {
        let url = format!("{}/api/users", self.base_url);
        let body = SaveUsersBody {
            users: users
                .iter()
                .filter(|user| !user.name.trim().is_empty())
                .collect(),
        };

        let response = self
            .get_http()?
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::SyncFailure(e.to_string()))?;

        let payload: UsersPayload = check_response_json(response).await?;
        Ok(payload.into())
    }

    /// Load the chat as of `now`: messages from the last week, oldest first.
    pub async fn load_messages(&self, now: DateTime<Utc>) -> Result<Vec<Message>> {
        let url = format!("{}/api/messages", self.base_url);
        let response = self
            .get_http()?
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::SyncFailure(e.to_string()))?;

        let messages: Vec<Message> = check_response_json(response).await?;
        let messages = recent_messages(messages, now);
        tracing::debug!(count = messages.len(), "Loaded chat messages");
        Ok(messages)
    }

    /// Post a chat message; returns the message as stored by the remote.
    ///
    /// Sender and text are trimmed and must both be non-empty.
    pub async fn post_message(&self, user: &str, text: &str) -> Result<Message> {
        let body = PostMessageBody {
            user: user.trim(),
            text: text.trim(),
        };
        if body.user.is_empty() || body.text.is_empty() {
            return Err(AppError::BadRequest(
                "User and text are required".to_string(),
            ));
        }

        let url = format!("{}/api/messages", self.base_url);
        let response = self
            .get_http()?
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::SyncFailure(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::SyncFailure(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::SyncFailure(format!("JSON parse error: {}", e)))
}
