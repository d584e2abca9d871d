// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fire-and-forget snapshot replication.
//!
//! Each dispatch spawns one save on the current tokio runtime and aborts a
//! save that is still in flight, so the newest snapshot wins. Failures are
//! logged and dropped; the local session state is authoritative.

use crate::models::User;
use crate::sync::SnapshotClient;
use tokio::task::JoinHandle;

pub struct SyncDispatcher {
    client: SnapshotClient,
    in_flight: Option<JoinHandle<()>>,
}

impl SyncDispatcher {
    pub fn new(client: SnapshotClient) -> Self {
        Self {
            client,
            in_flight: None,
        }
    }

    pub fn client(&self) -> &SnapshotClient {
        &self.client
    }

    /// Whether a save has been spawned and not yet finished.
    pub fn has_pending(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Replicate `users` in the background, superseding any unfinished save.
    pub fn dispatch(&mut self, users: Vec<User>) {
        if !self.client.is_online() {
            tracing::debug!(users = users.len(), "Offline, snapshot kept local");
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime available, snapshot not synced");
                return;
            }
        };

        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                previous.abort();
                tracing::debug!("Superseded in-flight snapshot save");
            }
        }

        let client = self.client.clone();
        self.in_flight = Some(runtime.spawn(async move {
            match client.save_users(&users).await {
                Ok(saved) => tracing::debug!(users = saved.len(), "Snapshot saved"),
                Err(e) => tracing::warn!(
                    error = %e,
                    code = e.error_code(),
                    "Snapshot save failed, keeping local state"
                ),
            }
        }));
    }

    /// Wait for the most recent save to finish (or be cancelled).
    pub async fn flush(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "Snapshot save task failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_users;

    #[test]
    fn test_offline_dispatch_is_noop() {
        let mut dispatcher = SyncDispatcher::new(SnapshotClient::new_offline());
        dispatcher.dispatch(default_users());
        assert!(!dispatcher.has_pending());
    }

    #[test]
    fn test_dispatch_without_runtime_is_dropped() {
        let mut dispatcher = SyncDispatcher::new(SnapshotClient::new("http://127.0.0.1:9"));
        dispatcher.dispatch(default_users());
        assert!(!dispatcher.has_pending());
    }

    #[tokio::test]
    async fn test_failed_save_is_swallowed() {
        // Port 9 (discard) is not expected to serve HTTP; the save fails and is logged.
        let mut dispatcher = SyncDispatcher::new(SnapshotClient::new("http://127.0.0.1:9"));
        dispatcher.dispatch(default_users());
        dispatcher.flush().await;
        assert!(!dispatcher.has_pending());
    }
}
