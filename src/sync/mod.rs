// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Snapshot sync layer (remote user list).

pub mod client;
pub mod dispatcher;

pub use client::SnapshotClient;
pub use dispatcher::SyncDispatcher;
