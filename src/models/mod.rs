// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod entry;
pub mod entry_store;
pub mod message;
pub mod stats;
pub mod user;

pub use entry::{Entry, EntryDraft, Intensity};
pub use entry_store::EntryStore;
pub use message::Message;
pub use stats::{recompute_counters, Counters, EntryChange};
pub use user::{default_users, User};
