// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitQuest: group workout tracking core
//!
//! This crate provides the workout entry model keyed by calendar date, the
//! running activity counters, the yearly leaderboard and consistency grid,
//! and background replication of the group snapshot to the remote API.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod sync;
pub mod time_utils;

pub use config::{Clock, Config, SessionContext};
pub use error::{AppError, Result};
pub use services::WorkoutSession;
