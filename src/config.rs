//! Application configuration loaded from environment variables.
//!
//! The session context (active user, reference year, clock) is built from
//! this configuration and passed explicitly into the session.

use chrono::{DateTime, Utc};
use std::env;

/// Year the demo calendar is pinned to.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2026;

const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the snapshot API
    pub api_url: String,
    /// Calendar year used for "today", the leaderboard and the grids
    pub reference_year: i32,
    /// User to select at startup (falls back to the first user)
    pub active_user: Option<String>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            active_user: None,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let reference_year = match env::var("REFERENCE_YEAR") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "REFERENCE_YEAR",
                value: raw,
            })?,
            Err(_) => DEFAULT_REFERENCE_YEAR,
        };

        Ok(Self {
            api_url: env::var("FITQUEST_API_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            reference_year,
            active_user: env::var("FITQUEST_ACTIVE_USER")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Session context for this configuration, on the system clock.
    pub fn session_context(&self) -> SessionContext {
        SessionContext {
            active_user: self.active_user.clone(),
            reference_year: self.reference_year,
            clock: Clock::System,
        }
    }
}

/// Source of "now" for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

/// Per-session settings injected into the workout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub active_user: Option<String>,
    pub reference_year: i32,
    pub clock: Clock,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            active_user: None,
            reference_year: DEFAULT_REFERENCE_YEAR,
            clock: Clock::System,
        }
    }
}

impl SessionContext {
    pub fn with_active_user(mut self, name: impl Into<String>) -> Self {
        self.active_user = Some(name.into());
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("FITQUEST_API_URL", Some("http://api.example.test")),
                ("REFERENCE_YEAR", Some("2027")),
                ("FITQUEST_ACTIVE_USER", Some("Divesh")),
            ],
            || {
                let config = Config::from_env().expect("Config should load");

                assert_eq!(config.api_url, "http://api.example.test");
                assert_eq!(config.reference_year, 2027);
                assert_eq!(config.active_user.as_deref(), Some("Divesh"));

                let context = config.session_context();
                assert_eq!(context.reference_year, 2027);
                assert_eq!(context.clock, Clock::System);
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_year() {
        temp_env::with_vars([("REFERENCE_YEAR", Some("twenty"))], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "REFERENCE_YEAR", .. }));
        });
    }

    #[test]
    fn test_default_context_uses_system_clock() {
        let context = Config::test_default().session_context();
        assert_eq!(context, SessionContext::default());
    }

    #[test]
    fn test_fixed_clock() {
        let instant = chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(Clock::Fixed(instant).now(), instant);
    }
}
