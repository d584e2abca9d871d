//! User model as carried in the group snapshot.

use crate::models::entry::nullable_string;
use crate::models::entry_store::EntryStore;
use crate::models::stats::Counters;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A group member, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique display name (also the snapshot upsert key)
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub initials: String,
    /// Accent color name ("coral", "mint", ...)
    #[serde(default, deserialize_with = "nullable_string")]
    pub color: String,
    /// Short tagline shown next to the user
    #[serde(default, deserialize_with = "nullable_string")]
    pub vibe: String,
    #[serde(default, deserialize_with = "lenient_counter")]
    pub total: u32,
    /// Creations minus deletions; not a consecutive-day streak
    #[serde(default, deserialize_with = "lenient_counter")]
    pub streak: u32,
    #[serde(default, deserialize_with = "lenient_counter")]
    pub badges: u32,
    #[serde(default)]
    pub entries: EntryStore,
    /// Fields this crate does not interpret (timestamps added by the remote, etc.)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        initials: impl Into<String>,
        color: impl Into<String>,
        vibe: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            initials: initials.into(),
            color: color.into(),
            vibe: vibe.into(),
            total: 0,
            streak: 0,
            badges: 0,
            entries: EntryStore::new(),
            extra: Map::new(),
        }
    }

    pub fn counters(&self) -> Counters {
        Counters {
            total: self.total,
            streak: self.streak,
            badges: self.badges,
        }
    }

    pub fn set_counters(&mut self, counters: Counters) {
        self.total = counters.total;
        self.streak = counters.streak;
        self.badges = counters.badges;
    }
}

/// The three members a fresh group starts with.
pub fn default_users() -> Vec<User> {
    vec![
        User::new("Jahnvi", "JA", "coral", "Strength + dance"),
        User::new("Divesh", "DI", "mint", "Cardio + core"),
        User::new("Paresh", "PA", "sun", "Mobility + strength"),
    ]
}

/// Accept null, negative or fractional numbers; clamp into `u32`.
fn lenient_counter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_nan() || value <= 0.0 {
        Ok(0)
    } else {
        Ok(value.min(f64::from(u32::MAX)) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_users() {
        let users = default_users();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Jahnvi", "Divesh", "Paresh"]);
        assert!(users
            .iter()
            .all(|u| u.counters() == Counters::default() && u.entries.is_empty()));
    }

    #[test]
    fn test_deserialize_snapshot_user() {
        let json = serde_json::json!({
            "name": "Divesh",
            "initials": "DI",
            "color": "mint",
            "vibe": "Cardio + core",
            "total": 3,
            "streak": null,
            "badges": -2,
            "entries": [
                { "workout": "Row", "duration": "00:20", "intensity": "Focused",
                  "notes": "", "dateKey": "2026-01-03", "time": "2026-01-03T06:00:00.000Z" }
            ],
            "createdAt": "2026-01-01T00:00:00.000Z"
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.total, 3);
        assert_eq!(user.streak, 0);
        assert_eq!(user.badges, 0);
        assert_eq!(user.entries.len(), 1);
        assert_eq!(
            user.extra.get("createdAt"),
            Some(&Value::from("2026-01-01T00:00:00.000Z"))
        );

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["createdAt"], "2026-01-01T00:00:00.000Z");
        assert_eq!(back["entries"][0]["workout"], "Row");
    }

    #[test]
    fn test_missing_entries_defaults_empty() {
        let user: User = serde_json::from_value(serde_json::json!({ "name": "Paresh" })).unwrap();
        assert!(user.entries.is_empty());
        assert_eq!(user.initials, "");
    }
}
