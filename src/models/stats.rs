//! Running activity counters kept on each user.
//!
//! These are bookkeeping counters updated per mutation, not recomputed from
//! the entry list. `streak` in particular counts creations minus deletions;
//! it is not a consecutive-day streak.

use crate::models::entry::Intensity;
use serde::{Deserialize, Serialize};

/// The `total`/`streak`/`badges` triple of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub total: u32,
    pub streak: u32,
    pub badges: u32,
}

/// What an entry operation did to a user's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryChange {
    /// A new entry was created with this intensity.
    Created(Intensity),
    /// An existing entry was overwritten.
    Edited,
    /// An entry with this intensity was removed.
    Deleted(Intensity),
}

impl Counters {
    /// Apply one entry change. Decrements saturate at zero.
    pub fn apply(self, change: &EntryChange) -> Counters {
        match change {
            EntryChange::Created(intensity) => Counters {
                total: self.total.saturating_add(1),
                streak: self.streak.saturating_add(1),
                badges: self.badges.saturating_add(u32::from(intensity.earns_badge())),
            },
            EntryChange::Edited => self,
            EntryChange::Deleted(intensity) => Counters {
                total: self.total.saturating_sub(1),
                streak: self.streak.saturating_sub(1),
                badges: self.badges.saturating_sub(u32::from(intensity.earns_badge())),
            },
        }
    }
}

/// Counters after `change`, starting from `current`.
pub fn recompute_counters(current: Counters, change: &EntryChange) -> Counters {
    current.apply(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_create_beast_mode_earns_badge() {
        let counters = recompute_counters(
            Counters::default(),
            &EntryChange::Created(Intensity::BeastMode),
        );
        assert_eq!(
            counters,
            Counters {
                total: 1,
                streak: 1,
                badges: 1
            }
        );
    }

    #[test]
    fn test_create_focused_no_badge() {
        let counters =
            recompute_counters(Counters::default(), &EntryChange::Created(Intensity::Focused));
        assert_eq!(counters.total, 1);
        assert_eq!(counters.badges, 0);
    }

    #[test]
    fn test_edit_leaves_counters() {
        let start = Counters {
            total: 4,
            streak: 3,
            badges: 2,
        };
        assert_eq!(recompute_counters(start, &EntryChange::Edited), start);
    }

    #[test]
    fn test_delete_clamps_at_zero() {
        let counters = recompute_counters(
            Counters::default(),
            &EntryChange::Deleted(Intensity::BeastMode),
        );
        assert_eq!(counters, Counters::default());
    }

    #[test]
    fn test_delete_beast_mode_loses_badge() {
        let start = Counters {
            total: 2,
            streak: 2,
            badges: 1,
        };
        let counters = recompute_counters(start, &EntryChange::Deleted(Intensity::BeastMode));
        assert_eq!(
            counters,
            Counters {
                total: 1,
                streak: 1,
                badges: 0
            }
        );
    }

    fn arb_intensity() -> impl Strategy<Value = Intensity> {
        prop_oneof![
            Just(Intensity::Focused),
            Just(Intensity::BeastMode),
            "[a-z]{1,8}".prop_map(Intensity::Other),
        ]
    }

    fn arb_change() -> impl Strategy<Value = EntryChange> {
        prop_oneof![
            arb_intensity().prop_map(EntryChange::Created),
            Just(EntryChange::Edited),
            arb_intensity().prop_map(EntryChange::Deleted),
        ]
    }

    proptest! {
        #[test]
        fn prop_counters_never_underflow(changes in prop::collection::vec(arb_change(), 0..200)) {
            let mut counters = Counters::default();
            let mut created = 0i64;
            for change in &changes {
                counters = recompute_counters(counters, change);
                if let EntryChange::Created(_) = change {
                    created += 1;
                }
                prop_assert!(i64::from(counters.total) <= created);
                prop_assert_eq!(counters.total, counters.streak);
            }
        }

        #[test]
        fn prop_badges_track_beast_mode_creations(n in 0u32..50) {
            let mut counters = Counters::default();
            for _ in 0..n {
                counters = recompute_counters(counters, &EntryChange::Created(Intensity::BeastMode));
            }
            prop_assert_eq!(counters.badges, n);
            for _ in 0..n {
                counters = recompute_counters(counters, &EntryChange::Deleted(Intensity::BeastMode));
            }
            prop_assert_eq!(counters, Counters::default());
        }
    }
}
