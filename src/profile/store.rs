//! Profile store
//!
//! Owns the single live profile. Every mutation builds a fresh snapshot and
//! swaps it in whole, so readers holding an older `Arc` never see it change.
//! Also keeps the XP and loot history the API reports back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use serde::Serialize;

use super::user::{AvatarUpdate, ProfileError, ProfileUpdate, UserProfile};
use crate::progression::{apply_xp_gain, StatType, XpOutcome};
use crate::rewards::Rarity;

/// One XP grant, as reported by the history endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpRecord {
    pub id: String,
    pub event_name: String,
    pub xp_gained: u32,
    pub stat_gained: u32,
    pub stat_type: Option<StatType>,
    pub timestamp: DateTime<Utc>,
}

/// One acquired item, as reported by the inventory endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LootRecord {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub source: String,
    pub acquired_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct History {
    xp: Vec<XpRecord>,
    loot: Vec<LootRecord>,
    next_id: u64,
}

impl History {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// State container for the one player
#[derive(Debug)]
pub struct ProfileStore {
    profile: RwLock<Arc<UserProfile>>,
    history: Mutex<History>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(UserProfile::default())
    }
}

impl ProfileStore {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile: RwLock::new(Arc::new(profile)),
            history: Mutex::new(History::default()),
        }
    }

    /// Current profile snapshot
    pub fn snapshot(&self) -> Arc<UserProfile> {
        self.profile.read().clone()
    }

    /// Grant XP (and optionally train a stat) and record it
    pub fn add_xp(
        &self,
        amount: u32,
        stat_type: Option<StatType>,
        source: &str,
        rng: &mut impl Rng,
    ) -> XpOutcome {
        let outcome = {
            let mut current = self.profile.write();
            let outcome = apply_xp_gain(&current, amount, stat_type, rng);
            *current = Arc::new(outcome.profile.clone());
            outcome
        };

        if outcome.leveled_up {
            log::info!(
                "{} reached level {} ({} XP total)",
                outcome.profile.username,
                outcome.profile.level,
                outcome.profile.xp
            );
        }

        let mut history = self.history.lock();
        let id = history.next_id();
        history.xp.push(XpRecord {
            id,
            event_name: source.to_string(),
            xp_gained: outcome.xp_gained,
            stat_gained: outcome.stat_gained,
            stat_type: outcome.stat_type,
            timestamp: Utc::now(),
        });

        outcome
    }

    /// Append an item to the inventory and record where it came from
    pub fn add_loot(&self, item: &str, rarity: Rarity, source: &str) -> Arc<UserProfile> {
        let snapshot = self.replace(|profile| {
            let mut next = profile.clone();
            next.inventory.push(item.to_string());
            next
        });

        let mut history = self.history.lock();
        let id = history.next_id();
        history.loot.push(LootRecord {
            id,
            name: item.to_string(),
            rarity,
            source: source.to_string(),
            acquired_at: Utc::now(),
        });

        log::debug!("Added {} to inventory from {}", item, source);
        snapshot
    }

    pub fn update_avatar(&self, update: &AvatarUpdate) -> Arc<UserProfile> {
        self.replace(|profile| {
            let mut next = profile.clone();
            next.avatar = update.apply(&profile.avatar);
            next
        })
    }

    pub fn update_user(&self, update: &ProfileUpdate) -> Result<Arc<UserProfile>, ProfileError> {
        let mut current = self.profile.write();
        let next = Arc::new(update.apply(&current)?);
        *current = next.clone();
        Ok(next)
    }

    /// XP grants, oldest first
    pub fn xp_history(&self) -> Vec<XpRecord> {
        self.history.lock().xp.clone()
    }

    /// Acquired items, oldest first
    pub fn loot_history(&self) -> Vec<LootRecord> {
        self.history.lock().loot.clone()
    }

    /// Back to a fresh default profile with empty history
    pub fn reset(&self) {
        *self.profile.write() = Arc::new(UserProfile::default());
        *self.history.lock() = History::default();
    }

    fn replace(&self, f: impl FnOnce(&UserProfile) -> UserProfile) -> Arc<UserProfile> {
        let mut current = self.profile.write();
        let next = Arc::new(f(&current));
        *current = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::user::Hair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_add_xp_swaps_snapshot() {
        let store = ProfileStore::default();
        let mut rng = StdRng::seed_from_u64(1);
        let before = store.snapshot();

        let outcome = store.add_xp(120, Some(StatType::Strength), "Morning Yoga Session", &mut rng);

        // The old snapshot is untouched
        assert_eq!(before.xp, 0);
        assert_eq!(before.level, 1);

        let after = store.snapshot();
        assert_eq!(after.xp, 120);
        assert_eq!(after.level, 2);
        assert!(outcome.leveled_up);
        assert_eq!(after.stats.strength, 10 + outcome.stat_gained);
    }

    #[test]
    fn test_history_records_in_order() {
        let store = ProfileStore::default();
        let mut rng = StdRng::seed_from_u64(2);
        store.add_xp(15, Some(StatType::Strength), "Morning Yoga Session", &mut rng);
        store.add_xp(50, None, "Tech Workshop", &mut rng);

        let history = store.xp_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].event_name, "Morning Yoga Session");
        assert_eq!(history[1].xp_gained, 50);
        assert_eq!(history[1].stat_type, None);
        assert_ne!(history[0].id, history[1].id);
    }

    #[test]
    fn test_add_loot_keeps_duplicates_in_order() {
        let store = ProfileStore::default();
        store.add_loot("Crystal Badge", Rarity::Rare, "Crystal Caverns");
        store.add_loot("Epic Badge", Rarity::Epic, "Dragon's Lair");
        let profile = store.add_loot("Crystal Badge", Rarity::Rare, "Crystal Caverns");

        assert_eq!(profile.inventory, vec!["Crystal Badge", "Epic Badge", "Crystal Badge"]);
        assert_eq!(store.loot_history().len(), 3);
        assert_eq!(store.loot_history()[1].source, "Dragon's Lair");
    }

    #[test]
    fn test_update_avatar_and_user() {
        let store = ProfileStore::default();
        store.update_avatar(&AvatarUpdate { hair: Some(Hair::PixieRed), ..Default::default() });
        assert_eq!(store.snapshot().avatar.hair, Hair::PixieRed);

        let bad = ProfileUpdate { level: Some(0), ..Default::default() };
        assert!(store.update_user(&bad).is_err());
        assert_eq!(store.snapshot().level, 1);

        let good = ProfileUpdate { badges: Some(vec!["Early Bird".into()]), ..Default::default() };
        assert_eq!(store.update_user(&good).unwrap().badges, vec!["Early Bird"]);
    }

    #[test]
    fn test_reset() {
        let store = ProfileStore::default();
        let mut rng = StdRng::seed_from_u64(3);
        store.add_xp(500, None, "Grind", &mut rng);
        store.add_loot("Storm Gem", Rarity::Epic, "Dragon's Lair");
        store.reset();
        assert_eq!(*store.snapshot(), UserProfile::default());
        assert!(store.xp_history().is_empty());
        assert!(store.loot_history().is_empty());
    }
}
