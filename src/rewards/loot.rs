//! Loot generation system
//!
//! Rolls dungeon loot from difficulty-scoped pools, plus completion XP and
//! rare bonus rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, Rarity};

/// Most items a single roll can produce
pub const MAX_LOOT_PER_ROLL: u32 = 3;

/// Team size bounds accepted for dungeon rolls
pub const MIN_TEAM_SIZE: u32 = 1;
pub const MAX_TEAM_SIZE: u32 = 12;

/// Extra completion XP per team member beyond the first
pub const TEAM_BONUS_PER_MEMBER: f64 = 0.1;

/// Hard tier: chance of a skill unlock
pub const HARD_RARE_UNLOCK_CHANCE: f64 = 0.3;
/// Nightmare tier: chance of a title
pub const NIGHTMARE_TITLE_CHANCE: f64 = 0.5;
/// Nightmare tier: chance of a cosmetic, only rolled after a title
pub const NIGHTMARE_COSMETIC_CHANCE: f64 = 0.2;

/// Item pools per difficulty tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootPools {
    pub normal: Vec<String>,
    pub hard: Vec<String>,
    pub nightmare: Vec<String>,
}

impl LootPools {
    pub fn pool(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::Nightmare => &self.nightmare,
        }
    }
}

impl Default for LootPools {
    fn default() -> Self {
        fn names(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            normal: names(&[
                "Crystal Badge",
                "Team Spirit Pin",
                "Wisdom Scroll",
                "Friendship Bracelet",
                "Courage Medal",
                "Unity Emblem",
            ]),
            hard: names(&[
                "Dragon Scale",
                "Leadership Crown",
                "Power Crystal",
                "Epic Badge",
                "Valor Shield",
                "Master's Ring",
                "Phoenix Feather",
                "Storm Gem",
            ]),
            nightmare: names(&[
                "Nightmare Crown",
                "Legendary Artifact",
                "Master's Seal",
                "Cosmic Badge",
                "Infinity Stone",
                "Divine Relic",
                "Eternal Flame",
                "Void Crystal",
            ]),
        }
    }
}

/// Roll 1-3 items (never more than the team size) from a pool.
///
/// Each draw is independent. A draw that repeats an item already taken in
/// this roll is dropped rather than re-rolled, so small pools can return
/// fewer items than were drawn.
pub fn roll_loot(pool: &[String], team_size: u32, rng: &mut impl Rng) -> Vec<String> {
    if pool.is_empty() {
        return Vec::new();
    }

    let count = rng.gen_range(1..=MAX_LOOT_PER_ROLL).min(team_size);
    let mut selected: Vec<String> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let item = &pool[rng.gen_range(0..pool.len())];
        if !selected.contains(item) {
            selected.push(item.clone());
        }
    }

    selected
}

/// Completion XP: tier base plus 10% per extra team member, rounded down
pub fn bonus_xp(difficulty: Difficulty, team_size: u32) -> u32 {
    let extra_members = team_size.saturating_sub(1) as f64;
    let factor = 1.0 + TEAM_BONUS_PER_MEMBER * extra_members;
    (difficulty.base_xp() as f64 * factor).floor() as u32
}

/// Independent bonus reward draws for the tougher tiers
pub fn roll_special_rewards(difficulty: Difficulty, rng: &mut impl Rng) -> Vec<String> {
    let mut rewards = Vec::new();

    match difficulty {
        Difficulty::Normal => {}
        Difficulty::Hard => {
            if rng.gen_bool(HARD_RARE_UNLOCK_CHANCE) {
                rewards.push("Rare Skill Unlock".to_string());
            }
        }
        Difficulty::Nightmare => {
            if rng.gen_bool(NIGHTMARE_TITLE_CHANCE) {
                rewards.push("Legendary Title".to_string());
                if rng.gen_bool(NIGHTMARE_COSMETIC_CHANCE) {
                    rewards.push("Exclusive Avatar Customization".to_string());
                }
            }
        }
    }

    rewards
}

/// Everything a dungeon completion rolls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LootRoll {
    pub loot: Vec<String>,
    #[serde(rename = "bonusXP")]
    pub bonus_xp: u32,
    pub special_rewards: Vec<String>,
    pub difficulty: Difficulty,
    pub team_size: u32,
    pub rarity: Rarity,
}

/// Roll items, completion XP and special rewards for one run
pub fn roll_dungeon_rewards(
    pools: &LootPools,
    difficulty: Difficulty,
    team_size: u32,
    rng: &mut impl Rng,
) -> LootRoll {
    let loot = roll_loot(pools.pool(difficulty), team_size, rng);
    let special_rewards = roll_special_rewards(difficulty, rng);

    log::debug!(
        "Rolled {} loot item(s) and {} special reward(s) for {} dungeon, team of {}",
        loot.len(),
        special_rewards.len(),
        difficulty,
        team_size
    );

    LootRoll {
        loot,
        bonus_xp: bonus_xp(difficulty, team_size),
        special_rewards,
        difficulty,
        team_size,
        rarity: difficulty.rarity(),
    }
}

/// Pick a single item uniformly from a pool
pub fn roll_single_item(pool: &[String], rng: &mut impl Rng) -> Option<String> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.gen_range(0..pool.len())].clone())
}
