//! Reward rolling: difficulty tiers and loot

pub mod difficulty;
pub mod loot;

pub use difficulty::{Difficulty, Rarity};
pub use loot::{
    bonus_xp, roll_dungeon_rewards, roll_loot, roll_single_item, roll_special_rewards, LootPools,
    LootRoll, MAX_TEAM_SIZE, MIN_TEAM_SIZE,
};
