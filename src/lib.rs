//! Eventquest - progression and rewards for a gamified event-discovery app
//!
//! Join events, earn XP and stats, level up, and pull loot from team
//! dungeons. Everything lives in memory and resets with the process.

pub mod config;
pub mod data;
pub mod dungeon;
pub mod error;
pub mod profile;
pub mod progression;
pub mod rewards;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use data::{DataManager, EventDescriptor, EventRepository, InMemoryEventRepository};
pub use error::ApiError;
pub use profile::{ProfileStore, UserProfile};
pub use progression::{apply_xp_gain, can_perform, Eligibility, StatType, Stats};
pub use rewards::{roll_loot, Difficulty};
pub use server::AppState;
