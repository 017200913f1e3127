//! Progression systems

pub mod stats;
pub mod xp;
pub mod eligibility;
pub mod achievements;

pub use stats::{StatType, Stats};
pub use xp::{apply_xp_gain, scaled_xp, stat_gain, xp_threshold, level_title, progress_percent, EventKind, XpOutcome};
pub use eligibility::{can_perform, Capacity, Eligibility, Requirements, StatRequirement, StatRequirements};
pub use achievements::achievements_for;
