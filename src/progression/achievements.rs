//! Achievement messages
//!
//! Announcements earned by a single XP grant.

use super::xp::XpOutcome;

/// A grant at or above this much XP earns the high achiever message
pub const HIGH_ACHIEVER_XP: u32 = 100;

/// Collect the achievement messages for one grant
pub fn achievements_for(outcome: &XpOutcome) -> Vec<String> {
    let mut messages = Vec::new();

    if outcome.leveled_up {
        messages.push(format!("Level Up! Reached Level {}", outcome.new_level()));
    }

    if outcome.xp_gained >= HIGH_ACHIEVER_XP {
        messages.push("High Achiever - Gained 100+ XP in one event!".to_string());
    }

    messages
}
