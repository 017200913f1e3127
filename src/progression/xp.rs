//! Experience and leveling
//!
//! XP accumulation, level thresholds and stat gains.
//!
//! XP is a running total that never resets. Each grant can raise the level
//! by at most one, no matter how far past the threshold the total lands;
//! the next grant compares against the recomputed threshold.

use rand::Rng;

use super::stats::StatType;
use crate::profile::UserProfile;
use crate::rewards::Difficulty;

/// XP threshold step: reaching level N+1 needs `N * XP_PER_LEVEL` total XP
pub const XP_PER_LEVEL: u32 = 100;

/// Upper bound of the random stat bonus (inclusive)
pub const MAX_STAT_BONUS: u32 = 2;

/// Threshold for leaving `level`
pub fn xp_threshold(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Kind of activity an XP grant came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    #[default]
    Regular,
    Dungeon(Difficulty),
}

impl EventKind {
    /// XP multiplier applied before the grant reaches the profile
    pub fn xp_multiplier(&self) -> f64 {
        match self {
            EventKind::Regular => 1.0,
            EventKind::Dungeon(difficulty) => difficulty.xp_mult(),
        }
    }
}

/// Base XP scaled by the activity multiplier, rounded down
pub fn scaled_xp(base_xp: u32, kind: EventKind) -> u32 {
    (base_xp as f64 * kind.xp_multiplier()).floor() as u32
}

/// Stat points earned from an XP grant: a tenth of the XP plus 0-2, at least 1
pub fn stat_gain(gained_xp: u32, rng: &mut impl Rng) -> u32 {
    let base = gained_xp / 10;
    let bonus = rng.gen_range(0..=MAX_STAT_BONUS);
    (base + bonus).max(1)
}

/// Result of applying an XP grant to a profile
#[derive(Debug, Clone)]
pub struct XpOutcome {
    /// The new profile snapshot
    pub profile: UserProfile,
    pub xp_gained: u32,
    pub stat_type: Option<StatType>,
    /// Zero when no stat was trained
    pub stat_gained: u32,
    pub leveled_up: bool,
}

impl XpOutcome {
    pub fn new_level(&self) -> u32 {
        self.profile.level
    }
}

/// Apply an XP grant, returning a new snapshot. The input profile is untouched.
pub fn apply_xp_gain(
    profile: &UserProfile,
    gained_xp: u32,
    stat_type: Option<StatType>,
    rng: &mut impl Rng,
) -> XpOutcome {
    let mut next = profile.clone();
    next.xp = profile.xp.saturating_add(gained_xp);

    if next.xp >= profile.xp_to_next_level {
        next.level = profile.level.saturating_add(1);
        next.xp_to_next_level = xp_threshold(next.level);
    }
    let leveled_up = next.level > profile.level;

    let stat_gained = match stat_type {
        Some(stat) => {
            let gain = stat_gain(gained_xp, rng);
            next.stats = next.stats.with_gain(stat, gain);
            gain
        }
        None => 0,
    };

    XpOutcome {
        profile: next,
        xp_gained: gained_xp,
        stat_type,
        stat_gained,
        leveled_up,
    }
}

/// Progress bar fill. Can exceed 100 right after a level-up because XP
/// is not reset.
pub fn progress_percent(xp: u32, xp_to_next_level: u32) -> f64 {
    if xp_to_next_level == 0 {
        return 100.0;
    }
    xp as f64 / xp_to_next_level as f64 * 100.0
}

/// Rank label shown next to the level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=2 => "Newcomer",
        3..=4 => "Regular",
        5..=9 => "Enthusiast",
        10..=14 => "Veteran",
        15..=24 => "Champion",
        _ => "Legend",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile(xp: u32, level: u32, xp_to_next_level: u32) -> UserProfile {
        UserProfile { xp, level, xp_to_next_level, ..UserProfile::default() }
    }

    #[test]
    fn test_level_up_example() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = apply_xp_gain(&profile(90, 1, 100), 20, None, &mut rng);
        assert_eq!(out.profile.xp, 110);
        assert_eq!(out.profile.level, 2);
        assert_eq!(out.profile.xp_to_next_level, 200);
        assert!(out.leveled_up);
        assert_eq!(out.stat_gained, 0);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let mut rng = StdRng::seed_from_u64(2);
        let out = apply_xp_gain(&profile(10, 1, 100), 89, None, &mut rng);
        assert_eq!(out.profile.xp, 99);
        assert_eq!(out.profile.level, 1);
        assert!(!out.leveled_up);
    }

    #[test]
    fn test_single_level_up_for_huge_grant() {
        // One grant never skips levels, even far past the threshold
        let mut rng = StdRng::seed_from_u64(3);
        let out = apply_xp_gain(&profile(0, 1, 100), 1000, None, &mut rng);
        assert_eq!(out.profile.level, 2);
        assert_eq!(out.profile.xp_to_next_level, 200);
        assert_eq!(out.profile.xp, 1000);

        // The next grant catches up one more level
        let out = apply_xp_gain(&out.profile, 0, None, &mut rng);
        assert_eq!(out.profile.level, 3);
        assert_eq!(out.profile.xp_to_next_level, 300);
    }

    #[test]
    fn test_level_and_xp_never_decrease() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut current = UserProfile::default();
        for grant in [0, 5, 150, 0, 999, 1, 42, 300] {
            let out = apply_xp_gain(&current, grant, Some(StatType::Charisma), &mut rng);
            assert!(out.profile.level >= current.level);
            assert!(out.profile.level <= current.level + 1);
            assert!(out.profile.xp >= current.xp);
            current = out.profile;
        }
    }

    #[test]
    fn test_max_level_saturates() {
        let mut rng = StdRng::seed_from_u64(7);
        let out = apply_xp_gain(&profile(0, u32::MAX, 100), 100, None, &mut rng);
        assert_eq!(out.profile.level, u32::MAX);
        assert!(!out.leveled_up);
        assert_eq!(out.profile.xp, 100);
    }

    #[test]
    fn test_stat_gain_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let gain = stat_gain(50, &mut rng);
            assert!((5..=7).contains(&gain));
            assert!(stat_gain(0, &mut rng) >= 1);
        }
    }

    #[test]
    fn test_stat_gain_applied_to_chosen_stat() {
        let mut rng = StdRng::seed_from_u64(6);
        let start = UserProfile::default();
        let out = apply_xp_gain(&start, 30, Some(StatType::Intelligence), &mut rng);
        assert!(out.stat_gained >= 3);
        assert_eq!(out.profile.stats.intelligence, start.stats.intelligence + out.stat_gained);
        assert_eq!(out.profile.stats.strength, start.stats.strength);
    }

    #[test]
    fn test_scaled_xp() {
        assert_eq!(scaled_xp(75, EventKind::Regular), 75);
        assert_eq!(scaled_xp(75, EventKind::Dungeon(Difficulty::Normal)), 112);
        assert_eq!(scaled_xp(75, EventKind::Dungeon(Difficulty::Hard)), 150);
        assert_eq!(scaled_xp(75, EventKind::Dungeon(Difficulty::Nightmare)), 225);
    }

    #[test]
    fn test_progress_can_exceed_full_bar() {
        assert_eq!(progress_percent(50, 100), 50.0);
        assert!(progress_percent(1000, 200) > 100.0);
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Newcomer");
        assert_eq!(level_title(5), "Enthusiast");
        assert_eq!(level_title(30), "Legend");
    }
}
