//! Dungeon challenges
//!
//! Team-based challenge definitions, random team assembly and completion
//! rewards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::profile::{ProfileStore, UserProfile};
use crate::progression::{can_perform, Eligibility, Requirements, StatType, XpOutcome};
use crate::rewards::{roll_single_item, Difficulty};

/// A team dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DungeonChallenge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub min_level: u32,
    pub min_team_size: u32,
    pub max_team_size: u32,
    pub xp_reward: u32,
    pub loot_pool: Vec<String>,
    /// Display label, e.g. "2 hours"
    pub duration: String,
    /// Display labels of expected skills
    pub requirements: Vec<String>,
}

impl DungeonChallenge {
    /// Only the level gate applies; dungeons have no slot limit
    pub fn eligibility(&self, profile: &UserProfile) -> Eligibility {
        can_perform(profile.level, &profile.stats, &Requirements::min_level(self.min_level), None)
    }
}

/// On-disk wrapper for `challenges.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeTable {
    pub challenges: Vec<DungeonChallenge>,
}

/// Built-in challenges (hardcoded fallback)
pub fn default_challenges() -> Vec<DungeonChallenge> {
    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    vec![
        DungeonChallenge {
            id: "1".to_string(),
            name: "Crystal Caverns".to_string(),
            description: "Navigate through mystical caverns filled with puzzles and teamwork challenges. Perfect for beginners.".to_string(),
            difficulty: Difficulty::Normal,
            min_level: 3,
            min_team_size: 3,
            max_team_size: 6,
            xp_reward: 75,
            loot_pool: labels(&["Crystal Badge", "Team Spirit Pin", "Wisdom Scroll"]),
            duration: "2 hours".to_string(),
            requirements: labels(&["Basic problem-solving", "Team communication"]),
        },
        DungeonChallenge {
            id: "2".to_string(),
            name: "Dragon's Lair".to_string(),
            description: "Face the ultimate challenge! Complex puzzles, physical tasks, and strategic thinking required.".to_string(),
            difficulty: Difficulty::Hard,
            min_level: 8,
            min_team_size: 4,
            max_team_size: 8,
            xp_reward: 150,
            loot_pool: labels(&["Dragon Scale", "Leadership Crown", "Power Crystal", "Epic Badge"]),
            duration: "4 hours".to_string(),
            requirements: labels(&["Advanced strategy", "Physical endurance", "Leadership skills"]),
        },
        DungeonChallenge {
            id: "3".to_string(),
            name: "Nightmare Realm".to_string(),
            description: "Only for the most experienced adventurers. Extreme challenges that test every skill.".to_string(),
            difficulty: Difficulty::Nightmare,
            min_level: 15,
            min_team_size: 6,
            max_team_size: 12,
            xp_reward: 300,
            loot_pool: labels(&["Nightmare Crown", "Legendary Artifact", "Master's Seal", "Cosmic Badge"]),
            duration: "6 hours".to_string(),
            requirements: labels(&["Master-level skills", "Extreme endurance", "Perfect teamwork"]),
        },
    ]
}

// =============================================================================
// Team Assembly
// =============================================================================

/// Names handed to generated teammates
const MOCK_ADVENTURERS: [&str; 10] = [
    "DragonSlayer99",
    "MysticMage",
    "ShadowNinja",
    "FirePhoenix",
    "IceQueen",
    "ThunderBolt",
    "StarGazer",
    "CrystalHunter",
    "StormRider",
    "MoonWalker",
];

/// Generated teammates are up to this many levels above the minimum
const TEAMMATE_LEVEL_SPREAD: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub username: String,
    pub level: u32,
    pub primary_stat: StatType,
    pub is_player: bool,
}

/// Build a random team for `challenge`: a uniform size within its bounds,
/// filled with random teammates, the player last.
///
/// No balancing is attempted; names may repeat.
pub fn assemble_team(
    challenge: &DungeonChallenge,
    player: &UserProfile,
    rng: &mut impl Rng,
) -> Vec<TeamMember> {
    let min = challenge.min_team_size.max(1);
    let max = challenge.max_team_size.max(min);
    let size = rng.gen_range(min..=max);

    let mut team: Vec<TeamMember> = (0..size - 1)
        .map(|i| TeamMember {
            id: format!("member-{}", i),
            username: MOCK_ADVENTURERS[rng.gen_range(0..MOCK_ADVENTURERS.len())].to_string(),
            level: challenge.min_level.saturating_add(rng.gen_range(0..=TEAMMATE_LEVEL_SPREAD)),
            primary_stat: StatType::ALL[rng.gen_range(0..StatType::ALL.len())],
            is_player: false,
        })
        .collect();

    team.push(TeamMember {
        id: player.id.clone(),
        username: player.username.clone(),
        level: player.level,
        primary_stat: player.stats.primary(),
        is_player: true,
    });

    log::debug!("Assembled team of {} for {}", team.len(), challenge.name);
    team
}

// =============================================================================
// Completion
// =============================================================================

/// What finishing a challenge granted
#[derive(Debug, Clone)]
pub struct ChallengeCompletion {
    pub xp: XpOutcome,
    pub item: Option<String>,
}

/// Credit the challenge XP and one item from its pool to the player
pub fn complete_challenge(
    store: &ProfileStore,
    challenge: &DungeonChallenge,
    rng: &mut impl Rng,
) -> ChallengeCompletion {
    let xp = store.add_xp(challenge.xp_reward, None, &challenge.name, rng);

    let item = roll_single_item(&challenge.loot_pool, rng);
    if let Some(item) = &item {
        store.add_loot(item, challenge.difficulty.rarity(), &challenge.name);
    }

    log::info!(
        "Completed {}: +{} XP, loot {:?}",
        challenge.name,
        xp.xp_gained,
        item
    );
    ChallengeCompletion { xp, item }
}
