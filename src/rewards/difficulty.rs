//! Dungeon difficulty tiers
//!
//! Each tier scales XP, picks a loot pool and sets the rarity label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dungeon difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Hard, Difficulty::Nightmare];

    /// XP multiplier for dungeon grants
    pub fn xp_mult(&self) -> f64 {
        match self {
            Difficulty::Normal => 1.5,
            Difficulty::Hard => 2.0,
            Difficulty::Nightmare => 3.0,
        }
    }

    /// Completion XP before the team bonus
    pub fn base_xp(&self) -> u32 {
        match self {
            Difficulty::Normal => 75,
            Difficulty::Hard => 150,
            Difficulty::Nightmare => 300,
        }
    }

    /// Rarity label attached to this tier's loot
    pub fn rarity(&self) -> Rarity {
        match self {
            Difficulty::Normal => Rarity::Rare,
            Difficulty::Hard => Rarity::Epic,
            Difficulty::Nightmare => Rarity::Legendary,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Nightmare => "nightmare",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| format!("Unknown difficulty: {}", s))
    }
}

/// Loot rarity labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_scale_up() {
        let mut prev = 0.0;
        for d in Difficulty::ALL {
            assert!(d.xp_mult() > prev);
            prev = d.xp_mult();
        }
        assert_eq!(Difficulty::Nightmare.rarity(), Rarity::Legendary);
        assert_eq!(Difficulty::Hard.rarity(), Rarity::Epic);
    }

    #[test]
    fn test_parse() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert!("Hard".parse::<Difficulty>().is_err());
    }
}
