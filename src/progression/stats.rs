//! Player stats
//!
//! The four progression axes an event can train.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stat starting value for a fresh profile
pub const STARTING_STAT: u32 = 10;

/// One of the four progression axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Strength,
    Intelligence,
    Creativity,
    Charisma,
}

impl StatType {
    pub const ALL: [StatType; 4] = [
        StatType::Strength,
        StatType::Intelligence,
        StatType::Creativity,
        StatType::Charisma,
    ];

    /// Wire name, also used in requirement messages
    pub fn name(&self) -> &'static str {
        match self {
            StatType::Strength => "strength",
            StatType::Intelligence => "intelligence",
            StatType::Creativity => "creativity",
            StatType::Charisma => "charisma",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatType::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| format!("Unknown stat: {}", s))
    }
}

/// Stat block carried by every profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: u32,
    pub intelligence: u32,
    pub creativity: u32,
    pub charisma: u32,
}

impl Stats {
    pub fn new(strength: u32, intelligence: u32, creativity: u32, charisma: u32) -> Self {
        Self { strength, intelligence, creativity, charisma }
    }

    /// Stats of a brand new profile
    pub fn starting() -> Self {
        Self::new(STARTING_STAT, STARTING_STAT, STARTING_STAT, STARTING_STAT)
    }

    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.strength,
            StatType::Intelligence => self.intelligence,
            StatType::Creativity => self.creativity,
            StatType::Charisma => self.charisma,
        }
    }

    fn get_mut(&mut self, stat: StatType) -> &mut u32 {
        match stat {
            StatType::Strength => &mut self.strength,
            StatType::Intelligence => &mut self.intelligence,
            StatType::Creativity => &mut self.creativity,
            StatType::Charisma => &mut self.charisma,
        }
    }

    /// Return a copy with `amount` added to one stat
    pub fn with_gain(&self, stat: StatType, amount: u32) -> Self {
        let mut stats = *self;
        let value = stats.get_mut(stat);
        *value = value.saturating_add(amount);
        stats
    }

    /// Highest stat, first one wins on ties
    pub fn primary(&self) -> StatType {
        StatType::ALL
            .into_iter()
            .fold(StatType::Strength, |best, stat| {
                if self.get(stat) > self.get(best) { stat } else { best }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_names_round_trip() {
        for stat in StatType::ALL {
            assert_eq!(stat.name().parse::<StatType>().unwrap(), stat);
        }
        assert!("luck".parse::<StatType>().is_err());
    }

    #[test]
    fn test_with_gain_leaves_original() {
        let stats = Stats::starting();
        let gained = stats.with_gain(StatType::Creativity, 4);
        assert_eq!(stats.creativity, 10);
        assert_eq!(gained.creativity, 14);
        assert_eq!(gained.strength, 10);
    }

    #[test]
    fn test_primary_stat() {
        assert_eq!(Stats::starting().primary(), StatType::Strength);
        assert_eq!(Stats::new(3, 9, 12, 12).primary(), StatType::Creativity);
    }
}
