//! Event reference data
//!
//! Event descriptors served by the event listing, plus the built-in table
//! used when no `events.ron` is present.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::progression::{Capacity, Requirements, StatRequirements, StatType};

/// How demanding an event is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDifficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl FromStr for EventDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(EventDifficulty::Beginner),
            "intermediate" => Ok(EventDifficulty::Intermediate),
            "advanced" => Ok(EventDifficulty::Advanced),
            "expert" => Ok(EventDifficulty::Expert),
            other => Err(format!("Unknown event difficulty: {}", other)),
        }
    }
}

/// A joinable event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub id: String,
    pub title: String,
    pub description: String,
    /// The stat this event trains
    pub category: StatType,
    pub difficulty: EventDifficulty,
    pub xp_reward: u32,
    pub stat_reward: u32,
    #[serde(default)]
    pub requirements: Requirements,
    pub location: String,
    pub date: String,
    pub time: String,
    pub max_participants: u32,
    pub current_participants: u32,
    pub is_premium: bool,
    pub is_dungeon: bool,
}

impl EventDescriptor {
    pub fn capacity(&self) -> Capacity {
        Capacity { current: self.current_participants, max: self.max_participants }
    }

    /// Fields echoed back after a successful join
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            xp_reward: self.xp_reward,
            stat_reward: self.stat_reward,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub xp_reward: u32,
    pub stat_reward: u32,
    pub category: StatType,
}

/// Listing filter. `None` means "don't filter on this field".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub category: Option<StatType>,
    pub difficulty: Option<EventDifficulty>,
    pub premium_only: bool,
}

impl EventFilter {
    /// Build from raw query values. Missing, `all` and unrecognised values
    /// leave that field unfiltered.
    pub fn from_query(category: Option<&str>, difficulty: Option<&str>, premium: Option<&str>) -> Self {
        Self {
            category: category.and_then(|c| c.parse().ok()),
            difficulty: difficulty.and_then(|d| d.parse().ok()),
            premium_only: premium == Some("true"),
        }
    }

    pub fn matches(&self, event: &EventDescriptor) -> bool {
        self.category.map_or(true, |c| event.category == c)
            && self.difficulty.map_or(true, |d| event.difficulty == d)
            && (!self.premium_only || event.is_premium)
    }
}

/// On-disk wrapper for `events.ron`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTable {
    pub events: Vec<EventDescriptor>,
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    title: &str,
    description: &str,
    category: StatType,
    difficulty: EventDifficulty,
    (xp_reward, stat_reward): (u32, u32),
    requirements: Requirements,
    (location, date, time): (&str, &str, &str),
    (current_participants, max_participants): (u32, u32),
    is_premium: bool,
    is_dungeon: bool,
) -> EventDescriptor {
    EventDescriptor {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        difficulty,
        xp_reward,
        stat_reward,
        requirements,
        location: location.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        max_participants,
        current_participants,
        is_premium,
        is_dungeon,
    }
}

/// Built-in event table (hardcoded fallback)
pub fn default_events() -> Vec<EventDescriptor> {
    use EventDifficulty::*;
    use StatType::*;

    vec![
        event(
            "1",
            "Morning Yoga Session",
            "Start your day with mindfulness and flexibility. Perfect for beginners looking to improve their physical wellness.",
            Strength,
            Beginner,
            (15, 2),
            Requirements::default(),
            ("Central Park", "2024-01-15", "07:00"),
            (12, 20),
            false,
            false,
        ),
        event(
            "2",
            "Advanced Web Development Workshop",
            "Deep dive into React, TypeScript, and modern web technologies. Build a full-stack application.",
            Intelligence,
            Advanced,
            (50, 5),
            Requirements {
                level: Some(5),
                stats: StatRequirements::new().with(Intelligence, 25),
            },
            ("Tech Hub Downtown", "2024-01-16", "14:00"),
            (8, 15),
            true,
            false,
        ),
        event(
            "3",
            "Digital Art Masterclass",
            "Learn advanced digital painting techniques and create stunning artwork using professional tools.",
            Creativity,
            Intermediate,
            (30, 3),
            Requirements { level: None, stats: StatRequirements::new().with(Creativity, 15) },
            ("Art Studio", "2024-01-17", "10:00"),
            (5, 12),
            false,
            false,
        ),
        event(
            "4",
            "Networking Mixer: Tech Professionals",
            "Connect with like-minded professionals, share experiences, and build lasting relationships.",
            Charisma,
            Beginner,
            (20, 3),
            Requirements::default(),
            ("Business Center", "2024-01-18", "18:00"),
            (23, 50),
            false,
            false,
        ),
        event(
            "5",
            "Dragon's Lair Challenge",
            "Ultimate team-based dungeon event! Work together to solve puzzles, overcome challenges, and claim epic loot.",
            Strength,
            Expert,
            (100, 10),
            Requirements {
                level: Some(10),
                stats: StatRequirements::new().with(Strength, 30).with(Intelligence, 20),
            },
            ("Adventure Park", "2024-01-20", "09:00"),
            (18, 24),
            true,
            true,
        ),
        event(
            "6",
            "Creative Writing Workshop",
            "Unleash your storytelling potential with guided exercises and peer feedback.",
            Creativity,
            Beginner,
            (25, 3),
            Requirements::default(),
            ("Library Community Room", "2024-01-19", "15:00"),
            (9, 16),
            false,
            false,
        ),
        event(
            "7",
            "Rock Climbing Adventure",
            "Challenge yourself physically and mentally on our indoor climbing walls.",
            Strength,
            Intermediate,
            (35, 4),
            Requirements { level: None, stats: StatRequirements::new().with(Strength, 15) },
            ("Climbing Gym", "2024-01-21", "11:00"),
            (6, 10),
            false,
            false,
        ),
        event(
            "8",
            "Public Speaking Masterclass",
            "Build confidence and charisma through practical speaking exercises and expert coaching.",
            Charisma,
            Intermediate,
            (40, 4),
            Requirements { level: Some(3), stats: StatRequirements::new().with(Charisma, 12) },
            ("Conference Center", "2024-01-22", "13:00"),
            (14, 20),
            true,
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(filter: EventFilter) -> Vec<String> {
        default_events()
            .into_iter()
            .filter(|e| filter.matches(e))
            .map(|e| e.id)
            .collect()
    }

    #[test]
    fn test_default_table() {
        let events = default_events();
        assert_eq!(events.len(), 8);
        assert!(events.iter().all(|e| e.current_participants < e.max_participants));
        assert_eq!(events.iter().filter(|e| e.is_dungeon).count(), 1);
    }

    #[test]
    fn test_filter_all_passes_through() {
        let filter = EventFilter::from_query(Some("all"), Some("all"), None);
        assert_eq!(filter, EventFilter::default());
        assert_eq!(listed(filter).len(), 8);
    }

    #[test]
    fn test_unknown_filter_values_pass_through() {
        let filter = EventFilter::from_query(Some("luck"), Some("legendary"), Some("maybe"));
        assert_eq!(listed(filter).len(), 8);
    }

    #[test]
    fn test_filters_combine() {
        assert_eq!(listed(EventFilter::from_query(Some("strength"), None, None)), vec!["1", "5", "7"]);
        assert_eq!(
            listed(EventFilter::from_query(Some("strength"), Some("intermediate"), None)),
            vec!["7"]
        );
        assert_eq!(listed(EventFilter::from_query(None, None, Some("true"))), vec!["2", "5", "8"]);
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(&default_events()[4]).unwrap();
        assert_eq!(json["maxParticipants"], 24);
        assert_eq!(json["isDungeon"], true);
        assert_eq!(json["category"], "strength");
        assert_eq!(json["requirements"]["stats"]["intelligence"], 20);
    }
}
