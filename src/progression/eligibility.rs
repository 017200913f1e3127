//! Eligibility gate
//!
//! Decides whether a player may take an action (join an event, enter a
//! dungeon) given its level/stat requirements and remaining capacity.
//!
//! The gate is a pure check. Callers that reserve a slot afterwards do so
//! in a separate step, so check and reservation are not atomic.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::stats::{StatType, Stats};

/// Minimum value for a single stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatRequirement {
    pub stat: StatType,
    pub minimum: u32,
}

/// Per-stat minimums, checked in the order they were declared.
///
/// Serialized as a map (`{"strength": 30, "intelligence": 20}`) that keeps
/// its declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatRequirements(Vec<StatRequirement>);

impl StatRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append
    pub fn with(mut self, stat: StatType, minimum: u32) -> Self {
        self.0.push(StatRequirement { stat, minimum });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatRequirement> {
        self.0.iter()
    }
}

impl Serialize for StatRequirements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for req in &self.0 {
            map.serialize_entry(&req.stat, &req.minimum)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatRequirements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = StatRequirements;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of stat name to minimum value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut reqs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((stat, minimum)) = access.next_entry::<StatType, u32>()? {
                    reqs.push(StatRequirement { stat, minimum });
                }
                Ok(StatRequirements(reqs))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Declared requirements of an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "StatRequirements::is_empty")]
    pub stats: StatRequirements,
}

impl Requirements {
    /// Requirements with only a minimum level
    pub fn min_level(level: u32) -> Self {
        Self { level: Some(level), stats: StatRequirements::new() }
    }
}

/// Participant slots of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub current: u32,
    pub max: u32,
}

impl Capacity {
    pub fn has_room(&self) -> bool {
        self.current < self.max
    }
}

/// Result of the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    pub allowed: bool,
    pub reason: String,
}

impl Eligibility {
    pub fn allowed() -> Self {
        Self { allowed: true, reason: String::new() }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self { allowed: false, reason: reason.into() }
    }
}

/// Check level, then each stat in declared order, then capacity.
/// The first failure wins.
pub fn can_perform(
    level: u32,
    stats: &Stats,
    requirements: &Requirements,
    capacity: Option<Capacity>,
) -> Eligibility {
    if let Some(required) = requirements.level {
        if level < required {
            return Eligibility::denied(format!("Requires level {}", required));
        }
    }

    for req in requirements.stats.iter() {
        if stats.get(req.stat) < req.minimum {
            return Eligibility::denied(format!("Requires {} {}", req.stat, req.minimum));
        }
    }

    if let Some(capacity) = capacity {
        if !capacity.has_room() {
            return Eligibility::denied("Event is full");
        }
    }

    Eligibility::allowed()
}
