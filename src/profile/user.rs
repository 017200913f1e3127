//! User profile and avatar
//!
//! The single player's identity, progression and cosmetics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progression::{xp_threshold, Stats};

/// Hair styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hair {
    #[default]
    ShortBrown,
    LongBlonde,
    CurlyBlack,
    PixieRed,
    BraidedPurple,
    MohawkBlue,
}

/// Outfits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outfit {
    #[default]
    CasualBlue,
    FormalBlack,
    SportyRed,
    ArtisticPurple,
    TechGray,
    AdventureGreen,
}

/// Accessories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessory {
    #[default]
    None,
    GlassesRound,
    GlassesSquare,
    HatCap,
    HatBeanie,
    EarringsGold,
    NecklaceSilver,
}

/// Scene behind the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Background {
    #[default]
    Forest,
    City,
    Space,
    Beach,
    Mountain,
    Library,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Avatar {
    pub hair: Hair,
    pub outfit: Outfit,
    pub accessory: Accessory,
    pub background: Background,
}

/// Partial avatar change; unset fields keep their value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarUpdate {
    pub hair: Option<Hair>,
    pub outfit: Option<Outfit>,
    pub accessory: Option<Accessory>,
    pub background: Option<Background>,
}

impl AvatarUpdate {
    pub fn apply(&self, avatar: &Avatar) -> Avatar {
        Avatar {
            hair: self.hair.unwrap_or(avatar.hair),
            outfit: self.outfit.unwrap_or(avatar.outfit),
            accessory: self.accessory.unwrap_or(avatar.accessory),
            background: self.background.unwrap_or(avatar.background),
        }
    }
}

/// The player's profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub level: u32,
    /// Running XP total, never reset on level-up
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub stats: Stats,
    pub avatar: Avatar,
    /// Loot item names in the order they were acquired
    pub inventory: Vec<String>,
    pub badges: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            username: "Player".to_string(),
            level: 1,
            xp: 0,
            xp_to_next_level: xp_threshold(1),
            stats: Stats::starting(),
            avatar: Avatar::default(),
            inventory: Vec::new(),
            badges: Vec::new(),
        }
    }
}

/// Rejected profile changes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Username cannot be empty")]
    EmptyUsername,
    #[error("Level must be at least 1")]
    InvalidLevel,
}

/// Partial profile change; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub level: Option<u32>,
    pub xp: Option<u32>,
    pub xp_to_next_level: Option<u32>,
    pub stats: Option<Stats>,
    pub avatar: Option<Avatar>,
    pub inventory: Option<Vec<String>>,
    pub badges: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// Merge onto `profile`, producing a new snapshot
    pub fn apply(&self, profile: &UserProfile) -> Result<UserProfile, ProfileError> {
        let mut next = profile.clone();

        if let Some(username) = &self.username {
            let username = username.trim();
            if username.is_empty() {
                return Err(ProfileError::EmptyUsername);
            }
            next.username = username.to_string();
        }
        if let Some(level) = self.level {
            if level == 0 {
                return Err(ProfileError::InvalidLevel);
            }
            next.level = level;
        }
        if let Some(xp) = self.xp {
            next.xp = xp;
        }
        if let Some(threshold) = self.xp_to_next_level {
            next.xp_to_next_level = threshold;
        }
        if let Some(stats) = self.stats {
            next.stats = stats;
        }
        if let Some(avatar) = self.avatar {
            next.avatar = avatar;
        }
        if let Some(inventory) = &self.inventory {
            next.inventory = inventory.clone();
        }
        if let Some(badges) = &self.badges {
            next.badges = badges.clone();
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = UserProfile::default();
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp_to_next_level, 100);
        assert_eq!(profile.stats, Stats::starting());
        assert_eq!(profile.avatar.accessory, Accessory::None);
    }

    #[test]
    fn test_avatar_wire_names() {
        let json = serde_json::to_value(Avatar::default()).unwrap();
        assert_eq!(json["hair"], "short-brown");
        assert_eq!(json["outfit"], "casual-blue");
        assert_eq!(json["accessory"], "none");
        assert_eq!(json["background"], "forest");
    }

    #[test]
    fn test_avatar_partial_update() {
        let update: AvatarUpdate =
            serde_json::from_str(r#"{"hair":"mohawk-blue","background":"space"}"#).unwrap();
        let avatar = update.apply(&Avatar::default());
        assert_eq!(avatar.hair, Hair::MohawkBlue);
        assert_eq!(avatar.background, Background::Space);
        assert_eq!(avatar.outfit, Outfit::CasualBlue);
    }

    #[test]
    fn test_avatar_rejects_unknown_selector() {
        assert!(serde_json::from_str::<AvatarUpdate>(r#"{"hair":"bald"}"#).is_err());
        assert!(serde_json::from_str::<AvatarUpdate>(r#"{"cape":"red"}"#).is_err());
    }

    #[test]
    fn test_profile_update_validation() {
        let profile = UserProfile::default();
        let rename = ProfileUpdate { username: Some("  Nova ".into()), ..Default::default() };
        assert_eq!(rename.apply(&profile).unwrap().username, "Nova");

        let blank = ProfileUpdate { username: Some("   ".into()), ..Default::default() };
        assert_eq!(blank.apply(&profile), Err(ProfileError::EmptyUsername));

        let zero = ProfileUpdate { level: Some(0), ..Default::default() };
        assert_eq!(zero.apply(&profile), Err(ProfileError::InvalidLevel));
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json["xpToNextLevel"], 100);
        assert_eq!(json["stats"]["charisma"], 10);
    }
}
