//! Player profile and its state container

pub mod user;
pub mod store;

pub use user::{
    Accessory, Avatar, AvatarUpdate, Background, Hair, Outfit, ProfileError, ProfileUpdate,
    UserProfile,
};
pub use store::{LootRecord, ProfileStore, XpRecord};
