//! Dungeon challenges and run phases

pub mod challenge;
pub mod run;

pub use challenge::{
    assemble_team, complete_challenge, default_challenges, ChallengeCompletion, ChallengeTable,
    DungeonChallenge, TeamMember,
};
pub use run::{DungeonRun, Phase, RunError};
