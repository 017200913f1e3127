//! Dungeon run phases
//!
//! A run walks five timed phases. Progress is driven by `tick`, so any
//! timer (or a test) can advance it.

use serde::Serialize;
use thiserror::Error;

/// Phases of a dungeon run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Assembly,
    Briefing,
    MainChallenge,
    FinalBoss,
    LootDistribution,
    Complete,
}

impl Phase {
    /// Nominal length in seconds; `None` for the terminal phase
    pub fn duration_secs(&self) -> Option<u32> {
        match self {
            Phase::Assembly => Some(30),
            Phase::Briefing => Some(20),
            Phase::MainChallenge => Some(60),
            Phase::FinalBoss => Some(40),
            Phase::LootDistribution => Some(10),
            Phase::Complete => None,
        }
    }

    /// The phase that follows on the timer. Loot distribution waits for an
    /// explicit completion instead.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Assembly => Some(Phase::Briefing),
            Phase::Briefing => Some(Phase::MainChallenge),
            Phase::MainChallenge => Some(Phase::FinalBoss),
            Phase::FinalBoss => Some(Phase::LootDistribution),
            Phase::LootDistribution | Phase::Complete => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Assembly => "Team Assembly",
            Phase::Briefing => "Challenge Briefing",
            Phase::MainChallenge => "Main Challenge",
            Phase::FinalBoss => "Final Boss",
            Phase::LootDistribution => "Loot Distribution",
            Phase::Complete => "Complete",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Phase::Assembly => "Getting to know your teammates",
            Phase::Briefing => "Understanding the mission",
            Phase::MainChallenge => "The core adventure begins",
            Phase::FinalBoss => "Face the ultimate test",
            Phase::LootDistribution => "Claim your rewards",
            Phase::Complete => "Challenge finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("Run has not been started")]
    NotStarted,
    #[error("Cannot complete during {0:?}")]
    NotFinished(Phase),
    #[error("Run is already complete")]
    AlreadyComplete,
}

/// One dungeon run
#[derive(Debug, Clone)]
pub struct DungeonRun {
    phase: Phase,
    /// Seconds spent in the current phase
    elapsed: f64,
    active: bool,
    started: bool,
}

impl Default for DungeonRun {
    fn default() -> Self {
        Self::new()
    }
}

impl DungeonRun {
    /// A run waiting to be started
    pub fn new() -> Self {
        Self { phase: Phase::Assembly, elapsed: 0.0, active: false, started: false }
    }

    /// Begin (or restart) at team assembly
    pub fn start(&mut self) {
        self.phase = Phase::Assembly;
        self.elapsed = 0.0;
        self.active = true;
        self.started = true;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the timer is still advancing the run
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Loot distribution has run out and the run waits for `complete`
    pub fn awaiting_completion(&self) -> bool {
        self.started && !self.active && self.phase == Phase::LootDistribution
    }

    /// Percent of the current phase done, 0-100
    pub fn progress(&self) -> f64 {
        match self.phase.duration_secs() {
            Some(duration) => (self.elapsed / duration as f64 * 100.0).min(100.0),
            None => 100.0,
        }
    }

    /// Advance the clock. Returns the new phase if one was entered.
    ///
    /// Reaching the end of a phase moves to the next one with progress back
    /// at zero; time past the end of a phase is dropped, so one tick
    /// advances at most one phase.
    pub fn tick(&mut self, elapsed_secs: f64) -> Option<Phase> {
        if !self.active {
            return None;
        }
        let duration = self.phase.duration_secs()? as f64;

        self.elapsed += elapsed_secs.max(0.0);
        if self.elapsed < duration {
            return None;
        }

        match self.phase.next() {
            Some(next) => {
                log::debug!("Dungeon phase: {:?} -> {:?}", self.phase, next);
                self.phase = next;
                self.elapsed = 0.0;
                Some(next)
            }
            None => {
                self.elapsed = duration;
                self.active = false;
                None
            }
        }
    }

    /// Start and tick each phase for its full length, stopping where the run
    /// waits for completion. Returns every phase visited.
    pub fn fast_forward(&mut self) -> Vec<Phase> {
        self.start();
        let mut visited = vec![self.phase];
        while self.active {
            let Some(duration) = self.phase.duration_secs() else {
                break;
            };
            if let Some(next) = self.tick(duration as f64) {
                visited.push(next);
            }
        }
        visited
    }

    /// Finish a run whose loot distribution has elapsed
    pub fn complete(&mut self) -> Result<(), RunError> {
        if !self.started {
            return Err(RunError::NotStarted);
        }
        if self.phase == Phase::Complete {
            return Err(RunError::AlreadyComplete);
        }
        if !self.awaiting_completion() {
            return Err(RunError::NotFinished(self.phase));
        }
        self.phase = Phase::Complete;
        Ok(())
    }
}
