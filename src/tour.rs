//! Guided-tour stage machine.
//!
//! A tour walks through the stages `1..=N` one click at a time. What happens
//! after the last stage depends on the [`Advance`] policy.

/// What `advance` does on the last stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Stay on the last stage.
    Clamp,
    /// Go back to stage 1.
    Wrap,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    stage: u32,
    stages: u32,
    policy: Advance,
}

impl Tour {
    /// A tour with `stages` stages starting at stage 1. Zero stages are treated
    /// as a single stage.
    pub fn new(stages: u32, policy: Advance) -> Self {
        Self {
            stage: 1,
            stages: stages.max(1),
            policy,
        }
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn stages(&self) -> u32 {
        self.stages
    }

    pub fn is_last(&self) -> bool {
        self.stage == self.stages
    }

    /// Move to the next stage and return it.
    pub fn advance(&mut self) -> u32 {
        self.stage = match (self.is_last(), self.policy) {
            (false, _) => self.stage + 1,
            (true, Advance::Clamp) => self.stage,
            (true, Advance::Wrap) => 1,
        };
        self.stage
    }

    /// Jump straight to `stage`, clamped into `1..=stages`.
    pub fn jump(&mut self, stage: u32) -> u32 {
        self.stage = stage.clamp(1, self.stages);
        self.stage
    }

    pub fn restart(&mut self) {
        self.stage = 1;
    }
}
