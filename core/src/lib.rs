#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use color::*;
pub use command::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use stage::*;
pub use timer::*;
pub use types::*;

mod color;
mod command;
mod engine;
mod error;
mod generator;
mod stage;
mod timer;
mod types;

pub const DEFAULT_TIME_LIMIT_SECS: u16 = 120;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Number shown in log lines, assigned by the host per module instance.
    pub module_id: u32,
    pub time_limit_secs: u16,
}

impl QuizConfig {
    pub const fn new_unchecked(module_id: u32, time_limit_secs: u16) -> Self {
        Self {
            module_id,
            time_limit_secs,
        }
    }

    pub fn new(module_id: u32, time_limit_secs: u16) -> Self {
        Self::new_unchecked(module_id, time_limit_secs.max(1))
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new_unchecked(1, DEFAULT_TIME_LIMIT_SECS)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
}

impl ToggleOutcome {
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Selected)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActivateOutcome {
    NoChange,
    /// Timer started or next stage loaded; the grid is visible.
    StageShown(StageIndex),
    /// Grid hidden, reference color shown, answers accepted.
    ReferenceRevealed(StageIndex),
    StageCleared {
        cleared: StageIndex,
        next: StageIndex,
    },
    /// Wrong submission; the session was replaced with a new puzzle.
    Strike,
    Solved,
}

impl ActivateOutcome {
    pub const fn has_update(self) -> bool {
        use ActivateOutcome::*;
        match self {
            NoChange => false,
            StageShown(_) => true,
            ReferenceRevealed(_) => true,
            StageCleared { .. } => true,
            Strike => true,
            Solved => true,
        }
    }

    pub const fn is_strike(self) -> bool {
        matches!(self, Self::Strike)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// The tick belongs to a cancelled or finished timer run.
    Stale,
    Ticked(u16),
    /// Time ran out; the session was replaced with a new puzzle.
    Expired,
    /// Time ran out during forced completion; nothing else changed.
    ExpirySuppressed,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            Stale => false,
            Ticked(_) => true,
            Expired => true,
            ExpirySuppressed => true,
        }
    }

    pub const fn is_strike(self) -> bool {
        matches!(self, Self::Expired)
    }
}
