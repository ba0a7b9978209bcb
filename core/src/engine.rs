use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first activation; the timer is not running.
    Idle,
    /// The stage grid is shown.
    Showing(StageIndex),
    /// The reference color is shown and cells can be toggled.
    Input(StageIndex),
    Solved,
}

impl Phase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }

    pub const fn stage(self) -> Option<StageIndex> {
        match self {
            Self::Showing(stage) | Self::Input(stage) => Some(stage),
            Self::Idle | Self::Solved => None,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything a rendering host may show, captured at one moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizSnapshot {
    pub module_id: u32,
    pub phase: Phase,
    pub stage: u8,
    pub grid: Option<[Color; CELL_COUNT]>,
    pub reference: Option<Color>,
    pub selection: CellMask,
    pub remaining_secs: u16,
    pub timer_running: bool,
    pub solved: bool,
    pub strikes: u32,
}

/// Interaction state machine for one module instance.
///
/// The engine owns the current puzzle session and replaces it wholesale with a
/// freshly generated one on every strike.
#[derive(Clone, Debug)]
pub struct QuizEngine<G = RandomPuzzleGenerator> {
    config: QuizConfig,
    generator: G,
    puzzle: Puzzle,
    phase: Phase,
    selection: CellMask,
    timer: PuzzleTimer,
    strikes: u32,
    forced_completion: bool,
}

impl QuizEngine<RandomPuzzleGenerator> {
    pub fn with_seed(config: QuizConfig, seed: u64) -> Self {
        Self::new(config, RandomPuzzleGenerator::new(seed))
    }
}

impl<G: PuzzleGenerator> QuizEngine<G> {
    pub fn new(config: QuizConfig, mut generator: G) -> Self {
        let puzzle = generator.generate();
        puzzle.log_summary(config.module_id);
        Self {
            config,
            generator,
            puzzle,
            phase: Default::default(),
            selection: CellMask::empty(),
            timer: PuzzleTimer::new(config.time_limit_secs),
            strikes: 0,
            forced_completion: false,
        }
    }

    pub fn config(&self) -> QuizConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Stage currently being played, or `STAGE_COUNT` once solved.
    pub fn current_stage_index(&self) -> u8 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Showing(stage) | Phase::Input(stage) => stage,
            Phase::Solved => STAGE_COUNT as u8,
        }
    }

    pub fn stage(&self) -> Option<&StagePuzzle> {
        self.phase.stage().map(|stage| self.puzzle.stage(stage))
    }

    /// Grid colors, only while the grid is on display.
    pub fn visible_grid(&self) -> Option<&[Color; CELL_COUNT]> {
        match self.phase {
            Phase::Showing(stage) => Some(self.puzzle.stage(stage).grid()),
            _ => None,
        }
    }

    /// Reference color, only while answers are accepted.
    pub fn visible_reference(&self) -> Option<Color> {
        match self.phase {
            Phase::Input(stage) => Some(self.puzzle.stage(stage).reference()),
            _ => None,
        }
    }

    pub fn question_marks_active(&self) -> bool {
        self.phase.is_input()
    }

    pub fn selection(&self) -> &CellMask {
        &self.selection
    }

    pub fn remaining_secs(&self) -> u16 {
        self.timer.remaining_secs()
    }

    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.current_id()
    }

    pub fn is_solved(&self) -> bool {
        self.phase.is_solved()
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn is_forced_completion(&self) -> bool {
        self.forced_completion
    }

    /// While set, running out of time does not cause a strike.
    pub fn set_forced_completion(&mut self, enabled: bool) {
        self.forced_completion = enabled;
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            module_id: self.config.module_id,
            phase: self.phase,
            stage: self.current_stage_index(),
            grid: self.visible_grid().copied(),
            reference: self.visible_reference(),
            selection: self.selection,
            remaining_secs: self.timer.remaining_secs(),
            timer_running: self.timer.is_running(),
            solved: self.is_solved(),
            strikes: self.strikes,
        }
    }

    pub fn activate(&mut self) -> ActivateOutcome {
        match self.phase {
            Phase::Idle => {
                self.timer.start();
                self.phase = Phase::Showing(0);
                ActivateOutcome::StageShown(0)
            }
            Phase::Showing(stage) => {
                self.phase = Phase::Input(stage);
                ActivateOutcome::ReferenceRevealed(stage)
            }
            Phase::Input(stage) => self.submit(stage),
            Phase::Solved => ActivateOutcome::NoChange,
        }
    }

    pub fn toggle_cell(&mut self, index: CellIndex) -> Result<ToggleOutcome> {
        self.check_not_solved()?;
        let index = validate_cell(index)?;
        if !self.phase.is_input() {
            return Err(QuizError::NotAcceptingInput);
        }

        Ok(if self.selection.toggle(index) {
            ToggleOutcome::Selected
        } else {
            ToggleOutcome::Deselected
        })
    }

    /// Advances the countdown for the timer run identified by `id`.
    pub fn tick(&mut self, id: TimerId) -> TickOutcome {
        match self.timer.tick(id) {
            TimerTick::Stale => TickOutcome::Stale,
            TimerTick::Running(remaining) => TickOutcome::Ticked(remaining),
            TimerTick::Expired if self.forced_completion => {
                log::debug!(
                    "[RGB Quiz #{}] Time ran out during forced solve, ignored.",
                    self.config.module_id
                );
                TickOutcome::ExpirySuppressed
            }
            TimerTick::Expired => {
                log::info!(
                    "[RGB Quiz #{}] Ran out of time. Strike.",
                    self.config.module_id
                );
                self.strike();
                TickOutcome::Expired
            }
        }
    }

    fn submit(&mut self, stage: StageIndex) -> ActivateOutcome {
        let module_id = self.config.module_id;
        if self.selection != *self.puzzle.stage(stage).solution() {
            log::info!(
                "[RGB Quiz #{}] Incorrectly submitted {}. Strike.",
                module_id,
                self.selection
            );
            self.strike();
            return ActivateOutcome::Strike;
        }

        log::info!(
            "[RGB Quiz #{}] Correctly submitted {}.",
            module_id,
            self.selection
        );
        self.selection.clear();

        let next = stage + 1;
        if usize::from(next) < STAGE_COUNT {
            self.phase = Phase::Showing(next);
            ActivateOutcome::StageCleared {
                cleared: stage,
                next,
            }
        } else {
            self.timer.cancel();
            self.phase = Phase::Solved;
            log::info!("[RGB Quiz #{}] Module solved.", module_id);
            ActivateOutcome::Solved
        }
    }

    fn strike(&mut self) {
        self.timer.cancel();
        self.strikes += 1;
        self.selection.clear();
        self.puzzle = self.generator.generate();
        self.puzzle.log_summary(self.config.module_id);
        self.timer.reset();
        self.phase = Phase::Idle;
    }

    fn check_not_solved(&self) -> Result<()> {
        if self.phase.is_solved() {
            Err(QuizError::AlreadySolved)
        } else {
            Ok(())
        }
    }
}
