use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait PuzzleGenerator {
    fn generate(&mut self) -> Puzzle;
}

/// All three stages of one puzzle session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    stages: [StagePuzzle; STAGE_COUNT],
}

impl Puzzle {
    pub const fn new_unchecked(stages: [StagePuzzle; STAGE_COUNT]) -> Self {
        Self { stages }
    }

    pub fn new(stages: [StagePuzzle; STAGE_COUNT]) -> Result<Self> {
        let puzzle = Self::new_unchecked(stages);
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Builds a puzzle from drawn `(reference, grid)` pairs, deriving the
    /// match channels from the stage zero grid.
    pub fn from_draws(draws: [(Color, [Color; CELL_COUNT]); STAGE_COUNT]) -> Result<Self> {
        let counts = PrimaryCounts::of(&draws[0].1);
        if !counts.is_distinct() {
            return Err(QuizError::IndistinctPrimaryCounts);
        }
        let starting = counts
            .dominant()
            .ok_or(QuizError::IndistinctPrimaryCounts)?;

        let mut stage = 0;
        let stages = draws.map(|(reference, grid)| {
            let channel = starting.rotated(stage);
            stage += 1;
            StagePuzzle::new(reference, grid, channel)
        });
        Ok(Self::new_unchecked(stages))
    }

    pub fn stage(&self, index: StageIndex) -> &StagePuzzle {
        &self.stages[usize::from(index)]
    }

    pub fn stages(&self) -> &[StagePuzzle; STAGE_COUNT] {
        &self.stages
    }

    /// Channel stage zero is matched on; later stages rotate from it.
    pub fn starting_channel(&self) -> Channel {
        self.stages[0].match_channel()
    }

    pub fn validate(&self) -> Result<()> {
        let counts = self.stages[0].primary_counts();
        if !counts.is_distinct() {
            return Err(QuizError::IndistinctPrimaryCounts);
        }

        let starting = self.starting_channel();
        let rotates = counts.dominant() == Some(starting)
            && self
                .stages
                .iter()
                .enumerate()
                .all(|(stage, puzzle)| puzzle.match_channel() == starting.rotated(stage));
        if !rotates {
            return Err(QuizError::ChannelRotationMismatch);
        }

        Ok(())
    }

    /// Writes every stage's channel, grid, reference and solution to the log.
    pub fn log_summary(&self, module_id: u32) {
        for (stage, puzzle) in (1..).zip(&self.stages) {
            log::info!(
                "[RGB Quiz #{}] Stage {}, color index: {}",
                module_id,
                stage,
                puzzle.match_channel()
            );
            log::info!("[RGB Quiz #{}] Stage {}, Grid:", module_id, stage);
            for row in 0..GRID_ROWS {
                log::info!("[RGB Quiz #{}] {}", module_id, puzzle.row_string(row));
            }
            log::info!(
                "[RGB Quiz #{}] Stage {}, Screen color: {}",
                module_id,
                stage,
                puzzle.reference()
            );
            log::info!("[RGB Quiz #{}] Stage {}, Solution:", module_id, stage);
            for row in 0..GRID_ROWS {
                log::info!(
                    "[RGB Quiz #{}] {}",
                    module_id,
                    puzzle.solution().row_string(row)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_zero_grid() -> [Color; CELL_COUNT] {
        let mut grid = [Color::BLUE; CELL_COUNT];
        grid[..5].fill(Color::RED);
        grid[5..9].fill(Color::GREEN);
        grid
    }

    #[test]
    fn from_draws_rotates_from_dominant_channel() {
        let filler = [Color::decode(13).unwrap(); CELL_COUNT];
        let puzzle = Puzzle::from_draws([
            (Color::RED, stage_zero_grid()),
            (Color::GREEN, filler),
            (Color::BLUE, filler),
        ])
        .unwrap();

        assert_eq!(puzzle.starting_channel(), Channel::Blue);
        assert_eq!(puzzle.stage(0).match_channel(), Channel::Blue);
        assert_eq!(puzzle.stage(1).match_channel(), Channel::Red);
        assert_eq!(puzzle.stage(2).match_channel(), Channel::Green);
        assert_eq!(puzzle.validate(), Ok(()));
    }

    #[test]
    fn from_draws_rejects_tied_counts() {
        let mut grid = [Color::BLUE; CELL_COUNT];
        grid[..5].fill(Color::RED);
        grid[5..10].fill(Color::GREEN);

        let result = Puzzle::from_draws([(Color::RED, grid); STAGE_COUNT]);

        assert_eq!(result, Err(QuizError::IndistinctPrimaryCounts));
    }

    #[test]
    fn new_rejects_broken_rotation() {
        let filler = [Color::RED; CELL_COUNT];
        let stages = [
            StagePuzzle::new(Color::RED, stage_zero_grid(), Channel::Blue),
            StagePuzzle::new(Color::RED, filler, Channel::Green),
            StagePuzzle::new(Color::RED, filler, Channel::Red),
        ];

        assert_eq!(
            Puzzle::new(stages).unwrap_err(),
            QuizError::ChannelRotationMismatch
        );
    }

    #[test]
    fn puzzle_serializes_to_json() {
        let filler = [Color::GREEN; CELL_COUNT];
        let puzzle = Puzzle::from_draws([
            (Color::RED, stage_zero_grid()),
            (Color::GREEN, filler),
            (Color::BLUE, filler),
        ])
        .unwrap();

        let json = serde_json::to_string(&puzzle).unwrap();
        let back: Puzzle = serde_json::from_str(&json).unwrap();

        assert_eq!(back, puzzle);
    }
}
