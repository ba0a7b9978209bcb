use rand::prelude::*;

use super::*;

/// Stage zero draws attempted before falling back to a forced layout.
pub const MAX_GENERATION_ATTEMPTS: u32 = 256;

// pure color counts used by the fallback layout, all distinct and summing to CELL_COUNT
const FORCED_PRIMARY_COUNTS: [usize; 3] = [7, 5, 3];

/// Generation strategy that draws every stage uniformly from its palette and
/// redraws stage zero until its pure color counts are pairwise distinct.
#[derive(Clone, Debug)]
pub struct RandomPuzzleGenerator {
    seed: u64,
    rng: SmallRng,
    max_attempts: u32,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn pick(&mut self, palette: &[Color]) -> Color {
        palette[self.rng.random_range(0..palette.len())]
    }

    fn draw_stage(&mut self, stage: StageIndex) -> (Color, [Color; CELL_COUNT]) {
        let palette = palette(stage);
        let reference = self.pick(palette);
        let grid = core::array::from_fn(|_| self.pick(palette));
        (reference, grid)
    }

    /// Draws stage zero once, returning it only if its pure counts are distinct.
    fn try_generate_stage_zero(&mut self) -> Option<(Color, [Color; CELL_COUNT])> {
        let (reference, grid) = self.draw_stage(0);
        let counts = PrimaryCounts::of(&grid);
        if counts.is_distinct() {
            Some((reference, grid))
        } else {
            log::trace!(
                "Rejected stage zero draw, red: {}, green: {}, blue: {}",
                counts.count(Channel::Red),
                counts.count(Channel::Green),
                counts.count(Channel::Blue)
            );
            None
        }
    }

    fn forced_stage_zero(&mut self) -> (Color, [Color; CELL_COUNT]) {
        let mut channels = Channel::ALL;
        channels.shuffle(&mut self.rng);

        let mut grid = [Color::BLACK; CELL_COUNT];
        let mut cells = grid.iter_mut();
        for (channel, count) in channels.into_iter().zip(FORCED_PRIMARY_COUNTS) {
            for cell in cells.by_ref().take(count) {
                *cell = Color::pure(channel);
            }
        }
        grid.shuffle(&mut self.rng);

        let reference = self.pick(palette(0));
        (reference, grid)
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn generate(&mut self) -> Puzzle {
        let stage_zero = (0..self.max_attempts)
            .find_map(|_| self.try_generate_stage_zero())
            .unwrap_or_else(|| {
                log::warn!(
                    "No valid stage zero after {} attempts, using forced layout",
                    self.max_attempts
                );
                self.forced_stage_zero()
            });
        let draws = [stage_zero, self.draw_stage(1), self.draw_stage(2)];

        Puzzle::from_draws(draws).expect("stage zero counts should be distinct")
    }
}
