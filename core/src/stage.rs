use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Stage number, `0..STAGE_COUNT`.
pub type StageIndex = u8;

pub const STAGE_COUNT: usize = 3;

const STAGE_ZERO_PALETTE: [Color; 3] = [Color::BLUE, Color::GREEN, Color::RED];

const STAGE_ONE_PALETTE: [Color; 6] = [
    Color::decode_unchecked(2),
    Color::decode_unchecked(6),
    Color::decode_unchecked(8),
    Color::decode_unchecked(18),
    Color::decode_unchecked(20),
    Color::decode_unchecked(24),
];

// every color except all-off and all-full
const STAGE_TWO_PALETTE: [Color; 25] = {
    let mut colors = [Color::BLACK; 25];
    let mut i = 0;
    while i < colors.len() {
        colors[i] = Color::decode_unchecked(i as u8 + 1);
        i += 1;
    }
    colors
};

/// Colors a stage may draw its reference and grid cells from.
pub fn palette(stage: StageIndex) -> &'static [Color] {
    match stage {
        0 => &STAGE_ZERO_PALETTE,
        1 => &STAGE_ONE_PALETTE,
        _ => &STAGE_TWO_PALETTE,
    }
}

/// Which cells of `grid` agree with `reference` on `channel`.
pub fn solution_mask(reference: Color, grid: &[Color; CELL_COUNT], channel: Channel) -> CellMask {
    let target = reference.level(channel);
    CellMask::from_fn(|index| grid[index].level(channel) == target)
}

/// Pure red, green and blue cell counts of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryCounts {
    counts: [usize; 3],
}

impl PrimaryCounts {
    pub fn of(grid: &[Color]) -> Self {
        let mut counts = [0; 3];
        for channel in grid.iter().filter_map(|color| color.pure_channel()) {
            counts[channel.index()] += 1;
        }
        Self { counts }
    }

    pub const fn count(&self, channel: Channel) -> usize {
        self.counts[channel.index()]
    }

    pub const fn is_distinct(&self) -> bool {
        let [red, green, blue] = self.counts;
        red != green && green != blue && red != blue
    }

    /// Channel with the strictly largest count, if there is one.
    pub fn dominant(&self) -> Option<Channel> {
        let max = self.counts.into_iter().max()?;
        let mut leaders = Channel::ALL
            .into_iter()
            .filter(|&channel| self.count(channel) == max);
        let leader = leaders.next()?;
        leaders.next().is_none().then_some(leader)
    }
}

/// Generated data for one stage: what is shown and what must be selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePuzzle {
    reference: Color,
    grid: [Color; CELL_COUNT],
    match_channel: Channel,
    solution: CellMask,
}

impl StagePuzzle {
    pub fn new(reference: Color, grid: [Color; CELL_COUNT], match_channel: Channel) -> Self {
        let solution = solution_mask(reference, &grid, match_channel);
        Self {
            reference,
            grid,
            match_channel,
            solution,
        }
    }

    pub fn reference(&self) -> Color {
        self.reference
    }

    pub fn grid(&self) -> &[Color; CELL_COUNT] {
        &self.grid
    }

    pub fn cell(&self, index: CellIndex) -> Color {
        self.grid[usize::from(index)]
    }

    pub fn match_channel(&self) -> Channel {
        self.match_channel
    }

    pub fn solution(&self) -> &CellMask {
        &self.solution
    }

    pub fn primary_counts(&self) -> PrimaryCounts {
        PrimaryCounts::of(&self.grid)
    }

    /// One grid row as space separated `+0-` triplets.
    pub fn row_string(&self, row: u8) -> String {
        row_cells(row)
            .map(|index| self.cell(index).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
