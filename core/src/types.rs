use alloc::string::String;
use core::fmt;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Position of a cell in the row-major grid, `0..CELL_COUNT`.
pub type CellIndex = u8;

pub const GRID_COLUMNS: u8 = 5;
pub const GRID_ROWS: u8 = 3;
pub const CELL_COUNT: usize = (GRID_COLUMNS * GRID_ROWS) as usize;

pub fn validate_cell(index: CellIndex) -> Result<CellIndex> {
    if usize::from(index) < CELL_COUNT {
        Ok(index)
    } else {
        Err(QuizError::InvalidCell)
    }
}

/// Column/row address of a cell, written `a1` through `e3`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoords {
    pub column: u8,
    pub row: u8,
}

impl CellCoords {
    pub fn new(column: u8, row: u8) -> Result<Self> {
        if column < GRID_COLUMNS && row < GRID_ROWS {
            Ok(Self { column, row })
        } else {
            Err(QuizError::InvalidCell)
        }
    }

    pub fn from_index(index: CellIndex) -> Result<Self> {
        let index = validate_cell(index)?;
        Ok(Self {
            column: index % GRID_COLUMNS,
            row: index / GRID_COLUMNS,
        })
    }

    pub const fn index(self) -> CellIndex {
        self.row * GRID_COLUMNS + self.column
    }

    /// Parses `a1`-style coordinates; column letters are case-insensitive.
    pub fn parse(text: &str) -> Option<Self> {
        let &[column, row] = text.as_bytes() else {
            return None;
        };
        let column = column.to_ascii_lowercase().checked_sub(b'a')?;
        let row = row.checked_sub(b'1')?;
        Self::new(column, row).ok()
    }
}

impl fmt::Display for CellCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.column), self.row + 1)
    }
}

/// One flag per grid cell, used for both solutions and player selections.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellMask {
    cells: [bool; CELL_COUNT],
}

impl CellMask {
    pub const fn empty() -> Self {
        Self {
            cells: [false; CELL_COUNT],
        }
    }

    pub const fn from_cells(cells: [bool; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn from_fn(f: impl FnMut(usize) -> bool) -> Self {
        Self {
            cells: core::array::from_fn(f),
        }
    }

    pub fn get(&self, index: CellIndex) -> bool {
        self.cells[usize::from(index)]
    }

    pub fn set(&mut self, index: CellIndex, value: bool) {
        self.cells[usize::from(index)] = value;
    }

    /// Flips a cell and returns its new value.
    pub fn toggle(&mut self, index: CellIndex) -> bool {
        let cell = &mut self.cells[usize::from(index)];
        *cell = !*cell;
        *cell
    }

    pub fn clear(&mut self) {
        self.cells = [false; CELL_COUNT];
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn cells(&self) -> &[bool; CELL_COUNT] {
        &self.cells
    }

    /// Indices of set cells in ascending order.
    pub fn iter_set(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..CELL_COUNT as CellIndex).filter(|&index| self.get(index))
    }

    /// One grid row as `#`/`x` symbols separated by spaces.
    pub fn row_string(&self, row: u8) -> String {
        row_cells(row)
            .map(|index| mask_symbol(self.get(index)))
            .fold(String::new(), |mut line, symbol| {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push(symbol);
                line
            })
    }
}

impl Index<CellIndex> for CellMask {
    type Output = bool;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[usize::from(index)]
    }
}

impl fmt::Display for CellMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            write!(f, "{}", mask_symbol(cell))?;
        }
        Ok(())
    }
}

const fn mask_symbol(set: bool) -> char {
    if set { '#' } else { 'x' }
}

pub(crate) fn row_cells(row: u8) -> impl Iterator<Item = CellIndex> {
    let start = row * GRID_COLUMNS;
    start..start + GRID_COLUMNS
}
