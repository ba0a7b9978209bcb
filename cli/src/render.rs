use rgb_quiz_core::*;

const SOLVE_MESSAGES: [&str; 8] = [
    "NICE JOB",
    "NOT BAD",
    "GGWP",
    "VERY GOOD",
    "CONGRATS",
    "SOLVED",
    "CORRECT",
    ":)",
];

const STRIKE_MESSAGES: [&str; 7] = [
    "TOO BAD",
    "NICE TRY",
    "VERY BAD",
    "BAD LUCK",
    "WRONG",
    "COME ON",
    ":(",
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Banner {
    Solve,
    Strike,
}

impl Banner {
    pub fn messages(self) -> &'static [&'static str] {
        match self {
            Self::Solve => &SOLVE_MESSAGES,
            Self::Strike => &STRIKE_MESSAGES,
        }
    }
}

fn header() -> String {
    let columns: Vec<String> = (0..GRID_COLUMNS)
        .map(|column| format!(" {} ", char::from(b'a' + column)))
        .collect();
    format!("  {}", columns.join(" "))
}

/// Grid rows labelled with `a`-`e` columns and `1`-`3` rows.
pub fn grid_lines(cell: impl Fn(CellIndex) -> String) -> Vec<String> {
    let mut lines = vec![header()];
    for row in 0..GRID_ROWS {
        let cells: Vec<String> = (0..GRID_COLUMNS)
            .map(|column| cell(row * GRID_COLUMNS + column))
            .collect();
        lines.push(format!("{} {}", row + 1, cells.join(" ")));
    }
    lines
}

pub fn color_grid_lines(grid: &[Color; CELL_COUNT]) -> Vec<String> {
    grid_lines(|index| grid[usize::from(index)].to_string())
}

/// Question marks for unselected cells, `#` for selected ones.
pub fn selection_lines(selection: &CellMask) -> Vec<String> {
    grid_lines(|index| {
        if selection[index] {
            " # ".to_string()
        } else {
            " ? ".to_string()
        }
    })
}
