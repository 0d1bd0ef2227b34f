use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => write!(f, "."),
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Three cells that end the game when they hold the same mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub cells: [Position; 3],
}

impl Line {
    const fn new(a: (usize, usize), b: (usize, usize), c: (usize, usize)) -> Self {
        Self {
            cells: [
                Position::new(a.0, a.1),
                Position::new(b.0, b.1),
                Position::new(c.0, c.1),
            ],
        }
    }

    pub fn start(&self) -> Position {
        self.cells[0]
    }

    pub fn end(&self) -> Position {
        self.cells[2]
    }
}

/// Rows, then columns, then the main and anti diagonals.
pub const LINES: [Line; 8] = [
    Line::new((0, 0), (0, 1), (0, 2)),
    Line::new((1, 0), (1, 1), (1, 2)),
    Line::new((2, 0), (2, 1), (2, 2)),
    Line::new((0, 0), (1, 0), (2, 0)),
    Line::new((0, 1), (1, 1), (2, 1)),
    Line::new((0, 2), (1, 2), (2, 2)),
    Line::new((0, 0), (1, 1), (2, 2)),
    Line::new((0, 2), (1, 1), (2, 0)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub line: Line,
}

impl WinningLine {
    pub fn new(mark: Mark, line: Line) -> Self {
        Self { mark, line }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won(WinningLine),
    Tied,
}

impl Outcome {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Won(line) => Some(line.mark),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        *self != Outcome::Ongoing
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Won(line) => write!(f, "{} wins!", line.mark),
            Outcome::Tied => write!(f, "It is a tie."),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstPlayerMode {
    Computer,
    #[default]
    Human,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    Random,
    #[default]
    Heuristic,
}
