//! Binary cell state

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub const DEAD_CHAR: char = ' ';
    pub const ALIVE_CHAR: char = '#';

    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Character used by the text format and the bordered rendering
    pub fn to_char(self) -> char {
        match self {
            Cell::Dead => Self::DEAD_CHAR,
            Cell::Alive => Self::ALIVE_CHAR,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            Self::DEAD_CHAR => Some(Cell::Dead),
            Self::ALIVE_CHAR => Some(Cell::Alive),
            _ => None,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
