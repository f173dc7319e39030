//! Well-known creatures, each drawn on a grid the size of its bounding box

use super::{Cell, Grid};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

fn from_live_cells(width: u32, height: u32, live: &[(u32, u32)]) -> Grid {
    let mut grid = Grid::new(width, height);
    for &(x, y) in live {
        let idx = grid.index(x, y);
        grid.cells_mut()[idx] = Cell::Alive;
    }
    grid.recount();
    grid
}

/// A 3x3 glider
///
/// ```text
/// +---+
/// | # |
/// |  #|
/// |###|
/// +---+
/// ```
pub fn glider() -> Grid {
    from_live_cells(3, 3, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
}

/// A 3x3 r-pentomino
pub fn r_pentomino() -> Grid {
    from_live_cells(3, 3, &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)])
}

/// A 5x4 light weight spaceship
pub fn light_weight_spaceship() -> Grid {
    from_live_cells(
        5,
        4,
        &[
            (1, 0),
            (4, 0),
            (0, 1),
            (0, 2),
            (4, 2),
            (0, 3),
            (1, 3),
            (2, 3),
            (3, 3),
        ],
    )
}

/// Named presets selectable from the config file and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Glider,
    RPentomino,
    LightWeightSpaceship,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Glider, Preset::RPentomino, Preset::LightWeightSpaceship];

    pub fn grid(self) -> Grid {
        match self {
            Preset::Glider => glider(),
            Preset::RPentomino => r_pentomino(),
            Preset::LightWeightSpaceship => light_weight_spaceship(),
        }
    }

    /// File stem used when writing presets to disk
    pub fn name(self) -> &'static str {
        match self {
            Preset::Glider => "glider",
            Preset::RPentomino => "r_pentomino",
            Preset::LightWeightSpaceship => "light_weight_spaceship",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
