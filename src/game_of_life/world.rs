//! Double-buffered Game of Life world

use super::{Cell, GameOfLifeRules, Grid};
use crate::error::{LifeError, Result};
use itertools::iproduct;
use tracing::{debug, trace};

/// A world holding the current generation and a same-sized scratch buffer
#[derive(Debug, Clone, Default)]
pub struct World {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl World {
    /// Create an empty 0x0 world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world of dead cells
    pub fn with_size(width: u32, height: u32) -> Self {
        Self::from_grid(Grid::new(width, height))
    }

    pub fn square(size: u32) -> Self {
        Self::with_size(size, size)
    }

    /// Adopt an existing grid as the initial state
    pub fn from_grid(initial: Grid) -> Self {
        let next = Grid::new(initial.width(), initial.height());
        Self {
            current: initial,
            next,
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    pub fn total_cells(&self) -> u64 {
        self.current.total_cells()
    }

    pub fn alive_cells(&self) -> u64 {
        self.current.alive_cells()
    }

    pub fn dead_cells(&self) -> u64 {
        self.current.dead_cells()
    }

    /// Number of generations stepped since construction
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current generation
    pub fn get_state(&self) -> &Grid {
        &self.current
    }

    pub fn into_state(self) -> Grid {
        self.current
    }

    /// Resize the current state, keeping the top-left overlap
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        self.current.resize(new_width, new_height);
        self.next = Grid::new(new_width, new_height);
    }

    pub fn resize_square(&mut self, size: u32) {
        self.resize(size, size);
    }

    /// Count living neighbors of `(x, y)` in the current generation
    pub fn neighbor_count(&self, x: u32, y: u32, toroidal: bool) -> Result<u8> {
        if x >= self.width() || y >= self.height() {
            return Err(LifeError::OutOfBounds {
                x: x as u64,
                y: y as u64,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(count_neighbors(&self.current, x, y, toroidal))
    }

    /// Advance one generation
    pub fn step(&mut self, toroidal: bool) {
        let current = &self.current;
        let next = self.next.cells_mut();

        for (y, x) in iproduct!(0..current.height(), 0..current.width()) {
            let idx = current.index(x, y);
            let neighbors = count_neighbors(current, x, y, toroidal);
            next[idx] = GameOfLifeRules::next_state(current.cells()[idx], neighbors);
        }

        self.next.recount();
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        trace!(
            generation = self.generation,
            alive = self.current.alive_cells(),
            "stepped world"
        );
    }

    /// Apply `step` exactly `steps` times
    pub fn advance(&mut self, steps: i64, toroidal: bool) -> Result<()> {
        if steps < 0 {
            return Err(LifeError::InvalidArgument(format!(
                "cannot advance a negative number of steps ({})",
                steps
            )));
        }

        debug!(steps, toroidal, from = self.generation, "advancing world");
        for _ in 0..steps {
            self.step(toroidal);
        }
        Ok(())
    }
}

impl From<Grid> for World {
    fn from(grid: Grid) -> Self {
        Self::from_grid(grid)
    }
}

/// Distinct coordinates adjacent to `c` (itself included) along one axis.
///
/// Toroidal axes wrap with `((c % n) + n) % n`; bounded axes drop anything
/// outside `[0, n)`. Duplicates only arise on axes shorter than 3.
fn axis_window(c: u32, extent: u32, toroidal: bool) -> ([u32; 3], usize) {
    let mut window = [0; 3];
    let mut len = 0;
    let n = extent as i64;

    for offset in -1..=1_i64 {
        let raw = c as i64 + offset;
        let pos = if toroidal {
            raw.rem_euclid(n)
        } else if (0..n).contains(&raw) {
            raw
        } else {
            continue;
        };
        let pos = pos as u32;
        if !window[..len].contains(&pos) {
            window[len] = pos;
            len += 1;
        }
    }

    (window, len)
}

fn count_neighbors(grid: &Grid, x: u32, y: u32, toroidal: bool) -> u8 {
    let (cols, ncols) = axis_window(x, grid.width(), toroidal);
    let (rows, nrows) = axis_window(y, grid.height(), toroidal);

    iproduct!(&rows[..nrows], &cols[..ncols])
        .filter(|&(&ny, &nx)| (nx, ny) != (x, y))
        .filter(|&(&ny, &nx)| grid.cells()[grid.index(nx, ny)] == Cell::Alive)
        .count() as u8
}
