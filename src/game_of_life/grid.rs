//! Grid representation and transforms for Game of Life

use super::Cell;
use crate::error::{LifeError, Result};
use std::fmt;

/// A finite, row-major grid of cells with cached population counters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    alive: u64,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width as usize * height as usize],
            alive: 0,
        }
    }

    /// Create a new square grid
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Create a grid from untrusted signed dimensions
    pub fn with_dimensions(width: i64, height: i64) -> Result<Self> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Self::new(w, h)),
            _ => Err(LifeError::InvalidDimension { width, height }),
        }
    }

    /// Create a grid from rows of `'#'` (alive) and `' '` (dead) characters
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = u32::try_from(rows.len())
            .map_err(|_| LifeError::InvalidRange(format!("{} rows is too many", rows.len())))?;
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(LifeError::InvalidRange(format!(
                    "row {} has length {}, expected {}",
                    y, len, width
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or_else(|| {
                    LifeError::parse_at_line(y + 1, format!("invalid character {:?} at column {}", ch, x))
                })?;
                cells.push(cell);
            }
        }

        let width = u32::try_from(width)
            .map_err(|_| LifeError::InvalidRange(format!("row length {} is too long", width)))?;
        Ok(Self::from_cells(width, height, cells))
    }

    /// Adopt a row-major cell buffer, recomputing the counters
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        let mut grid = Self {
            width,
            height,
            cells,
            alive: 0,
        };
        grid.recount();
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn total_cells(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn alive_cells(&self) -> u64 {
        self.alive
    }

    pub fn dead_cells(&self) -> u64 {
        self.total_cells() - self.alive
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access for bulk writers; callers must `recount` afterwards
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Recompute the population counter from the buffer
    pub(crate) fn recount(&mut self) {
        self.alive = self.cells.iter().filter(|cell| cell.is_alive()).count() as u64;
    }

    /// Iterate over rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let width = self.width as usize;
        (0..self.height as usize).map(move |y| &self.cells[y * width..(y + 1) * width])
    }

    /// Convert 2D coordinates to a 1D index without bounds checking
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x as u64, y as u64));
        }
        Ok(self.index(x, y))
    }

    fn out_of_bounds(&self, x: u64, y: u64) -> LifeError {
        LifeError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, x: u32, y: u32) -> Result<Cell> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, x: u32, y: u32, value: Cell) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        let old = std::mem::replace(&mut self.cells[idx], value);
        match (old, value) {
            (Cell::Dead, Cell::Alive) => self.alive += 1,
            (Cell::Alive, Cell::Dead) => self.alive -= 1,
            _ => {}
        }
        Ok(())
    }

    /// Coordinates of every living cell as `(x, y)`
    pub fn living_cells(&self) -> Vec<(u32, u32)> {
        let mut living = Vec::with_capacity(self.alive as usize);
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_alive() {
                    living.push((x as u32, y as u32));
                }
            }
        }
        living
    }

    /// Resize the grid, keeping the top-left overlap and filling new cells as dead
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let keep_w = self.width.min(new_width) as usize;
        let keep_h = self.height.min(new_height) as usize;
        let mut cells = vec![Cell::Dead; new_width as usize * new_height as usize];

        for (y, row) in self.rows().take(keep_h).enumerate() {
            let start = y * new_width as usize;
            cells[start..start + keep_w].copy_from_slice(&row[..keep_w]);
        }

        self.width = new_width;
        self.height = new_height;
        self.cells = cells;
        self.recount();
    }

    pub fn resize_square(&mut self, size: u32) {
        self.resize(size, size);
    }

    /// Extract the half-open rectangle spanned by two corners.
    ///
    /// Corner order does not matter; the rectangle is always
    /// `[min(x0, x1), max(x0, x1)) x [min(y0, y1), max(y0, y1))`.
    /// Zero-sized results are allowed.
    pub fn crop(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Grid> {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        if right > self.width || bottom > self.height {
            return Err(self.out_of_bounds(right as u64, bottom as u64));
        }

        let width = right - left;
        let height = bottom - top;
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in self.rows().skip(top as usize).take(height as usize) {
            cells.extend_from_slice(&row[left as usize..right as usize]);
        }

        Ok(Grid::from_cells(width, height, cells))
    }

    /// Like [`Grid::crop`] but rejects rectangles with zero width or height
    pub fn crop_non_empty(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Grid> {
        if x0 == x1 || y0 == y1 {
            return Err(LifeError::InvalidRange(format!(
                "crop window ({}, {})-({}, {}) is empty",
                x0, y0, x1, y1
            )));
        }
        self.crop(x0, y0, x1, y1)
    }

    /// Overlay `other` with its top-left corner at `(x0, y0)`.
    ///
    /// With `alive_only` set, living source cells are copied but dead source
    /// cells never kill a living destination cell.
    pub fn merge(&mut self, other: &Grid, x0: u32, y0: u32, alive_only: bool) -> Result<()> {
        let (right, bottom) = match (x0.checked_add(other.width), y0.checked_add(other.height)) {
            (Some(r), Some(b)) => (r, b),
            _ => {
                return Err(LifeError::InvalidRange(format!(
                    "merging a {}x{} grid at ({}, {}) overflows the coordinate space",
                    other.width, other.height, x0, y0
                )))
            }
        };
        if right > self.width || bottom > self.height {
            return Err(self.out_of_bounds(right as u64, bottom as u64));
        }

        let width = self.width as usize;
        for (dy, src_row) in other.rows().enumerate() {
            let start = (y0 as usize + dy) * width + x0 as usize;
            let dst_row = &mut self.cells[start..start + src_row.len()];
            for (dst, &src) in dst_row.iter_mut().zip(src_row) {
                match (*dst, src) {
                    (Cell::Dead, Cell::Alive) => {
                        *dst = Cell::Alive;
                        self.alive += 1;
                    }
                    (Cell::Alive, Cell::Dead) if !alive_only => {
                        *dst = Cell::Dead;
                        self.alive -= 1;
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Copy of the grid rotated clockwise by `90 * rotation` degrees
    pub fn rotate(&self, rotation: i64) -> Grid {
        let (w, h) = (self.width, self.height);
        match rotation.rem_euclid(4) {
            0 => self.clone(),
            2 => {
                let mut cells = self.cells.clone();
                cells.reverse();
                Grid {
                    width: w,
                    height: h,
                    cells,
                    alive: self.alive,
                }
            }
            quarter => {
                let clockwise = quarter == 1;
                let mut cells = Vec::with_capacity(self.cells.len());
                // Output is h wide and w tall.
                for ny in 0..w {
                    for nx in 0..h {
                        let (x, y) = if clockwise {
                            (ny, h - 1 - nx)
                        } else {
                            (w - 1 - ny, nx)
                        };
                        cells.push(self.cells[self.index(x, y)]);
                    }
                }
                Grid {
                    width: h,
                    height: w,
                    cells,
                    alive: self.alive,
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.width as usize);
        writeln!(f, "+{}+", border)?;
        for row in self.rows() {
            write!(f, "|")?;
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "+{}+", border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_counters(grid: &Grid) {
        assert_eq!(grid.alive_cells() + grid.dead_cells(), grid.total_cells());
        let alive = grid.cells().iter().filter(|c| c.is_alive()).count() as u64;
        assert_eq!(grid.alive_cells(), alive);
    }

    fn sample() -> Grid {
        Grid::from_rows(&["#  ", " ##", "#  ", "  #"]).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.total_cells(), 12);
        assert_eq!(grid.dead_cells(), 12);
        assert!(grid.is_empty());

        let empty = Grid::new(0, 0);
        assert_eq!(empty.total_cells(), 0);
        assert_eq!(empty.alive_cells(), 0);
        assert_eq!(empty.dead_cells(), 0);
    }

    #[test]
    fn test_signed_dimensions() {
        assert!(Grid::with_dimensions(0, 0).is_ok());
        assert!(matches!(
            Grid::with_dimensions(-1, 3),
            Err(LifeError::InvalidDimension { width: -1, height: 3 })
        ));
        assert!(matches!(
            Grid::with_dimensions(2, -5),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_rows() {
        let grid = sample();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.alive_cells(), 5);
        assert_eq!(grid.get(1, 1).unwrap(), Cell::Alive);
        assert_eq!(grid.get(1, 0).unwrap(), Cell::Dead);

        assert!(matches!(Grid::from_rows(&["##", "#"]), Err(LifeError::InvalidRange(_))));
        assert!(matches!(Grid::from_rows(&["#x"]), Err(LifeError::Parse { .. })));
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new(3, 2);
        assert!(matches!(grid.get(3, 0), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(grid.get(0, 2), Err(LifeError::OutOfBounds { .. })));
        assert!(grid.set(3, 1, Cell::Alive).is_err());
        assert_eq!(grid.alive_cells(), 0);
    }

    #[test]
    fn test_set_counts_true_delta() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Cell::Alive).unwrap();
        grid.set(0, 0, Cell::Alive).unwrap();
        assert_eq!(grid.alive_cells(), 1);
        assert_eq!(grid.dead_cells(), 3);

        grid.set(1, 1, Cell::Dead).unwrap();
        assert_eq!(grid.alive_cells(), 1);

        grid.set(0, 0, Cell::Dead).unwrap();
        grid.set(0, 0, Cell::Dead).unwrap();
        assert_eq!(grid.alive_cells(), 0);
        assert_counters(&grid);
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let original = sample();
        let mut grid = original.clone();

        grid.resize(5, 2);
        assert_eq!((grid.width(), grid.height()), (5, 2));
        assert_eq!(grid.get(0, 0).unwrap(), Cell::Alive);
        assert_eq!(grid.get(2, 1).unwrap(), Cell::Alive);
        assert_eq!(grid.get(4, 1).unwrap(), Cell::Dead);
        assert_eq!(grid.alive_cells(), 3);
        assert_counters(&grid);

        grid.resize(3, 4);
        assert_eq!(grid.crop(0, 0, 3, 2).unwrap(), original.crop(0, 0, 3, 2).unwrap());
        assert_eq!(grid.get(0, 2).unwrap(), Cell::Dead);
        assert_counters(&grid);

        grid.resize_square(0);
        assert_eq!(grid.total_cells(), 0);
        assert_counters(&grid);
    }

    #[test]
    fn test_crop_any_corner_order() {
        let grid = sample();
        let a = grid.crop(0, 1, 2, 3).unwrap();
        let b = grid.crop(2, 3, 0, 1).unwrap();
        let c = grid.crop(2, 1, 0, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!((a.width(), a.height()), (2, 2));
        assert_eq!(a.to_string(), "+--+\n| #|\n|# |\n+--+\n");
        assert_counters(&a);
    }

    #[test]
    fn test_crop_bounds_and_empty() {
        let grid = sample();
        assert!(matches!(grid.crop(0, 0, 4, 1), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(grid.crop(0, 5, 1, 1), Err(LifeError::OutOfBounds { .. })));

        let empty = grid.crop(1, 1, 1, 3).unwrap();
        assert_eq!((empty.width(), empty.height()), (0, 2));
        assert_counters(&empty);

        assert!(matches!(grid.crop_non_empty(1, 1, 1, 3), Err(LifeError::InvalidRange(_))));
        assert!(grid.crop_non_empty(0, 0, 3, 4).is_ok());
    }

    #[test]
    fn test_merge_overwrite() {
        let mut grid = Grid::from_rows(&["####", "####", "####"]).unwrap();
        let patch = Grid::from_rows(&["# ", " #"]).unwrap();
        grid.merge(&patch, 2, 1, false).unwrap();
        assert_eq!(grid.to_string(), "+----+\n|####|\n|### |\n|## #|\n+----+\n");
        assert_eq!(grid.alive_cells(), 10);
        assert_counters(&grid);
    }

    #[test]
    fn test_merge_alive_only() {
        let mut grid = Grid::from_rows(&["#   ", "    "]).unwrap();
        let patch = Grid::from_rows(&[" #", "# "]).unwrap();
        grid.merge(&patch, 0, 0, true).unwrap();
        assert_eq!(grid.to_string(), "+----+\n|##  |\n|#   |\n+----+\n");
        assert_eq!(grid.alive_cells(), 3);

        // Merging the same live cells again changes nothing.
        grid.merge(&patch, 0, 0, true).unwrap();
        assert_eq!(grid.alive_cells(), 3);
        assert_counters(&grid);
    }

    #[test]
    fn test_merge_bounds() {
        let mut grid = Grid::new(4, 4);
        let patch = Grid::from_rows(&["##", "##"]).unwrap();
        assert!(matches!(grid.merge(&patch, 3, 0, false), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(grid.merge(&patch, 0, 3, true), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(
            grid.merge(&patch, u32::MAX, 0, false),
            Err(LifeError::InvalidRange(_))
        ));
        assert!(grid.is_empty());

        grid.merge(&patch, 2, 2, false).unwrap();
        assert_eq!(grid.alive_cells(), 4);
    }

    #[test]
    fn test_rotate_clockwise() {
        let column = Grid::from_rows(&["#", " ", " "]).unwrap();
        let rotated = column.rotate(1);
        assert_eq!((rotated.width(), rotated.height()), (3, 1));
        assert_eq!(rotated.to_string(), "+---+\n|  #|\n+---+\n");

        let grid = Grid::from_rows(&["## ", "   "]).unwrap();
        assert_eq!(grid.rotate(1).to_string(), "+--+\n| #|\n| #|\n|  |\n+--+\n");
        assert_eq!(grid.rotate(2).to_string(), "+---+\n|   |\n| ##|\n+---+\n");
        assert_eq!(grid.rotate(3).to_string(), "+--+\n|  |\n|# |\n|# |\n+--+\n");
        assert_eq!(grid.rotate(-1), grid.rotate(3));
    }

    #[test]
    fn test_rotate_laws() {
        let grid = sample();
        assert_eq!(grid.rotate(4), grid.rotate(0));
        assert_eq!(grid.rotate(0), grid);
        assert_eq!(grid.rotate(i64::MAX), grid.rotate(3));
        assert_eq!(grid.rotate(i64::MIN), grid);

        for k in -5..=5_i64 {
            let rotated = grid.rotate(k);
            assert_eq!(rotated.alive_cells(), grid.alive_cells());
            assert_counters(&rotated);
            let back = (4 - k.rem_euclid(4)).rem_euclid(4);
            assert_eq!(rotated.rotate(back), grid);
        }
    }

    #[test]
    fn test_rendering() {
        let grid = Grid::from_rows(&[" # ", "  #", "###"]).unwrap();
        assert_eq!(
            grid.to_string(),
            "+---+\n| # |\n|  #|\n|###|\n+---+\n"
        );
        assert_eq!(Grid::new(0, 0).to_string(), "++\n++\n");
    }

    #[test]
    fn test_living_cells() {
        let grid = sample();
        assert_eq!(grid.living_cells(), vec![(0, 0), (1, 1), (2, 1), (0, 2), (2, 3)]);
    }
}
