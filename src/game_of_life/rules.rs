//! Conway's B3/S23 transition rule

use super::Cell;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Neighbor counts that bring a dead cell to life
    pub const BIRTH: &'static [u8] = &[3];

    /// Neighbor counts that keep a living cell alive
    pub const SURVIVAL: &'static [u8] = &[2, 3];

    /// Maximum 8 neighbors in the Moore neighborhood
    pub const MAX_NEIGHBORS: u8 = 8;

    /// State of a cell in the next generation given its current state and neighbor count
    #[inline]
    pub fn next_state(current: Cell, neighbors: u8) -> Cell {
        debug_assert!(neighbors <= Self::MAX_NEIGHBORS);
        let table = match current {
            Cell::Alive => Self::SURVIVAL,
            Cell::Dead => Self::BIRTH,
        };
        Cell::from(table.contains(&neighbors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 2), Cell::Alive);
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 3), Cell::Alive);
        assert_eq!(GameOfLifeRules::next_state(Cell::Dead, 3), Cell::Alive);
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 1), Cell::Dead);
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 4), Cell::Dead);
        assert_eq!(GameOfLifeRules::next_state(Cell::Dead, 2), Cell::Dead);
        assert_eq!(GameOfLifeRules::next_state(Cell::Dead, 0), Cell::Dead);
    }

    #[test]
    fn test_every_neighbor_count() {
        let births: Vec<u8> = (0..=GameOfLifeRules::MAX_NEIGHBORS)
            .filter(|&n| GameOfLifeRules::next_state(Cell::Dead, n).is_alive())
            .collect();
        let survivals: Vec<u8> = (0..=GameOfLifeRules::MAX_NEIGHBORS)
            .filter(|&n| GameOfLifeRules::next_state(Cell::Alive, n).is_alive())
            .collect();
        assert_eq!(births, vec![3]);
        assert_eq!(survivals, vec![2, 3]);
    }
}
