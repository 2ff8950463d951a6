use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Fails with `InvalidConfig` when the mines cannot leave at least one
    /// safe cell on a `size`×`size` field.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 || mines >= mult(size, size) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self { size, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

/// Square field of cells. Mine placement and adjacency counts are fixed at
/// construction; play only flips the per-cell `visible`/`marked` flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Places `config.mines` mines by rejection sampling: draw a uniform
    /// `(row, column)` and retry on already-mined cells. The config
    /// guarantees at least one safe cell, so the loop terminates.
    pub fn generate(config: GameConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let size = usize::from(config.size);
        let mut cells: Array2<Cell> = Array2::default((size, size));

        let mut placed: CellCount = 0;
        while placed < config.mines {
            let row: Coord = rng.random_range(0..config.size);
            let col: Coord = rng.random_range(0..config.size);
            let cell = &mut cells[(row, col).to_nd_index()];
            if !cell.kind.is_mine() {
                cell.kind = CellKind::Mine;
                placed += 1;
            }
        }
        log::debug!(
            "placed {placed} mines on a {0}x{0} field (seed {seed})",
            config.size
        );

        let mut grid = Self {
            cells,
            mine_count: config.mines,
        };
        grid.assign_counts();
        grid
    }

    /// Deterministic constructor from explicit mine positions. Duplicate
    /// coordinates collapse into a single mine.
    pub fn with_mines(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidConfig);
        }
        let side = usize::from(size);
        let mut cells: Array2<Cell> = Array2::default((side, side));

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            cells[coords.to_nd_index()].kind = CellKind::Mine;
        }

        let mine_count = cells.iter().filter(|cell| cell.kind.is_mine()).count() as CellCount;
        if mine_count >= mult(size, size) {
            return Err(GameError::InvalidConfig);
        }

        let mut grid = Self { cells, mine_count };
        grid.assign_counts();
        Ok(grid)
    }

    fn assign_counts(&mut self) {
        let bounds = self.bounds();
        for row in 0..bounds.0 {
            for col in 0..bounds.1 {
                if self[(row, col)].kind.is_mine() {
                    continue;
                }
                let count = neighbors((row, col), bounds)
                    .filter(|&pos| self[pos].kind.is_mine())
                    .count() as u8;
                self[(row, col)].kind = CellKind::Count(count);
            }
        }
    }

    pub fn size(&self) -> Coord {
        self.bounds().0
    }

    pub fn bounds(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let bounds = self.bounds();
        if coords.0 < bounds.0 && coords.1 < bounds.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// True when the marked cells are exactly the mine cells.
    pub fn flags_match_mines(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.marked == cell.kind.is_mine())
    }

    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.kind.is_mine() {
                cell.visible = true;
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn mines_on(grid: &Grid) -> usize {
        let bounds = grid.bounds();
        let mut count = 0;
        for row in 0..bounds.0 {
            for col in 0..bounds.1 {
                if grid[(row, col)].kind.is_mine() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn config_rejects_impossible_mine_counts() {
        assert_eq!(GameConfig::new(9, 81), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(9, 200), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(0, 0), Err(GameError::InvalidConfig));
        assert!(GameConfig::new(9, 80).is_ok());
        assert!(GameConfig::new(9, 0).is_ok());
    }

    #[test]
    fn generate_places_exactly_the_requested_mines() {
        for seed in 0..20 {
            let config = GameConfig::new(9, 10).unwrap();
            let grid = Grid::generate(config, seed);
            assert_eq!(mines_on(&grid), 10);
            assert_eq!(grid.mine_count(), 10);
        }
    }

    #[test]
    fn generate_counts_match_in_bounds_mine_neighbors() {
        let config = GameConfig::new(9, 30).unwrap();
        let grid = Grid::generate(config, 7);
        let bounds = grid.bounds();

        for row in 0..bounds.0 {
            for col in 0..bounds.1 {
                let cell = grid[(row, col)];
                if cell.kind.is_mine() {
                    continue;
                }
                let expected = neighbors((row, col), bounds)
                    .filter(|&pos| grid[pos].kind.is_mine())
                    .count() as u8;
                assert_eq!(cell.kind, CellKind::Count(expected));
            }
        }
    }

    #[test]
    fn near_full_field_still_generates() {
        let config = GameConfig::new(3, 8).unwrap();
        let grid = Grid::generate(config, 0);
        assert_eq!(mines_on(&grid), 8);
    }

    #[test]
    fn lone_mine_yields_a_ring_of_ones() {
        let grid = Grid::with_mines(9, &[(4, 4)]).unwrap();

        assert_eq!(grid[(3, 3)].kind, CellKind::Count(1));
        assert_eq!(grid[(4, 3)].kind, CellKind::Count(1));
        assert_eq!(grid[(5, 5)].kind, CellKind::Count(1));
        assert_eq!(grid[(0, 0)].kind, CellKind::Count(0));
        assert_eq!(grid[(2, 2)].kind, CellKind::Count(0));
    }

    #[test]
    fn corner_and_edge_counts_restrict_to_in_bounds_neighbors() {
        // mines at the three neighbors of corner (0,0)
        let grid = Grid::with_mines(9, &[(0, 1), (1, 0), (1, 1)]).unwrap();
        assert_eq!(grid[(0, 0)].kind, CellKind::Count(3));

        // edge cell flanked on both sides
        let grid = Grid::with_mines(9, &[(0, 3), (0, 5)]).unwrap();
        assert_eq!(grid[(0, 4)].kind, CellKind::Count(2));
    }

    #[test]
    fn with_mines_rejects_out_of_bounds_and_full_fields() {
        assert_eq!(
            Grid::with_mines(3, &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
        let all: Vec<Coord2> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .collect();
        assert_eq!(Grid::with_mines(3, &all), Err(GameError::InvalidConfig));
    }

    #[test]
    fn with_mines_collapses_duplicates() {
        let grid = Grid::with_mines(3, &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(grid.mine_count(), 1);
    }
}
