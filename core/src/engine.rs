use alloc::collections::{BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    Marked,
    Unmarked,
}

/// Turn-based engine over one grid. Every accepted command flips only the
/// `visible`/`marked` flags; mine placement never changes after start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    state: GameState,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::from_grid(Grid::generate(config, seed))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            state: GameState::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Claims a cell as free. A mine loses the game and uncovers every
    /// mine for the final render; a zero-count cell opens its whole
    /// region; any other cell becomes visible on its own.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        let cell = self.grid[coords];
        let outcome = match cell.kind {
            _ if cell.visible => RevealOutcome::NoChange,
            CellKind::Mine => {
                log::debug!("mine hit at ({}, {})", coords.0, coords.1);
                self.grid.reveal_all_mines();
                self.state = GameState::Lost;
                RevealOutcome::Exploded
            }
            CellKind::Count(0) => {
                self.flood_fill(coords);
                RevealOutcome::Revealed
            }
            CellKind::Count(_) => {
                self.grid[coords].visible = true;
                RevealOutcome::Revealed
            }
        };
        self.check_won();
        Ok(outcome)
    }

    /// Flips the mark on any in-bounds cell, revealed ones included.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        let cell = &mut self.grid[coords];
        cell.marked = !cell.marked;
        let outcome = if cell.marked {
            FlagOutcome::Marked
        } else {
            FlagOutcome::Unmarked
        };
        self.check_won();
        Ok(outcome)
    }

    /// Opens the connected zero-count region around `start` with an
    /// explicit worklist. Bordering numbered cells become visible but are
    /// not expanded; mines are unreachable because a zero-count cell has
    /// no mine neighbor.
    fn flood_fill(&mut self, start: Coord2) {
        let bounds = self.grid.bounds();
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);
        let mut opened = 0usize;

        while let Some(coords) = to_visit.pop_front() {
            let cell = &mut self.grid[coords];
            if cell.visible {
                continue;
            }
            cell.visible = true;
            opened += 1;

            if matches!(cell.kind, CellKind::Count(0)) {
                // an opened empty cell sheds its flag, a numbered border
                // cell keeps it
                cell.marked = false;
                to_visit.extend(neighbors(coords, bounds).filter(|&pos| visited.insert(pos)));
            }
        }
        log::trace!(
            "flood fill from ({}, {}) opened {opened} cells",
            start.0,
            start.1
        );
    }

    fn check_won(&mut self) {
        if matches!(self.state, GameState::Playing) && self.grid.flags_match_mines() {
            self.state = GameState::Won;
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
