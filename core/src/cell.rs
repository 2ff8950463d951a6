use serde::{Deserialize, Serialize};

/// Mine-or-count identity of a cell, assigned once at grid construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    Count(u8),
}

impl CellKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// One field cell: fixed identity plus the two player-driven flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub visible: bool,
    pub marked: bool,
}

impl Cell {
    pub const fn is_explored(self) -> bool {
        matches!(self.kind, CellKind::Count(0)) && self.visible
    }

    /// Renderable glyph: visible identity wins over the mark, the mark
    /// wins over the hidden blank.
    pub fn glyph(self) -> char {
        match self.kind {
            CellKind::Mine if self.visible => 'X',
            CellKind::Count(0) if self.visible => '/',
            CellKind::Count(n) if self.visible => char::from_digit(n.into(), 10).unwrap_or('?'),
            _ if self.marked => '*',
            _ => '.',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            kind: CellKind::Count(0),
            visible: false,
            marked: false,
        }
    }
}
