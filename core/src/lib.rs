#![no_std]

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Immutable parameters fixed at game start.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    /// Independent per-cell probability of starting lit, in `[0, 1]`.
    pub lit_chance: f32,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, lit_chance: f32) -> Self {
        Self { size, lit_chance }
    }

    pub fn new((size_x, size_y): Coord2, lit_chance: f32) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let lit_chance = lit_chance.clamp(0.0, 1.0);
        Self::new_unchecked((size_x, size_y), lit_chance)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Rectangular grid of lit/dark cells. Pressing a cell toggles the flip
/// cross: the cell itself plus its in-bounds orthogonal neighbors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn from_cells(cells: Array2<Cell>) -> Self {
        Self { cells }
    }

    pub fn dark(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn from_lit_coords(size: Coord2, lit_coords: &[Coord2]) -> Result<Self> {
        let mut cells: Array2<Cell> = Array2::default(size.to_nd_index());

        for &coords in lit_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_nd_index()] = Cell::Lit;
        }

        Ok(Self::from_cells(cells))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn lit_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_lit())
            .count()
            .try_into()
            .unwrap()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// True iff every cell is dark, the winning position.
    pub fn all_dark(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_lit())
    }

    /// The board that results from pressing `coords`: every in-bounds member
    /// of the flip cross is toggled. Out-of-bounds members are skipped, an
    /// out-of-bounds center toggles nothing, so the operation is total.
    /// `self` is never modified; earlier snapshots stay valid.
    pub fn flip(&self, coords: Coord2) -> Self {
        let mut cells = self.cells.clone();
        for pos in self.cells.iter_cross(coords) {
            cells[pos.to_nd_index()] = cells[pos.to_nd_index()].toggled();
        }
        Self { cells }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    Toggled,
    Won,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Toggled => true,
            Self::Won => true,
        }
    }

    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_clamps_degenerate_values() {
        let config = GameConfig::new((0, 3), 1.5);

        assert_eq!(config.size, (1, 3));
        assert_eq!(config.lit_chance, 1.0);
        assert_eq!(config.total_cells(), 3);
    }

    #[test]
    fn corner_flip_lights_the_in_bounds_cross_only() {
        let board = Board::dark((3, 3));

        let flipped = board.flip((0, 0));

        let expected = Board::from_lit_coords((3, 3), &[(0, 0), (1, 0), (0, 1)]).unwrap();
        assert_eq!(flipped, expected);
    }

    #[test]
    fn flip_is_self_inverse() {
        let board = Board::from_lit_coords((4, 3), &[(1, 2), (3, 0)]).unwrap();

        assert_eq!(board.flip((2, 1)).flip((2, 1)), board);
    }

    #[test]
    fn flip_leaves_the_input_board_untouched() {
        let board = Board::from_lit_coords((2, 2), &[(0, 1)]).unwrap();
        let snapshot = board.clone();

        let _ = board.flip((1, 1));

        assert_eq!(board, snapshot);
    }

    #[test]
    fn flip_outside_the_board_changes_nothing() {
        let board = Board::from_lit_coords((2, 2), &[(0, 0)]).unwrap();

        assert_eq!(board.flip((7, 7)), board);
    }

    #[test]
    fn symmetric_four_press_sequence_returns_to_dark() {
        // Each cell of a 2x2 board lies in an even number of the four crosses.
        let board = Board::dark((2, 2));

        let pressed = board.flip((0, 0)).flip((1, 1)).flip((0, 1)).flip((1, 0));

        assert!(pressed.all_dark());
    }

    #[test]
    fn all_dark_is_false_while_any_cell_is_lit() {
        assert!(Board::dark((2, 2)).all_dark());
        assert!(!Board::from_lit_coords((2, 2), &[(1, 0)]).unwrap().all_dark());
    }

    #[test]
    fn from_lit_coords_rejects_out_of_range_cells() {
        assert_eq!(
            Board::from_lit_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }
}
