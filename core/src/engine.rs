use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Active,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// Exclusive owner of the current board. Flips are applied strictly in call
/// order, each against the board produced by the previous one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        let state = if board.all_dark() {
            EngineState::Won
        } else {
            EngineState::Active
        };
        Self { board, state }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn lit_count(&self) -> CellCount {
        self.board.lit_count()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board.cell_at(coords)
    }

    /// Read-only snapshot of the current position, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Applies one press. Input after the game is won is rejected.
    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        self.board = self.board.flip(coords);

        if self.board.all_dark() {
            self.state = EngineState::Won;
            Ok(FlipOutcome::Won)
        } else {
            Ok(FlipOutcome::Toggled)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, lit: &[Coord2]) -> Board {
        Board::from_lit_coords(size, lit).unwrap()
    }

    #[test]
    fn corner_flip_toggles_only_the_in_bounds_cross() {
        let mut engine = PlayEngine::new(board((3, 3), &[(2, 2)]));

        assert_eq!(engine.flip((0, 0)), Ok(FlipOutcome::Toggled));

        assert!(engine.cell_at((0, 0)).is_lit());
        assert!(engine.cell_at((1, 0)).is_lit());
        assert!(engine.cell_at((0, 1)).is_lit());
        assert_eq!(engine.lit_count(), 4);
    }

    #[test]
    fn clearing_the_last_lit_cells_wins_the_game() {
        let mut engine = PlayEngine::new(board((3, 3), &[(0, 0), (1, 0), (0, 1)]));

        assert_eq!(engine.flip((0, 0)), Ok(FlipOutcome::Won));
        assert_eq!(engine.state(), EngineState::Won);
        assert!(engine.is_finished());
        assert_eq!(engine.lit_count(), 0);
    }

    #[test]
    fn input_after_the_win_is_rejected() {
        let mut engine = PlayEngine::new(board((3, 3), &[(0, 0), (1, 0), (0, 1)]));
        engine.flip((0, 0)).unwrap();

        assert_eq!(engine.flip((1, 1)), Err(GameError::AlreadyEnded));
        assert!(engine.board().all_dark());
    }

    #[test]
    fn out_of_bounds_press_is_rejected_without_state_change() {
        let mut engine = PlayEngine::new(board((2, 2), &[(0, 0)]));

        assert_eq!(engine.flip((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(engine.lit_count(), 1);
    }

    #[test]
    fn board_that_starts_dark_is_already_won() {
        let engine = PlayEngine::new(Board::dark((2, 2)));

        assert_eq!(engine.state(), EngineState::Won);
        assert!(engine.is_finished());
    }
}
