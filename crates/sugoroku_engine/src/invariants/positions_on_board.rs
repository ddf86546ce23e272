//! Positions-on-board invariant: every token sits on an existing cell.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `0 <= position <= last_cell_id` for every player.
pub struct PositionsOnBoardInvariant;

impl Invariant<GameState> for PositionsOnBoardInvariant {
    fn holds(game: &GameState) -> bool {
        let last = game.board().last_cell_id();
        game.players().iter().all(|p| *p.position() <= last)
    }

    fn description() -> &'static str {
        "Every player stands on a cell of the board"
    }
}
