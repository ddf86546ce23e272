//! Shared fixtures for unit tests.

use crate::board::Board;
use crate::cell::{Cell, CellKind};
use crate::player::Player;
use crate::state::GameState;

/// Builds a board from kinds, ids taken from positions.
pub(crate) fn board_of(kinds: &[CellKind]) -> Board {
    let cells = kinds
        .iter()
        .enumerate()
        .map(|(id, kind)| Cell::new(id, *kind))
        .collect();
    Board::from_cells(cells).expect("fixture board must be valid")
}

/// Start, `length - 2` normal cells, goal.
pub(crate) fn line_board(length: usize) -> Board {
    let mut kinds = vec![CellKind::Normal; length];
    kinds[0] = CellKind::Start;
    kinds[length - 1] = CellKind::Goal;
    board_of(&kinds)
}

/// Game with `count` seated players.
pub(crate) fn n_player_game(board: Board, count: usize) -> GameState {
    const NAMES: [&str; 4] = ["Ann", "Bob", "Cho", "Dee"];
    let players = (0..count)
        .map(|seat| Player::seated(seat, NAMES[seat % NAMES.len()]))
        .collect();
    GameState::new("game-test", players, board).expect("fixture game must be valid")
}

/// Ann versus Bob.
pub(crate) fn two_player_game(board: Board) -> GameState {
    n_player_game(board, 2)
}
