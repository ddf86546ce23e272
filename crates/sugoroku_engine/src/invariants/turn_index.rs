//! Turn index invariant.

use super::Invariant;
use crate::state::GameState;

/// Invariant: the current player index points at a player.
pub struct TurnIndexInvariant;

impl Invariant<GameState> for TurnIndexInvariant {
    fn holds(game: &GameState) -> bool {
        game.current_player_index() < game.players().len()
    }

    fn description() -> &'static str {
        "Current player index is within the player list"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line_board, two_player_game};

    #[test]
    fn test_index_wraps_and_holds() {
        let mut game = two_player_game(line_board(20));
        for _ in 0..5 {
            game = game.resolve_turn(1).expect("turn");
            assert!(TurnIndexInvariant::holds(&game));
        }
        assert_eq!(game.current_player_index(), 1);
    }
}
