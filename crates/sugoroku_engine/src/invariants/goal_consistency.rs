//! Goal consistency invariant: the game ends exactly when someone reaches the goal.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `game_ended` iff a player stands on the goal, and the winner
/// is set iff the game ended, to a player standing on the goal.
pub struct GoalConsistencyInvariant;

impl Invariant<GameState> for GoalConsistencyInvariant {
    fn holds(game: &GameState) -> bool {
        let last = game.board().last_cell_id();
        let someone_on_goal = game.players().iter().any(|p| *p.position() == last);

        if game.game_ended() != someone_on_goal {
            return false;
        }

        match game.winner() {
            Some(winner) => game.game_ended() && *winner.position() == last,
            None => !game.game_ended() && game.winner.is_none(),
        }
    }

    fn description() -> &'static str {
        "Game ends exactly when a player reaches the goal, and that player is the winner"
    }
}
