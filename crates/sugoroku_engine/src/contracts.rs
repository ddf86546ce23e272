//! Contract-based validation for turn resolution.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, die)} resolve_turn {Q(before, after)}

use crate::error::TurnError;
use crate::invariants::{InvariantSet, SugorokuInvariants};
use crate::state::GameState;
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TurnError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TurnError>;
}

/// Precondition: the game has no winner yet.
pub struct GameInProgress;

impl GameInProgress {
    /// Rejects turns against a finished game.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<(), TurnError> {
        if game.game_ended() {
            warn!(game_id = %game.id(), "Turn requested after game end");
            Err(TurnError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: die values start at 1.
pub struct ValidDie;

impl ValidDie {
    /// Rejects a zero die.
    #[instrument]
    pub fn check(die: u32) -> Result<(), TurnError> {
        if die < 1 {
            warn!(die, "Invalid die value");
            Err(TurnError::InvalidDie { value: die })
        } else {
            Ok(())
        }
    }
}

/// Contract for one die roll.
///
/// Preconditions:
/// - game not ended
/// - die at least 1
///
/// Postconditions:
/// - every token on the board
/// - game ended iff someone on the goal, winner consistent
/// - turn index in range
/// - the game id and board are untouched
pub struct TurnContract;

impl Contract<GameState, u32> for TurnContract {
    fn pre(game: &GameState, die: &u32) -> Result<(), TurnError> {
        GameInProgress::check(game)?;
        ValidDie::check(*die)
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), TurnError> {
        if before.id() != after.id() || before.board() != after.board() {
            return Err(TurnError::InvariantViolation {
                description: "Turn changed the game id or board".to_string(),
            });
        }
        SugorokuInvariants::check_all(after).map_err(|violations| {
            let description = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            TurnError::InvariantViolation { description }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{line_board, two_player_game};

    #[test]
    fn test_precondition_accepts_fresh_game() {
        let game = two_player_game(line_board(6));
        assert!(TurnContract::pre(&game, &1).is_ok());
    }

    #[test]
    fn test_precondition_rejects_zero_die() {
        let game = two_player_game(line_board(6));
        assert_eq!(
            TurnContract::pre(&game, &0),
            Err(TurnError::InvalidDie { value: 0 })
        );
    }

    #[test]
    fn test_precondition_rejects_finished_game() {
        let game = two_player_game(line_board(4)).resolve_turn(3).expect("turn");
        assert_eq!(TurnContract::pre(&game, &2), Err(TurnError::GameOver));
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = two_player_game(line_board(6));
        let mut after = before.resolve_turn(2).expect("turn");
        assert!(TurnContract::post(&before, &after).is_ok());

        after.players[1].position = 40;
        assert!(matches!(
            TurnContract::post(&before, &after),
            Err(TurnError::InvariantViolation { .. })
        ));
    }
}
