//! Turn resolution.

use crate::contracts::{Contract, TurnContract};
use crate::effect::apply_effect;
use crate::error::TurnError;
use crate::state::{GameState, LastMove, TurnEvent};
use chrono::Utc;
use tracing::{debug, info, instrument};

impl GameState {
    /// Resolves one die roll for the current player and returns the next state.
    ///
    /// A player owing skips loses the whole turn: the counter drops by one
    /// and nothing moves. Otherwise the token moves `die` cells (overshoot
    /// stops on the goal), the landed cell's effect applies once, and
    /// landing on the goal ends the game with this player as winner. The
    /// turn passes to the next player in every case.
    ///
    /// `self` is never modified; a rejected turn leaves it as it was.
    ///
    /// # Errors
    ///
    /// - [`TurnError::GameOver`] if the game already ended
    /// - [`TurnError::InvalidDie`] if `die < 1`
    /// - [`TurnError::InvariantViolation`] if a postcondition fails (debug builds)
    #[instrument(skip(self), fields(game_id = %self.id, index = self.current_player_index))]
    pub fn resolve_turn(&self, die: u32) -> Result<GameState, TurnError> {
        TurnContract::pre(self, &die)?;

        let mut next = self.clone();
        let index = next.current_player_index;
        let last = next.board.last_cell_id();
        let acting = &mut next.players[index];

        if acting.skip_turns > 0 {
            acting.skip_turns -= 1;
            let remaining = acting.skip_turns;
            info!(player = %acting.id(), remaining, "Turn skipped");
            next.last_turn = Some(TurnEvent::Skipped {
                player_id: acting.id().clone(),
                remaining,
            });
        } else {
            let from = acting.position;
            let landed = from.saturating_add(die as usize).min(last);
            acting.position = landed;

            let cell = next.board.cell_at(landed);
            let to = apply_effect(landed, cell, acting, last);
            acting.position = to;

            let reached_goal = to == last;
            let player_id = acting.id().clone();
            debug!(player = %player_id, from, landed, to, cell = %cell.kind(), "Token moved");

            if reached_goal {
                info!(player = %player_id, "Player reached the goal");
                next.game_ended = true;
                next.winner = Some(player_id.clone());
            }
            next.last_move = Some(LastMove {
                from,
                to,
                player_id: player_id.clone(),
                timestamp: Utc::now(),
            });
            next.last_turn = Some(TurnEvent::Moved {
                player_id,
                from,
                landed,
                to,
                cell: cell.kind(),
                reached_goal,
            });
        }

        next.last_die_value = Some(die);
        next.current_player_index = (index + 1) % next.players.len();

        #[cfg(debug_assertions)]
        TurnContract::post(self, &next)?;

        Ok(next)
    }
}
