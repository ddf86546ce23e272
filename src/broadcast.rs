//! Move broadcasting collaborator. No transport lives here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sugoroku_engine::{GameId, GameState, TurnEvent};
use tracing::{info, instrument};

/// What other participants are told after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNotice {
    /// Game the turn belongs to.
    pub game_id: GameId,
    /// Die value rolled.
    pub die: u32,
    /// What the turn did.
    pub event: TurnEvent,
    /// Whether the turn ended the game.
    pub game_ended: bool,
    /// When the notice was produced.
    pub at: DateTime<Utc>,
}

impl MoveNotice {
    /// Builds the notice for the turn that produced `state`.
    ///
    /// Returns `None` if `state` has not resolved a turn yet.
    pub fn from_state(state: &GameState, die: u32) -> Option<Self> {
        let event = state.last_turn()?.clone();
        Some(Self {
            game_id: state.id().clone(),
            die,
            event,
            game_ended: state.game_ended(),
            at: Utc::now(),
        })
    }
}

/// Announces resolved turns.
pub trait MoveBroadcaster: Send + Sync {
    /// Announces `notice`. Must not block or fail.
    fn broadcast(&self, notice: &MoveNotice);
}

/// Broadcaster that tells nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl MoveBroadcaster for NoopBroadcaster {
    fn broadcast(&self, _notice: &MoveNotice) {}
}

/// Broadcaster that writes each notice to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBroadcaster;

impl MoveBroadcaster for LogBroadcaster {
    #[instrument(skip(self, notice), fields(game_id = %notice.game_id, player_id = %notice.event.player_id()))]
    fn broadcast(&self, notice: &MoveNotice) {
        match &notice.event {
            TurnEvent::Skipped { remaining, .. } => {
                info!(die = notice.die, remaining, "Turn skipped");
            }
            TurnEvent::Moved { from, to, cell, .. } => {
                info!(die = notice.die, from, to, cell = %cell, game_ended = notice.game_ended, "Move");
            }
        }
    }
}
