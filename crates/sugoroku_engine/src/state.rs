//! Game state container.

use crate::board::Board;
use crate::cell::CellKind;
use crate::error::SetupError;
use crate::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Unique identifier for a game.
pub type GameId = String;

/// The most recent token movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMove {
    /// Position before the die roll.
    pub from: usize,
    /// Position after the cell effect.
    pub to: usize,
    /// Player who moved.
    pub player_id: PlayerId,
    /// When the move was resolved.
    pub timestamp: DateTime<Utc>,
}

/// What the most recent turn did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TurnEvent {
    /// The player forfeited the turn.
    Skipped {
        /// Player whose turn was consumed.
        player_id: PlayerId,
        /// Skips still owed after this one.
        remaining: u32,
    },
    /// The player rolled and moved.
    Moved {
        /// Player who moved.
        player_id: PlayerId,
        /// Position before the roll.
        from: usize,
        /// Cell the die delivered the player to.
        landed: usize,
        /// Position after the landed cell's effect.
        to: usize,
        /// Kind of the landed cell (the effect that applied).
        cell: CellKind,
        /// True if this move won the game.
        reached_goal: bool,
    },
}

impl TurnEvent {
    /// Player the event belongs to.
    pub fn player_id(&self) -> &PlayerId {
        match self {
            Self::Skipped { player_id, .. } | Self::Moved { player_id, .. } => player_id,
        }
    }
}

/// Complete state of one game session.
///
/// Turn order is the order of `players` and never changes. The state owns
/// its players and board outright; nothing is shared between games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub(crate) id: GameId,
    pub(crate) players: Vec<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) board: Board,
    pub(crate) game_ended: bool,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) last_die_value: Option<u32>,
    pub(crate) last_move: Option<LastMove>,
    pub(crate) last_turn: Option<TurnEvent>,
}

impl GameState {
    /// Creates a game with every player on the start cell, first player to move.
    ///
    /// # Errors
    ///
    /// - [`SetupError::NoPlayers`] if `players` is empty
    /// - [`SetupError::DuplicatePlayerId`] if two players share an id
    #[instrument(skip(id, players, board), fields(players = players.len(), board = board.len()))]
    pub fn new(id: impl Into<GameId>, mut players: Vec<Player>, board: Board) -> Result<Self, SetupError> {
        if players.is_empty() {
            warn!("Rejected game without players");
            return Err(SetupError::NoPlayers);
        }
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id().as_str()) {
                warn!(id = %player.id(), "Rejected duplicate player id");
                return Err(SetupError::DuplicatePlayerId {
                    id: player.id().clone(),
                });
            }
        }
        players.iter_mut().for_each(Player::reset);

        let id = id.into();
        info!(game_id = %id, "Game created");
        Ok(Self {
            id,
            players,
            current_player_index: 0,
            board,
            game_ended: false,
            winner: None,
            last_die_value: None,
            last_move: None,
            last_turn: None,
        })
    }

    /// Game id.
    pub fn id(&self) -> &GameId {
        &self.id
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player with the given id.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Index of the player whose turn it is.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True once a player has reached the goal.
    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    /// The first player to reach the goal.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_deref().and_then(|id| self.player(id))
    }

    /// Die value of the most recent turn.
    pub fn last_die_value(&self) -> Option<u32> {
        self.last_die_value
    }

    /// Most recent token movement.
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    /// What the most recent turn did.
    pub fn last_turn(&self) -> Option<&TurnEvent> {
        self.last_turn.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::line_board;

    #[test]
    fn test_new_accepts_owned_and_borrowed_ids() {
        let borrowed = GameState::new("game-1", vec![Player::seated(0, "Ann")], line_board(5)).expect("borrowed id");
        assert_eq!(borrowed.id(), "game-1");

        let owned = GameState::new(String::from("game-2"), vec![Player::seated(0, "Ann")], line_board(5))
            .expect("owned id");
        assert_eq!(owned.id(), "game-2");
        assert_eq!(owned.current_player_index(), 0);
        assert!(owned.last_turn().is_none());
    }

    #[test]
    fn test_new_resets_players_and_rejects_duplicates() {
        let mut moved = Player::seated(0, "Ann");
        moved.position = 3;
        let game = GameState::new("game-3", vec![moved], line_board(5)).expect("game");
        assert_eq!(*game.players()[0].position(), 0);

        let twins = vec![Player::seated(0, "Ann"), Player::seated(0, "Bob")];
        let err = GameState::new("game-4", twins, line_board(5)).unwrap_err();
        assert!(matches!(err, SetupError::DuplicatePlayerId { .. }));
        assert!(matches!(
            GameState::new("game-5", Vec::new(), line_board(5)),
            Err(SetupError::NoPlayers)
        ));
    }
}
