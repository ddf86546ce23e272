//! Registry of running games.

use derive_new::new;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use sugoroku_engine::{Dice, GameId, GameState, TurnError};
use tracing::{debug, info, instrument, warn};

/// A running game and everything needed to play its next turn.
#[derive(Debug, Clone, new)]
pub struct GameSession {
    /// Current state.
    pub state: GameState,
    /// Random source owned by this game.
    pub rng: StdRng,
    /// Dice this game rolls.
    pub dice: Dice,
    /// Whether turns emit sound cues.
    pub play_sound: bool,
}

impl GameSession {
    /// Resolves one turn, rolling the dice unless `die` is supplied.
    ///
    /// The state is only replaced when the turn resolves. Returns the die
    /// value used.
    ///
    /// # Errors
    ///
    /// Propagates [`TurnError`] from the resolver; the state is unchanged.
    #[instrument(skip(self), fields(game_id = %self.state.id()))]
    pub fn play(&mut self, die: Option<u32>) -> Result<u32, TurnError> {
        let die = match die {
            Some(value) => value,
            None => self.dice.roll(&mut self.rng),
        };
        let next = self.state.resolve_turn(die)?;
        self.state = next;
        debug!(die, ended = self.state.game_ended(), "Turn played");
        Ok(die)
    }
}

/// Manages all running games.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<GameId, GameSession>>>,
}

impl SessionManager {
    /// Creates an empty manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GameId, GameSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a session under its game id.
    ///
    /// Returns `false` and leaves the registry untouched if the id is taken.
    #[instrument(skip(self, session), fields(game_id = %session.state.id()))]
    pub fn insert(&self, session: GameSession) -> bool {
        let mut sessions = self.lock();
        let id = session.state.id().clone();
        if sessions.contains_key(&id) {
            warn!("Session already exists");
            return false;
        }
        sessions.insert(id, session);
        info!(count = sessions.len(), "Session registered");
        true
    }

    /// Snapshot of a game's state.
    #[instrument(skip(self))]
    pub fn state(&self, id: &str) -> Option<GameState> {
        let state = self.lock().get(id).map(|s| s.state.clone());
        if state.is_none() {
            debug!("Session not found");
        }
        state
    }

    /// Runs `f` on a session while holding the registry lock.
    ///
    /// Turns for every game are serialized through this lock.
    pub fn with_session<F, T>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut GameSession) -> T,
    {
        self.lock().get_mut(id).map(f)
    }

    /// Removes a finished or abandoned game.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Option<GameSession> {
        let removed = self.lock().remove(id);
        if removed.is_some() {
            info!("Session removed");
        }
        removed
    }

    /// Ids of all running games, sorted.
    #[instrument(skip(self))]
    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<_> = self.lock().keys().cloned().collect();
        ids.sort();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use sugoroku_engine::{Board, Cell, CellKind, Player};

    fn session(id: &str) -> GameSession {
        let cells = (0..6)
            .map(|i| {
                let kind = match i {
                    0 => CellKind::Start,
                    5 => CellKind::Goal,
                    _ => CellKind::Normal,
                };
                Cell::new(i, kind)
            })
            .collect();
        let board = Board::from_cells(cells).expect("board");
        let state = GameState::new(id, vec![Player::seated(0, "Ann"), Player::seated(1, "Bob")], board)
            .expect("state");
        GameSession::new(state, StdRng::seed_from_u64(1), Dice::default(), false)
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let manager = SessionManager::new();
        assert!(manager.insert(session("g1")));
        assert!(!manager.insert(session("g1")));
        assert!(manager.insert(session("g2")));
        assert_eq!(manager.ids(), vec!["g1".to_string(), "g2".to_string()]);
    }

    #[test]
    fn test_play_updates_shared_state() {
        let manager = SessionManager::new();
        manager.insert(session("g1"));
        let die = manager
            .with_session("g1", |s| s.play(Some(3)))
            .expect("session")
            .expect("turn");
        assert_eq!(die, 3);
        let state = manager.state("g1").expect("state");
        assert_eq!(*state.players()[0].position(), 3);
        assert_eq!(state.current_player_index(), 1);
    }

    #[test]
    fn test_failed_turn_keeps_state() {
        let manager = SessionManager::new();
        manager.insert(session("g1"));
        let before = manager.state("g1").expect("state");
        let result = manager.with_session("g1", |s| s.play(Some(0))).expect("session");
        assert!(result.is_err());
        assert_eq!(manager.state("g1").expect("state"), before);
    }

    #[test]
    fn test_rolled_die_in_range() {
        let mut s = session("g1");
        let die = s.play(None).expect("turn");
        assert!((1..=6).contains(&die));
    }

    #[test]
    fn test_remove() {
        let manager = SessionManager::new();
        manager.insert(session("gone"));
        assert!(manager.remove("gone").is_some());
        assert!(manager.state("gone").is_none());
        assert!(manager.with_session("gone", |_| ()).is_none());
    }
}
