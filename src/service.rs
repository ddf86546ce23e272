//! Game service: creation, turns and settings behind one facade.

use crate::broadcast::{MoveBroadcaster, MoveNotice, NoopBroadcaster};
use crate::catalog::{CatalogProvider, NoCatalog};
use crate::session::{GameSession, SessionManager};
use crate::sound::{SilentSink, SoundCue, SoundSink};
use crate::store::{SettingsRepository, StoreError};
use chrono::Utc;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use sugoroku_engine::{
    Board, Cell, Decoration, Difficulty, EngineError, GameId, GameSettings, GameSetup, GameState, SettingsError,
    SetupError, TurnError,
};
use tracing::{debug, info, instrument, warn};

/// Request to start a game.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    /// Player names in seating order.
    pub players: Vec<String>,
    /// Difficulty for this game only; saved settings otherwise.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Seed for board generation and dice, for reproducible games.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Editor-supplied board replacing the generated one.
    #[serde(default)]
    pub board: Option<Vec<Cell>>,
}

impl NewGame {
    /// Request for the given players with everything else defaulted.
    pub fn with_players<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Orchestrates games for the CLI and HTTP front ends.
pub struct GameService {
    catalog: Arc<dyn CatalogProvider>,
    sound: Arc<dyn SoundSink>,
    broadcaster: Arc<dyn MoveBroadcaster>,
    sessions: SessionManager,
    settings: SettingsRepository,
    next_seq: AtomicU64,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("sessions", &self.sessions)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GameService {
    /// Creates a service with silent sound and no broadcasting.
    #[instrument(skip_all)]
    pub fn new(catalog: Arc<dyn CatalogProvider>, settings: SettingsRepository) -> Self {
        info!("Creating game service");
        Self {
            catalog,
            sound: Arc::new(SilentSink),
            broadcaster: Arc::new(NoopBroadcaster),
            sessions: SessionManager::new(),
            settings,
            next_seq: AtomicU64::new(1),
        }
    }

    /// Offline service over in-memory settings.
    pub fn offline() -> Self {
        Self::new(Arc::new(NoCatalog), SettingsRepository::in_memory())
    }

    /// Replaces the sound sink.
    pub fn with_sound(mut self, sound: Arc<dyn SoundSink>) -> Self {
        self.sound = sound;
        self
    }

    /// Replaces the move broadcaster.
    pub fn with_broadcaster(mut self, broadcaster: Arc<dyn MoveBroadcaster>) -> Self {
        self.broadcaster = broadcaster;
        self
    }

    fn next_id(&self) -> GameId {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        format!("game-{}-{}", Utc::now().timestamp_millis(), seq)
    }

    /// Fetches avatars and cell decorations in one catalog call.
    ///
    /// A failing catalog yields no decorations.
    async fn decorations(&self, players: usize, board_len: usize) -> (Vec<Decoration>, Vec<Decoration>) {
        let slots = Board::decoration_slots(board_len);
        let mut fetched = match self.catalog.fetch(players + slots).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(error = %e, "Catalog unavailable, playing undecorated");
                Vec::new()
            }
        };
        let cells = fetched.split_off(players.min(fetched.len()));
        (fetched, cells)
    }

    /// Creates and registers a game.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Store`] if saved settings cannot be read
    /// - [`ServiceError::Engine`] if settings, players or a custom board are rejected
    #[instrument(skip(self, request), fields(players = request.players.len(), seed = ?request.seed))]
    pub async fn create_game(&self, request: NewGame) -> Result<GameState, ServiceError> {
        let mut settings = self.settings.load()?;
        if let Some(difficulty) = request.difficulty {
            settings.difficulty = difficulty;
        }
        let resolved = settings.resolved();
        let player_count = request.players.len();
        let board_len = request.board.as_ref().map_or(resolved.board_size, Vec::len);

        let mut setup = GameSetup::new(settings).players(request.players).id(self.next_id());
        if let Some(cells) = request.board {
            setup = setup.custom_board(cells);
        }
        setup.check()?;
        let dice = resolved.dice()?;

        let (avatars, cell_decorations) = if resolved.use_avatars {
            self.decorations(player_count, board_len).await
        } else {
            debug!("Avatars disabled");
            (Vec::new(), Vec::new())
        };

        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = setup
            .avatars(avatars)
            .cell_decorations(cell_decorations)
            .build(&mut rng)?;

        let session = GameSession::new(state.clone(), rng, dice, resolved.play_sound);
        if !self.sessions.insert(session) {
            return Err(ServiceError::DuplicateGame { id: state.id().clone() });
        }
        info!(game_id = %state.id(), board = state.board().len(), "Game started");
        Ok(state)
    }

    /// Plays the current player's turn.
    ///
    /// Rolls the game's dice unless `die` is given.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::GameNotFound`] for an unknown id
    /// - [`ServiceError::Engine`] if the turn is rejected (game over, bad die)
    #[instrument(skip(self))]
    pub fn roll(&self, id: &str, die: Option<u32>) -> Result<GameState, ServiceError> {
        let (state, die, play_sound) = self
            .sessions
            .with_session(id, |session| {
                session
                    .play(die)
                    .map(|die| (session.state.clone(), die, session.play_sound))
            })
            .ok_or_else(|| ServiceError::GameNotFound { id: id.to_string() })??;

        if play_sound {
            self.sound.play(SoundCue::DiceRoll);
            if let Some(cue) = state.last_turn().and_then(SoundCue::for_turn) {
                self.sound.play(cue);
            }
        }
        if let Some(notice) = MoveNotice::from_state(&state, die) {
            self.broadcaster.broadcast(&notice);
        }
        if let Some(winner) = state.winner() {
            info!(game_id = %id, winner = %winner.id(), "Game won");
        }
        Ok(state)
    }

    /// Current state of a game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown id.
    pub fn get_game(&self, id: &str) -> Result<GameState, ServiceError> {
        self.sessions
            .state(id)
            .ok_or_else(|| ServiceError::GameNotFound { id: id.to_string() })
    }

    /// Ids of running games.
    pub fn list_games(&self) -> Vec<GameId> {
        self.sessions.ids()
    }

    /// Drops a game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown id.
    pub fn end_game(&self, id: &str) -> Result<(), ServiceError> {
        self.sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::GameNotFound { id: id.to_string() })
    }

    /// Saved settings.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the store fails.
    pub fn settings(&self) -> Result<GameSettings, ServiceError> {
        Ok(self.settings.load()?)
    }

    /// Validates and saves settings. Games already running keep theirs.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Engine`] if the settings are out of range
    /// - [`ServiceError::Store`] if the store fails
    #[instrument(skip(self, settings), fields(difficulty = %settings.difficulty))]
    pub fn update_settings(&self, settings: GameSettings) -> Result<GameSettings, ServiceError> {
        settings.resolved().validate()?;
        self.settings.save(&settings)?;
        Ok(settings)
    }
}

/// Service error.
#[derive(Debug, Clone, Display, Error)]
pub enum ServiceError {
    /// No running game has this id.
    #[display("Game not found: {}", id)]
    GameNotFound {
        /// Requested id.
        id: GameId,
    },
    /// A game with this id is already running.
    #[display("Game already exists: {}", id)]
    DuplicateGame {
        /// Conflicting id.
        id: GameId,
    },
    /// Rejected by the engine.
    #[display("{}", _0)]
    Engine(EngineError),
    /// Settings store failed.
    #[display("{}", _0)]
    Store(StoreError),
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<TurnError> for ServiceError {
    fn from(err: TurnError) -> Self {
        Self::Engine(err.into())
    }
}

impl From<SetupError> for ServiceError {
    fn from(err: SetupError) -> Self {
        Self::Engine(err.into())
    }
}

impl From<SettingsError> for ServiceError {
    fn from(err: SettingsError) -> Self {
        Self::Engine(err.into())
    }
}
