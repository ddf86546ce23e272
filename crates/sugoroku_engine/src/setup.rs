//! Game creation.

use crate::board::{self, Board};
use crate::cell::Cell;
use crate::decoration::Decoration;
use crate::error::SetupError;
use crate::generator::generate_board;
use crate::player::Player;
use crate::random::RandomSource;
use crate::settings::GameSettings;
use crate::state::{GameId, GameState};
use chrono::Utc;
use tracing::{debug, info, instrument};

/// Builder for a new game.
///
/// Collects player names, catalog decorations and optionally a custom
/// board, then validates everything in [`GameSetup::build`]. Decorations are
/// fetched by the caller beforehand; an empty list simply means no
/// decoration.
#[derive(Debug, Clone)]
pub struct GameSetup {
    settings: GameSettings,
    names: Vec<String>,
    avatars: Vec<Decoration>,
    cell_decorations: Vec<Decoration>,
    custom_board: Option<Vec<Cell>>,
    id: Option<GameId>,
}

impl GameSetup {
    /// Starts a setup with the given settings (difficulty preset applied on build).
    #[instrument(skip(settings))]
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            names: Vec::new(),
            avatars: Vec::new(),
            cell_decorations: Vec::new(),
            custom_board: None,
            id: None,
        }
    }

    /// Adds a player; seating follows call order.
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Adds several players.
    pub fn players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Avatars handed to players in seating order while they last.
    pub fn avatars(mut self, avatars: Vec<Decoration>) -> Self {
        self.avatars = avatars;
        self
    }

    /// Decorations for every third cell.
    pub fn cell_decorations(mut self, decorations: Vec<Decoration>) -> Self {
        self.cell_decorations = decorations;
        self
    }

    /// Uses an editor-supplied board instead of generating one.
    pub fn custom_board(mut self, cells: Vec<Cell>) -> Self {
        self.custom_board = Some(cells);
        self
    }

    /// Fixes the game id (default: `game-{unix millis}`).
    pub fn id(mut self, id: impl Into<GameId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Settings after applying the difficulty preset.
    pub fn settings(&self) -> GameSettings {
        self.settings.resolved()
    }

    /// Checks settings, seat count and any custom board without generating
    /// anything, so callers can reject a request before fetching decorations.
    ///
    /// # Errors
    ///
    /// Same as [`GameSetup::build`], except for board generation.
    #[instrument(skip(self), fields(players = self.names.len(), custom = self.custom_board.is_some()))]
    pub fn check(&self) -> Result<(), SetupError> {
        let settings = self.settings.resolved();
        settings.validate()?;

        let count = self.names.len();
        if count == 0 || count > settings.max_players {
            return Err(SetupError::PlayerCount {
                count,
                max: settings.max_players,
            });
        }
        if let Some(cells) = &self.custom_board {
            board::validate(cells)?;
        }
        Ok(())
    }

    /// Validates the request and creates the game.
    ///
    /// # Errors
    ///
    /// - [`SetupError::Settings`] if the resolved settings are out of range
    /// - [`SetupError::PlayerCount`] for zero players or more than `max_players`
    /// - [`SetupError::Board`] if generation fails or the custom board is invalid
    #[instrument(skip(self, rng), fields(players = self.names.len(), custom = self.custom_board.is_some()))]
    pub fn build<R>(self, rng: &mut R) -> Result<GameState, SetupError>
    where
        R: RandomSource + ?Sized,
    {
        self.check()?;
        let settings = self.settings.resolved();

        let mut board = match self.custom_board {
            Some(cells) => Board::from_cells(cells)?,
            None => generate_board(settings.board_size, settings.special_cell_frequency, rng)?,
        };
        board.decorate(self.cell_decorations);

        let mut avatars = self.avatars.into_iter();
        let players = self
            .names
            .into_iter()
            .enumerate()
            .map(|(seat, name)| {
                let player = Player::seated(seat, name);
                match avatars.next() {
                    Some(avatar) => player.with_avatar(avatar),
                    None => player,
                }
            })
            .collect::<Vec<_>>();
        debug!(
            with_avatar = players.iter().filter(|p| p.avatar().is_some()).count(),
            "Players seated"
        );

        let id = self
            .id
            .unwrap_or_else(|| format!("game-{}", Utc::now().timestamp_millis()));
        let game = GameState::new(id, players, board)?;
        info!(game_id = %game.id(), board = game.board().len(), "Game set up");
        Ok(game)
    }
}
