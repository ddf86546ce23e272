//! Sugoroku - game service around [`sugoroku_engine`]
//!
//! The engine decides what a die roll does. This crate supplies everything
//! around it: settings persistence, the creature catalog for avatars and
//! cell decorations, sound and move-broadcast hooks, a registry of running
//! games, an HTTP API and the terminal front end.
//!
//! # Architecture
//!
//! - **Service**: [`GameService`] creates games and plays turns
//! - **Sessions**: [`SessionManager`] owns every running game
//! - **Catalog**: [`CatalogProvider`] (PokeAPI, fixed list, or none)
//! - **Store**: [`SettingsRepository`] over a [`KeyValueStore`]
//! - **Hooks**: [`SoundSink`] and [`MoveBroadcaster`]
//! - **Server**: axum [`router`]
//!
//! # Example
//!
//! ```
//! use sugoroku::{GameService, NewGame};
//!
//! # async fn example() -> Result<(), sugoroku::ServiceError> {
//! let service = GameService::offline();
//! let game = service.create_game(NewGame::with_players(["Ann", "Bob"])).await?;
//! let after = service.roll(game.id(), Some(3))?;
//! assert_eq!(after.current_player_index(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod broadcast;
mod catalog;
mod cli;
mod config;
mod render;
mod server;
mod service;
mod session;
mod sound;
mod store;

// Crate-level exports - Configuration
pub use cli::{Cli, Command, SettingsAction};
pub use config::{AppConfig, CatalogConfig, ConfigError};

// Crate-level exports - Collaborators
pub use broadcast::{LogBroadcaster, MoveBroadcaster, MoveNotice, NoopBroadcaster};
pub use catalog::{CatalogError, CatalogProvider, FixedCatalog, NoCatalog, PokeApiCatalog};
pub use sound::{LogSink, SilentSink, SoundCue, SoundSink};
pub use store::{KeyValueStore, MemoryStore, SETTINGS_KEY, SettingsRepository, StoreError, TomlFileStore};

// Crate-level exports - Games
pub use render::{cell_symbol, describe_turn, legend, render_board};
pub use server::{ApiError, AppState, ErrorBody, RollRequest, router, serve};
pub use service::{GameService, NewGame, ServiceError};
pub use session::{GameSession, SessionManager};

// Crate-level exports - Engine
pub use sugoroku_engine;
