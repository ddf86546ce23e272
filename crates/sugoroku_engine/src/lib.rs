//! Sugoroku engine - pure game progression logic.
//!
//! Players move tokens along a linear path of cells. Some cells carry an
//! effect (skip, advance, back, warp) that applies once when a die roll
//! lands on them. The first player to reach the goal wins.
//!
//! # Architecture
//!
//! - **Board**: validated path of [`Cell`]s, from [`generate_board`] or a
//!   custom editor via [`Board::from_cells`]
//! - **Effects**: [`apply_effect`] maps (position, cell, player) to a new position
//! - **Turns**: [`GameState::resolve_turn`] advances the game by one die roll
//! - **Contracts**: preconditions always, [`SugorokuInvariants`] as
//!   postconditions in debug builds
//! - **Randomness**: injected through [`RandomSource`]
//!
//! The crate performs no I/O. Catalog lookups, persistence and transport
//! belong to the caller.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use sugoroku_engine::{Dice, GameSettings, GameSetup};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let game = GameSetup::new(GameSettings::default())
//!     .players(["Ann", "Bob"])
//!     .build(&mut rng)
//!     .expect("valid setup");
//! let die = Dice::default().roll(&mut rng);
//! let next = game.resolve_turn(die).expect("valid turn");
//! assert_eq!(next.current_player_index(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod cell;
mod contracts;
mod decoration;
mod dice;
mod effect;
mod error;
mod generator;
mod invariants;
mod player;
mod random;
mod settings;
mod setup;
mod state;
mod turn;

#[cfg(test)]
mod testing;

pub use board::{Board, DECORATION_STRIDE, MAX_BOARD_LENGTH, MIN_BOARD_LENGTH};
pub use cell::{Cell, CellKind, CellType};
pub use contracts::{Contract, GameInProgress, TurnContract, ValidDie};
pub use decoration::Decoration;
pub use dice::Dice;
pub use effect::apply_effect;
pub use error::{BoardError, DiceError, EngineError, SettingsError, SetupError, TurnError};
pub use generator::{ADVANCE_STEPS, BACK_STEPS, SKIP_TURNS, WARP_MARGIN, generate_board};
pub use invariants::{
    GoalConsistencyInvariant, Invariant, InvariantSet, InvariantViolation, PositionsOnBoardInvariant,
    SugorokuInvariants, TurnIndexInvariant,
};
pub use player::{FALLBACK_COLOR, PLAYER_COLORS, Player, PlayerId, seat_color, seat_id};
pub use random::{Draw, RandomSource, ScriptedRandom};
pub use settings::{Difficulty, GameSettings, MAX_PLAYER_SEATS, Preset};
pub use setup::GameSetup;
pub use state::{GameId, GameState, LastMove, TurnEvent};
