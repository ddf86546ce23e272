//! Error types for the sugoroku engine.
//!
//! Every engine operation either succeeds or rejects its input without
//! touching state. Errors are grouped by where they surface:
//!
//! - [`BoardError`] - malformed board request or custom board
//! - [`TurnError`] - turn requested against a finished game or with a bad die
//! - [`SetupError`] - game creation rejected
//! - [`SettingsError`] - settings outside their allowed ranges
//! - [`DiceError`] - impossible dice range

use crate::board::{MAX_BOARD_LENGTH, MIN_BOARD_LENGTH};
use crate::settings::MAX_PLAYER_SEATS;
use crate::cell::CellType;
use derive_more::{Display, Error, From};

/// A board could not be generated or accepted.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum BoardError {
    /// Board has fewer cells than start + interior + goal require.
    #[display("Board length {} is below the minimum of {}", length, MIN_BOARD_LENGTH)]
    TooShort {
        /// Requested or supplied length.
        length: usize,
    },

    /// Board has more cells than the engine will hold.
    #[display("Board length {} exceeds the maximum of {}", length, MAX_BOARD_LENGTH)]
    TooLong {
        /// Requested or supplied length.
        length: usize,
    },

    /// Special cell density is NaN or outside `[0, 1]`.
    #[display("Special cell density {} is outside [0, 1]", density)]
    DensityOutOfRange {
        /// Offending density.
        density: f64,
    },

    /// A cell's id does not match its index.
    #[display("Cell at index {} has id {}", index, id)]
    NonContiguousId {
        /// Position in the sequence.
        index: usize,
        /// Id carried by the cell.
        id: usize,
    },

    /// Cell 0 is not a start cell.
    #[display("First cell must be a start cell, found {}", found)]
    MissingStart {
        /// Type found at index 0.
        found: CellType,
    },

    /// The last cell is not a goal cell.
    #[display("Last cell must be a goal cell, found {}", found)]
    MissingGoal {
        /// Type found at the last index.
        found: CellType,
    },

    /// A start or goal cell appears somewhere other than the ends.
    #[display("Cell {} is a {} cell away from the board ends", id, kind)]
    MisplacedEndpoint {
        /// Offending cell.
        id: usize,
        /// Either start or goal.
        kind: CellType,
    },

    /// A warp points outside the board.
    #[display("Warp at cell {} targets {} on a board of {} cells", id, target, length)]
    WarpOutOfRange {
        /// Warp cell id.
        id: usize,
        /// Target cell id.
        target: usize,
        /// Board length.
        length: usize,
    },

    /// A skip, advance or back cell has a magnitude of zero.
    #[display("Cell {} has a zero effect magnitude", id)]
    ZeroMagnitude {
        /// Offending cell.
        id: usize,
    },
}

/// A turn was requested that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TurnError {
    /// Die values start at 1.
    #[display("Die value {} is invalid (must be at least 1)", value)]
    InvalidDie {
        /// Supplied die value.
        value: u32,
    },

    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,

    /// A postcondition failed after resolving the turn.
    #[display("Invariant violation: {}", description)]
    InvariantViolation {
        /// Joined descriptions of the violated invariants.
        description: String,
    },
}

/// Settings fall outside their allowed ranges.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum SettingsError {
    /// Board size below the engine minimum.
    #[display("Board size {} is below the minimum of {}", size, MIN_BOARD_LENGTH)]
    BoardTooSmall {
        /// Configured board size.
        size: usize,
    },

    /// Board size above the engine maximum.
    #[display("Board size {} exceeds the maximum of {}", size, MAX_BOARD_LENGTH)]
    BoardTooLarge {
        /// Configured board size.
        size: usize,
    },

    /// At least one player seat is required.
    #[display("Max players must be at least 1")]
    NoPlayerSeats,

    /// More seats than a game can hold.
    #[display("Max players {} exceeds the limit of {}", seats, MAX_PLAYER_SEATS)]
    TooManySeats {
        /// Configured seat count.
        seats: usize,
    },

    /// Special cell frequency is NaN or outside `[0, 1]`.
    #[display("Special cell frequency {} is outside [0, 1]", frequency)]
    FrequencyOutOfRange {
        /// Configured frequency.
        frequency: f64,
    },

    /// The dice range is empty or starts below 1.
    #[display("{}", _0)]
    Dice(DiceError),
}

impl From<DiceError> for SettingsError {
    fn from(err: DiceError) -> Self {
        Self::Dice(err)
    }
}

/// A dice range that cannot be rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum DiceError {
    /// Minimum face below 1.
    #[display("Dice minimum {} is below 1", min)]
    MinBelowOne {
        /// Configured minimum.
        min: u32,
    },

    /// Minimum above maximum.
    #[display("Dice range {}..={} is empty", min, max)]
    EmptyRange {
        /// Configured minimum.
        min: u32,
        /// Configured maximum.
        max: u32,
    },
}

/// A game could not be created.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum SetupError {
    /// A game needs at least one player.
    #[display("A game needs at least one player")]
    NoPlayers,

    /// Number of players outside `1..=max`.
    #[display("{} players requested, allowed 1 to {}", count, max)]
    PlayerCount {
        /// Requested players.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Two players share an id.
    #[display("Duplicate player id {}", id)]
    DuplicatePlayerId {
        /// Repeated id.
        id: String,
    },

    /// The board was rejected.
    #[display("{}", _0)]
    Board(BoardError),

    /// The settings were rejected.
    #[display("{}", _0)]
    Settings(SettingsError),
}

impl From<BoardError> for SetupError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}

impl From<SettingsError> for SetupError {
    fn from(err: SettingsError) -> Self {
        Self::Settings(err)
    }
}

/// Any engine error.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum EngineError {
    /// Board rejected.
    #[display("{}", _0)]
    Board(BoardError),
    /// Turn rejected.
    #[display("{}", _0)]
    Turn(TurnError),
    /// Setup rejected.
    #[display("{}", _0)]
    Setup(SetupError),
    /// Settings rejected.
    #[display("{}", _0)]
    Settings(SettingsError),
    /// Dice range rejected.
    #[display("{}", _0)]
    Dice(DiceError),
}
