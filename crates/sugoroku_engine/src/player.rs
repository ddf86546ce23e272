//! Players and their tokens.

use crate::decoration::Decoration;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Unique identifier for a player within one game.
pub type PlayerId = String;

/// Colour tags handed out in seating order.
pub const PLAYER_COLORS: [&str; 4] = ["red", "blue", "green", "yellow"];

/// Colour tag for seats beyond [`PLAYER_COLORS`].
pub const FALLBACK_COLOR: &str = "gray";

/// A player and their token on the board.
///
/// Created at position 0 with no pending skips; only turn resolution moves
/// the token or changes the skip counter.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique id within the game.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Current cell id.
    pub(crate) position: usize,
    /// Future turns this player forfeits.
    pub(crate) skip_turns: u32,
    /// UI colour tag.
    color_tag: String,
    /// Catalog avatar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<Decoration>,
}

impl Player {
    /// Creates a player on the start cell.
    #[instrument(skip_all, fields(id = %id.as_ref()))]
    pub fn new(id: impl AsRef<str>, name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            id: id.as_ref().to_string(),
            name: name.into(),
            position: 0,
            skip_turns: 0,
            color_tag: color_tag.into(),
            avatar: None,
        }
    }

    /// Creates the player for seat `seat` (0-based) with the seat's id and colour.
    pub fn seated(seat: usize, name: impl Into<String>) -> Self {
        Self::new(seat_id(seat), name, seat_color(seat))
    }

    /// Attaches an avatar.
    pub fn with_avatar(mut self, avatar: Decoration) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// True while the player still owes skipped turns.
    pub fn is_skipping(&self) -> bool {
        self.skip_turns > 0
    }

    /// Returns the token to the start with no pending skips.
    pub(crate) fn reset(&mut self) {
        self.position = 0;
        self.skip_turns = 0;
    }
}

/// Player id for a seat: `player-0`, `player-1`, ...
pub fn seat_id(seat: usize) -> PlayerId {
    format!("player-{}", seat)
}

/// Colour tag for a seat.
pub fn seat_color(seat: usize) -> &'static str {
    PLAYER_COLORS.get(seat).copied().unwrap_or(FALLBACK_COLOR)
}
