//! Board cells and their effects.

use crate::decoration::Decoration;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIter};

/// What a cell does when a die roll delivers a player onto it.
///
/// Magnitudes live inside the variants, so a skip always has a turn count
/// and a warp always has a target. Serialized flat with a `type` tag:
/// `{"type":"advance","value":3}`, `{"type":"warp","warpTo":12}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", rename_all = "lowercase")]
#[strum_discriminants(name(CellType))]
#[strum_discriminants(derive(Hash, EnumIter, strum::Display, Serialize, Deserialize))]
#[strum_discriminants(strum(serialize_all = "lowercase"))]
#[strum_discriminants(serde(rename_all = "lowercase"))]
pub enum CellKind {
    /// No effect.
    Normal,
    /// First cell. No effect.
    Start,
    /// Last cell. Reaching it wins.
    Goal,
    /// Forfeit the next `value` turns.
    Skip {
        /// Turns to skip.
        value: u32,
    },
    /// Move `value` cells forward, stopping at the goal.
    Advance {
        /// Cells to advance.
        value: usize,
    },
    /// Move `value` cells back, stopping at the start.
    Back {
        /// Cells to retreat.
        value: usize,
    },
    /// Relocate to a fixed cell.
    Warp {
        /// Target cell id.
        #[serde(rename = "warpTo")]
        warp_to: usize,
    },
}

impl CellKind {
    /// Returns the payload-free type of this kind.
    pub fn cell_type(&self) -> CellType {
        CellType::from(self)
    }

    /// True for cells whose landing has an effect.
    pub fn is_special(&self) -> bool {
        !matches!(self, Self::Normal | Self::Start | Self::Goal)
    }

    /// Player-facing message for this kind.
    pub fn flavor_message(&self) -> String {
        match self {
            Self::Normal => "Keep going!".to_string(),
            Self::Start => "Start! Good luck!".to_string(),
            Self::Goal => "Goal! Congratulations!".to_string(),
            Self::Skip { value: 1 } => "Skip 1 turn!".to_string(),
            Self::Skip { value } => format!("Skip {} turns!", value),
            Self::Advance { value } => format!("Advance {}!", value),
            Self::Back { value } => format!("Back {}...", value),
            Self::Warp { warp_to } => format!("Warp to cell {}!", warp_to),
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip { value } => write!(f, "skip({})", value),
            Self::Advance { value } => write!(f, "advance({})", value),
            Self::Back { value } => write!(f, "back({})", value),
            Self::Warp { warp_to } => write!(f, "warp(->{})", warp_to),
            other => write!(f, "{}", other.cell_type()),
        }
    }
}

/// One position on the board path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    id: usize,
    #[serde(flatten)]
    kind: CellKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    decoration: Option<Decoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Cell {
    /// Creates an undecorated cell without a message.
    pub fn new(id: usize, kind: CellKind) -> Self {
        Self {
            id,
            kind,
            decoration: None,
            message: None,
        }
    }

    /// Creates a cell carrying the standard message for its kind.
    pub fn with_flavor(id: usize, kind: CellKind) -> Self {
        Self::new(id, kind).with_message(kind.flavor_message())
    }

    /// Sets the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the decoration.
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = Some(decoration);
        self
    }

    /// Cell id (its index on the board).
    pub fn id(&self) -> usize {
        self.id
    }

    /// The cell's effect.
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Attached decoration, if any.
    pub fn decoration(&self) -> Option<&Decoration> {
        self.decoration.as_ref()
    }

    /// Player-facing message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn set_decoration(&mut self, decoration: Decoration) {
        self.decoration = Some(decoration);
    }
}
