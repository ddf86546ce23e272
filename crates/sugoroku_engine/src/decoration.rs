//! Decorative entities fetched from an external catalog.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Flavour data attached to a cell or a player (an avatar).
///
/// Opaque to game logic: nothing in turn resolution looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    /// Catalog id.
    id: u32,
    /// Display name.
    name: String,
    /// Image location (URL or asset key).
    image_ref: String,
}

impl Decoration {
    /// Creates a decoration.
    pub fn new(id: u32, name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }
}
