//! Game settings and difficulty presets.

use crate::board::{MAX_BOARD_LENGTH, MIN_BOARD_LENGTH};
use crate::dice::Dice;
use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, instrument};

/// Most seats a game can offer.
pub const MAX_PLAYER_SEATS: usize = 8;

/// Difficulty level. Every level except [`Difficulty::Custom`] overrides
/// board size, dice range and special-cell frequency with a preset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Short course, d4, few special cells.
    Easy,
    /// Standard course, d6.
    #[default]
    Normal,
    /// Long course, d8, many special cells.
    Hard,
    /// Keep the explicit values.
    Custom,
}

/// Values a difficulty preset pins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Board length.
    pub board_size: usize,
    /// Smallest die face.
    pub dice_min: u32,
    /// Largest die face.
    pub dice_max: u32,
    /// Special cell density.
    pub special_cell_frequency: f64,
}

impl Difficulty {
    /// The preset for this level; `None` for [`Difficulty::Custom`].
    pub fn preset(self) -> Option<Preset> {
        match self {
            Self::Easy => Some(Preset {
                board_size: 20,
                dice_min: 1,
                dice_max: 4,
                special_cell_frequency: 0.15,
            }),
            Self::Normal => Some(Preset {
                board_size: 30,
                dice_min: 1,
                dice_max: 6,
                special_cell_frequency: 0.25,
            }),
            Self::Hard => Some(Preset {
                board_size: 40,
                dice_min: 1,
                dice_max: 8,
                special_cell_frequency: 0.35,
            }),
            Self::Custom => None,
        }
    }
}

/// Settings for creating a game.
///
/// Passed explicitly into game creation; persistence is the caller's
/// business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Board length including start and goal.
    pub board_size: usize,
    /// Seats available.
    pub max_players: usize,
    /// Smallest die face.
    pub dice_min: u32,
    /// Largest die face.
    pub dice_max: u32,
    /// Fetch catalog avatars and cell decorations.
    pub use_avatars: bool,
    /// Emit sound cues.
    pub play_sound: bool,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Special cell density in `[0, 1]`.
    pub special_cell_frequency: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: 30,
            max_players: 4,
            dice_min: 1,
            dice_max: 6,
            use_avatars: true,
            play_sound: true,
            difficulty: Difficulty::Normal,
            special_cell_frequency: 0.25,
        }
    }
}

impl GameSettings {
    /// Default settings at the given difficulty.
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
        .resolved()
    }

    /// Returns these settings with the difficulty preset applied.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn resolved(&self) -> Self {
        let mut settings = self.clone();
        if let Some(preset) = self.difficulty.preset() {
            debug!(?preset, "Applying difficulty preset");
            settings.board_size = preset.board_size;
            settings.dice_min = preset.dice_min;
            settings.dice_max = preset.dice_max;
            settings.special_cell_frequency = preset.special_cell_frequency;
        }
        settings
    }

    /// Dice described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Dice`] for an empty range or a minimum below 1.
    pub fn dice(&self) -> Result<Dice, SettingsError> {
        Ok(Dice::new(self.dice_min, self.dice_max)?)
    }

    /// Checks every field range.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.board_size < MIN_BOARD_LENGTH {
            return Err(SettingsError::BoardTooSmall {
                size: self.board_size,
            });
        }
        if self.board_size > MAX_BOARD_LENGTH {
            return Err(SettingsError::BoardTooLarge {
                size: self.board_size,
            });
        }
        if self.max_players < 1 {
            return Err(SettingsError::NoPlayerSeats);
        }
        if self.max_players > MAX_PLAYER_SEATS {
            return Err(SettingsError::TooManySeats {
                seats: self.max_players,
            });
        }
        if !(0.0..=1.0).contains(&self.special_cell_frequency) {
            return Err(SettingsError::FrequencyOutOfRange {
                frequency: self.special_cell_frequency,
            });
        }
        self.dice()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiceError;
    use std::str::FromStr;

    #[test]
    fn test_defaults_match_normal_preset() {
        let settings = GameSettings::default();
        assert_eq!(settings.resolved(), settings);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_presets_override_unless_custom() {
        let hard = GameSettings::with_difficulty(Difficulty::Hard);
        assert_eq!(hard.board_size, 40);
        assert_eq!(hard.dice_max, 8);

        let custom = GameSettings {
            difficulty: Difficulty::Custom,
            board_size: 12,
            dice_max: 3,
            ..GameSettings::default()
        };
        assert_eq!(custom.resolved().board_size, 12);
        assert_eq!(custom.resolved().dice_max, 3);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let settings = GameSettings {
            board_size: 3,
            ..GameSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::BoardTooSmall { size: 3 })
        );

        let settings = GameSettings {
            special_cell_frequency: 1.2,
            ..GameSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::FrequencyOutOfRange { .. })
        ));

        let settings = GameSettings {
            dice_min: 5,
            dice_max: 2,
            ..GameSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Dice(DiceError::EmptyRange { min: 5, max: 2 }))
        );
    }

    #[test]
    fn test_validate_caps_board_and_seats() {
        let at_limit = GameSettings {
            difficulty: Difficulty::Custom,
            board_size: MAX_BOARD_LENGTH,
            max_players: MAX_PLAYER_SEATS,
            ..GameSettings::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = GameSettings {
            board_size: usize::MAX,
            ..at_limit.clone()
        };
        assert_eq!(
            huge.validate(),
            Err(SettingsError::BoardTooLarge { size: usize::MAX })
        );

        let crowded = GameSettings {
            max_players: MAX_PLAYER_SEATS + 1,
            ..at_limit
        };
        assert_eq!(
            crowded.validate(),
            Err(SettingsError::TooManySeats {
                seats: MAX_PLAYER_SEATS + 1
            })
        );
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: GameSettings =
            serde_json::from_str(r#"{"difficulty": "easy", "playSound": false}"#).expect("parse");
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert!(!settings.play_sound);
        assert_eq!(settings.max_players, 4);
        assert_eq!(settings.resolved().board_size, 20);
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("HARD"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::Custom.to_string(), "custom");
    }
}
