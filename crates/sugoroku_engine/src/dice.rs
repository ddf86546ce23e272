//! Dice.

use crate::error::DiceError;
use crate::random::RandomSource;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

/// A die with faces `min..=max`.
///
/// Deserialization goes through [`Dice::new`], so a stored die is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dice {
    min: u32,
    max: u32,
}

impl Dice {
    /// Creates a die.
    ///
    /// # Errors
    ///
    /// - [`DiceError::MinBelowOne`] if `min < 1`
    /// - [`DiceError::EmptyRange`] if `min > max`
    pub fn new(min: u32, max: u32) -> Result<Self, DiceError> {
        if min < 1 {
            return Err(DiceError::MinBelowOne { min });
        }
        if min > max {
            return Err(DiceError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest face.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest face.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Rolls the die.
    #[instrument(skip(rng))]
    pub fn roll<R>(&self, rng: &mut R) -> u32
    where
        R: RandomSource + ?Sized,
    {
        let value = rng.next_in_range(self.min as usize, self.max as usize) as u32;
        debug!(value, "Die rolled");
        value
    }
}

impl<'de> Deserialize<'de> for Dice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Faces {
            min: u32,
            max: u32,
        }

        let faces = Faces::deserialize(deserializer)?;
        Self::new(faces.min, faces.max).map_err(serde::de::Error::custom)
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self { min: 1, max: 6 }
    }
}
