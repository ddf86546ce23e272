//! Sound cue collaborator.
//!
//! The service names the cue; what plays it is somebody else's problem.

use strum::{Display, EnumIter};
use sugoroku_engine::{CellKind, TurnEvent};
use tracing::{info, instrument};

/// A named sound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    /// Die thrown.
    DiceRoll,
    /// Token moved forward by an advance cell.
    Advance,
    /// Token moved back by a back cell.
    Back,
    /// Player lost turns.
    Skip,
    /// Token relocated by a warp.
    Warp,
    /// A player won.
    Victory,
}

impl SoundCue {
    /// Cue for a resolved turn, if it deserves one beyond the die roll.
    pub fn for_turn(event: &TurnEvent) -> Option<Self> {
        match event {
            TurnEvent::Skipped { .. } => None,
            TurnEvent::Moved { reached_goal: true, .. } => Some(Self::Victory),
            TurnEvent::Moved { cell, .. } => match cell {
                CellKind::Skip { .. } => Some(Self::Skip),
                CellKind::Advance { .. } => Some(Self::Advance),
                CellKind::Back { .. } => Some(Self::Back),
                CellKind::Warp { .. } => Some(Self::Warp),
                CellKind::Normal | CellKind::Start | CellKind::Goal => None,
            },
        }
    }
}

/// Plays sound cues.
pub trait SoundSink: Send + Sync {
    /// Plays `cue`. Must not block or fail.
    fn play(&self, cue: SoundCue);
}

/// Sink that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&self, _cue: SoundCue) {}
}

/// Sink that logs every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    #[instrument(skip(self))]
    fn play(&self, cue: SoundCue) {
        info!(%cue, "Sound cue");
    }
}
