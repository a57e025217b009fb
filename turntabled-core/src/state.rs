//! The turntable state space.
//!
//! State is a composite of three axes. Only five of the eight axis
//! combinations are declared; [`StateId`] enumerates them, and the axis
//! values of each are derived by exhaustive match, so an undeclared
//! combination (OFF while PLAYING, say) cannot be represented.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Power axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    Off,
    On,
}

/// Vinyl loading axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VinylState {
    Empty,
    Loaded,
}

/// Playback axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Identifier of a declared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    /// OFF / EMPTY / STOPPED — the initial state.
    S1,
    /// OFF / LOADED / STOPPED.
    S2,
    /// ON / EMPTY / STOPPED.
    S3,
    /// ON / LOADED / STOPPED.
    S4,
    /// ON / LOADED / PLAYING.
    S5,
}

/// The axis values of a declared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateAxes {
    pub power: PowerState,
    pub vinyl: VinylState,
    pub playback: PlaybackState,
}

impl StateId {
    /// All declared states, in identifier order.
    pub const ALL: [StateId; 5] = [
        StateId::S1,
        StateId::S2,
        StateId::S3,
        StateId::S4,
        StateId::S5,
    ];

    /// The state every turntable starts in.
    pub const INITIAL: StateId = StateId::S1;

    /// Returns the axis values declared for this state.
    pub fn axes(self) -> StateAxes {
        match self {
            StateId::S1 => StateAxes {
                power: PowerState::Off,
                vinyl: VinylState::Empty,
                playback: PlaybackState::Stopped,
            },
            StateId::S2 => StateAxes {
                power: PowerState::Off,
                vinyl: VinylState::Loaded,
                playback: PlaybackState::Stopped,
            },
            StateId::S3 => StateAxes {
                power: PowerState::On,
                vinyl: VinylState::Empty,
                playback: PlaybackState::Stopped,
            },
            StateId::S4 => StateAxes {
                power: PowerState::On,
                vinyl: VinylState::Loaded,
                playback: PlaybackState::Stopped,
            },
            StateId::S5 => StateAxes {
                power: PowerState::On,
                vinyl: VinylState::Loaded,
                playback: PlaybackState::Playing,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StateId::S1 => "S1",
            StateId::S2 => "S2",
            StateId::S3 => "S3",
            StateId::S4 => "S4",
            StateId::S5 => "S5",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vinyl record mounted on the turntable.
///
/// Carried alongside the state but not part of state identity: two
/// turntables in S4 with different vinyls are in the same state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vinyl {
    pub id: String,
    pub title: String,
    pub composer: String,
    pub midi_url: String,
}
