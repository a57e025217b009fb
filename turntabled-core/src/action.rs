//! The closed set of turntable actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action a client can request on the turntable.
///
/// `PutVinyl` and `ChangeVinyl` share an endpoint; which one runs is
/// decided by the vinyl axis at execution time, not by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    PowerOn,
    PowerOff,
    PutVinyl,
    ChangeVinyl,
    RemoveVinyl,
    Play,
    Stop,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 7] = [
        Action::PowerOn,
        Action::PowerOff,
        Action::PutVinyl,
        Action::ChangeVinyl,
        Action::RemoveVinyl,
        Action::Play,
        Action::Stop,
    ];

    /// The wire name of this action, used as the link key.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::PowerOn => "power-on",
            Action::PowerOff => "power-off",
            Action::PutVinyl => "put-vinyl",
            Action::ChangeVinyl => "change-vinyl",
            Action::RemoveVinyl => "remove-vinyl",
            Action::Play => "play",
            Action::Stop => "stop",
        }
    }

    /// The message returned when this action is rejected in the current
    /// state. Static per action; the message enumerates the conditions
    /// under which the action is illegal.
    pub fn rejection_message(self) -> &'static str {
        match self {
            Action::PowerOn => "Cannot power on: turntable is already ON",
            Action::PowerOff => "Cannot power off: turntable is OFF or music is playing",
            Action::PutVinyl => {
                "Cannot put vinyl: turntable is OFF, music is playing, or a vinyl is already loaded"
            }
            Action::ChangeVinyl => {
                "Cannot change vinyl: turntable is OFF, music is playing, or no vinyl is loaded"
            }
            Action::RemoveVinyl => {
                "Cannot remove vinyl: turntable is OFF, music is playing, or no vinyl is loaded"
            }
            Action::Play => "Cannot play: turntable is OFF, no vinyl is loaded, or already playing",
            Action::Stop => "Cannot stop: music is not playing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
