//! Resource projection.
//!
//! Turns the current state into the client-facing snapshot: axis values,
//! the mounted vinyl, and a `_links` map advertising exactly the actions
//! that are legal right now. Legality is read from the transition table,
//! never re-derived.

use crate::action::Action;
use crate::state::{PlaybackState, PowerState, StateId, Vinyl, VinylState};
use crate::table::TransitionTable;
use indexmap::IndexMap;
use serde::Serialize;

/// How to invoke an action over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub href: &'static str,
    pub method: &'static str,
}

/// Canonical read endpoint of the turntable resource.
pub const SELF_LINK: ActionLink = ActionLink {
    href: "/turntable",
    method: "GET",
};

/// The endpoint bound to each action.
pub fn action_link(action: Action) -> ActionLink {
    match action {
        Action::PowerOn => ActionLink { href: "/turntable/power/on", method: "POST" },
        Action::PowerOff => ActionLink { href: "/turntable/power/off", method: "POST" },
        Action::PutVinyl => ActionLink { href: "/turntable/vinyl", method: "PUT" },
        Action::ChangeVinyl => ActionLink { href: "/turntable/vinyl", method: "PUT" },
        Action::RemoveVinyl => ActionLink { href: "/turntable/vinyl", method: "DELETE" },
        Action::Play => ActionLink { href: "/turntable/play", method: "POST" },
        Action::Stop => ActionLink { href: "/turntable/stop", method: "POST" },
    }
}

/// Hypermedia links, serialized as a JSON object in insertion order:
/// `self` first, then legal actions in table declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Links(IndexMap<&'static str, ActionLink>);

impl Links {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ActionLink> {
        self.0.get(name)
    }

    /// Link names in serialization order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Client-facing snapshot of the turntable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurntableResource {
    pub power_state: PowerState,
    pub vinyl_state: VinylState,
    pub playback_state: PlaybackState,
    pub current_vinyl: Option<Vinyl>,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Projects a state (and its mounted vinyl) into a resource snapshot.
pub fn project(table: &TransitionTable, state: StateId, vinyl: Option<Vinyl>) -> TurntableResource {
    let axes = state.axes();

    let mut links = IndexMap::new();
    links.insert("self", SELF_LINK);
    for t in table.transitions_from(state) {
        links.insert(t.action.as_str(), action_link(t.action));
    }

    TurntableResource {
        power_state: axes.power,
        vinyl_state: axes.vinyl,
        playback_state: axes.playback,
        current_vinyl: vinyl,
        links: Links(links),
    }
}
