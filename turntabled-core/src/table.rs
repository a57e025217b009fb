//! The transition table.
//!
//! The single source of truth for legality: the engine looks actions up
//! here and the projector filters links through the same entries, so what
//! is offered and what is accepted can never drift apart.

use crate::action::Action;
use crate::error::CoreError;
use crate::state::StateId;
use std::collections::HashSet;

/// A declared transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Source state.
    pub from: StateId,
    /// Action that triggers this transition.
    pub action: Action,
    /// Target state.
    pub to: StateId,
}

/// Immutable table of all legal transitions.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    entries: Vec<Transition>,
}

impl TransitionTable {
    /// The standard turntable machine.
    ///
    /// Power toggles preserve the vinyl axis; vinyl operations require the
    /// deck to be ON and STOPPED; playback requires a vinyl to be LOADED.
    pub fn standard() -> Self {
        use Action::*;
        use StateId::*;

        Self::from_entries(vec![
            Transition { from: S1, action: PowerOn, to: S3 },
            Transition { from: S2, action: PowerOn, to: S4 },
            Transition { from: S3, action: PowerOff, to: S1 },
            Transition { from: S4, action: PowerOff, to: S2 },
            Transition { from: S3, action: PutVinyl, to: S4 },
            Transition { from: S4, action: ChangeVinyl, to: S4 },
            Transition { from: S4, action: RemoveVinyl, to: S3 },
            Transition { from: S4, action: Play, to: S5 },
            Transition { from: S5, action: Stop, to: S4 },
        ])
    }

    fn from_entries(entries: Vec<Transition>) -> Self {
        Self { entries }
    }

    /// Validates structural invariants of the table: at most one entry per
    /// `(from, action)` pair, and every declared state reachable from the
    /// initial state.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for t in &self.entries {
            if !seen.insert((t.from, t.action)) {
                return Err(CoreError::InvalidTable {
                    reason: format!(
                        "duplicate transition from {} on action '{}'",
                        t.from, t.action
                    ),
                });
            }
        }

        // Breadth-first walk from the initial state.
        let mut reachable = HashSet::from([StateId::INITIAL]);
        let mut frontier = vec![StateId::INITIAL];
        while let Some(state) = frontier.pop() {
            for t in self.transitions_from(state) {
                if reachable.insert(t.to) {
                    frontier.push(t.to);
                }
            }
        }
        for state in StateId::ALL {
            if !reachable.contains(&state) {
                return Err(CoreError::InvalidTable {
                    reason: format!("state {} is unreachable from {}", state, StateId::INITIAL),
                });
            }
        }

        Ok(())
    }

    /// Looks up the target state for `(from, action)`, if the transition
    /// is declared.
    pub fn lookup(&self, from: StateId, action: Action) -> Option<StateId> {
        self.entries
            .iter()
            .find(|t| t.from == from && t.action == action)
            .map(|t| t.to)
    }

    /// All transitions out of `from`, in declaration order.
    pub fn transitions_from(&self, from: StateId) -> impl Iterator<Item = &Transition> {
        self.entries.iter().filter(move |t| t.from == from)
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }
}
