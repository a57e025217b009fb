//! The turntable engine.
//!
//! Owns the single live resource and executes actions against the
//! transition table. `execute` is a critical section: lookup, side effect,
//! and commit all happen under one lock acquisition, so concurrent calls
//! serialize and there is no window where the state says LOADED but no
//! vinyl is mounted.

use crate::action::Action;
use crate::catalog::{Track, TrackCatalog};
use crate::error::CoreError;
use crate::projector::{project, TurntableResource};
use crate::state::{StateId, Vinyl, VinylState};
use crate::table::TransitionTable;
use parking_lot::Mutex;
use std::sync::Arc;

/// The live resource guarded by the engine's lock.
struct Resource {
    state: StateId,
    vinyl: Option<Vinyl>,
}

/// Executes actions on the process-wide turntable resource.
pub struct TurntableEngine {
    table: TransitionTable,
    catalog: Arc<dyn TrackCatalog>,
    resource: Mutex<Resource>,
}

impl TurntableEngine {
    /// Creates an engine in the initial state (OFF, EMPTY, STOPPED) with a
    /// validated standard transition table.
    pub fn new(catalog: Arc<dyn TrackCatalog>) -> Result<Self, CoreError> {
        let table = TransitionTable::standard();
        table.validate()?;

        Ok(Self {
            table,
            catalog,
            resource: Mutex::new(Resource {
                state: StateId::INITIAL,
                vinyl: None,
            }),
        })
    }

    /// The table this engine dispatches against.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Projects the current resource without mutating it.
    pub fn snapshot(&self) -> TurntableResource {
        let res = self.resource.lock();
        project(&self.table, res.state, res.vinyl.clone())
    }

    /// Executes one action, failing with `InvalidTransition` if the table
    /// declares no transition from the current state.
    pub fn execute(&self, action: Action) -> Result<TurntableResource, CoreError> {
        let mut res = self.resource.lock();
        self.apply(&mut res, action)
    }

    /// Mounts a random track from the catalog: put when the deck is empty,
    /// change when one is already loaded. The choice and the transition
    /// happen under the same lock acquisition, so a concurrent load cannot
    /// observe a stale vinyl axis.
    pub fn load_vinyl(&self) -> Result<TurntableResource, CoreError> {
        let mut res = self.resource.lock();
        let action = match res.state.axes().vinyl {
            VinylState::Empty => Action::PutVinyl,
            VinylState::Loaded => Action::ChangeVinyl,
        };
        self.apply(&mut res, action)
    }

    pub fn power_on(&self) -> Result<TurntableResource, CoreError> {
        self.execute(Action::PowerOn)
    }

    pub fn power_off(&self) -> Result<TurntableResource, CoreError> {
        self.execute(Action::PowerOff)
    }

    pub fn remove_vinyl(&self) -> Result<TurntableResource, CoreError> {
        self.execute(Action::RemoveVinyl)
    }

    pub fn play(&self) -> Result<TurntableResource, CoreError> {
        self.execute(Action::Play)
    }

    pub fn stop(&self) -> Result<TurntableResource, CoreError> {
        self.execute(Action::Stop)
    }

    /// Looks up the transition, runs the side effect, then commits. The
    /// side effect runs first: a failed catalog fetch must leave the
    /// resource exactly as it was.
    fn apply(&self, res: &mut Resource, action: Action) -> Result<TurntableResource, CoreError> {
        let to = self
            .table
            .lookup(res.state, action)
            .ok_or(CoreError::InvalidTransition {
                action,
                state: res.state,
            })?;

        let mounted = match action {
            Action::PutVinyl | Action::ChangeVinyl => {
                let track = self.fetch_track()?;
                Some(Some(Vinyl::from(track)))
            }
            Action::RemoveVinyl => Some(None),
            Action::PowerOn | Action::PowerOff | Action::Play | Action::Stop => None,
        };

        let from = res.state;
        res.state = to;
        if let Some(vinyl) = mounted {
            res.vinyl = vinyl;
        }
        tracing::debug!(%from, %to, %action, "transition applied");

        Ok(project(&self.table, res.state, res.vinyl.clone()))
    }

    fn fetch_track(&self) -> Result<Track, CoreError> {
        if !self.catalog.is_available() {
            return Err(self.catalog_error());
        }
        self.catalog
            .random_track()
            .ok_or_else(|| self.catalog_error())
    }

    fn catalog_error(&self) -> CoreError {
        CoreError::CatalogUnavailable {
            reason: self
                .catalog
                .load_error()
                .unwrap_or_else(|| "track catalog not available".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlaybackState, PowerState};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    /// Serves tracks in fetch order and counts fetches.
    struct FixedCatalog {
        tracks: Vec<Track>,
        fetches: AtomicUsize,
    }

    impl FixedCatalog {
        fn new() -> Self {
            Self {
                tracks: vec![
                    Track {
                        id: "t-1".to_string(),
                        title: "Gymnopédie No. 1".to_string(),
                        composer: "Erik Satie".to_string(),
                        url: "https://example.com/midi/gymnopedie-1.mid".to_string(),
                    },
                    Track {
                        id: "t-2".to_string(),
                        title: "Clair de Lune".to_string(),
                        composer: "Claude Debussy".to_string(),
                        url: "https://example.com/midi/clair-de-lune.mid".to_string(),
                    },
                ],
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl TrackCatalog for FixedCatalog {
        fn is_available(&self) -> bool {
            !self.tracks.is_empty()
        }

        fn random_track(&self) -> Option<Track> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst);
            self.tracks.get(n % self.tracks.len()).cloned()
        }
    }

    /// A catalog that failed to load.
    struct DownCatalog;

    impl TrackCatalog for DownCatalog {
        fn is_available(&self) -> bool {
            false
        }

        fn load_error(&self) -> Option<String> {
            Some("track catalog failed to load".to_string())
        }

        fn random_track(&self) -> Option<Track> {
            None
        }
    }

    fn test_engine() -> (Arc<FixedCatalog>, TurntableEngine) {
        let catalog = Arc::new(FixedCatalog::new());
        let engine = TurntableEngine::new(catalog.clone()).unwrap();
        (catalog, engine)
    }

    /// Drives a fresh engine into the given state via legal actions.
    fn engine_in(state: StateId) -> TurntableEngine {
        let (_, engine) = test_engine();
        let path: &[Action] = match state {
            StateId::S1 => &[],
            StateId::S2 => &[Action::PowerOn, Action::PutVinyl, Action::PowerOff],
            StateId::S3 => &[Action::PowerOn],
            StateId::S4 => &[Action::PowerOn, Action::PutVinyl],
            StateId::S5 => &[Action::PowerOn, Action::PutVinyl, Action::Play],
        };
        for &action in path {
            engine.execute(action).unwrap();
        }
        engine
    }

    #[test]
    fn test_initial_snapshot() {
        let (_, engine) = test_engine();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.power_state, PowerState::Off);
        assert_eq!(snapshot.vinyl_state, VinylState::Empty);
        assert_eq!(snapshot.playback_state, PlaybackState::Stopped);
        assert!(snapshot.current_vinyl.is_none());
        let names: Vec<_> = snapshot.links.names().collect();
        assert_eq!(names, vec!["self", "power-on"]);
    }

    #[test]
    fn test_round_trip_returns_to_initial() {
        let (catalog, engine) = test_engine();

        engine.power_on().unwrap();
        engine.load_vinyl().unwrap();
        engine.play().unwrap();
        engine.stop().unwrap();
        engine.remove_vinyl().unwrap();
        let last = engine.power_off().unwrap();

        assert_eq!(last.power_state, PowerState::Off);
        assert_eq!(last.vinyl_state, VinylState::Empty);
        assert_eq!(last.playback_state, PlaybackState::Stopped);
        assert!(last.current_vinyl.is_none());
        assert_eq!(catalog.fetch_count(), 1);
    }

    #[test]
    fn test_execute_matches_table_exhaustively() {
        let table = TransitionTable::standard();
        for state in StateId::ALL {
            for action in Action::ALL {
                let engine = engine_in(state);
                let before = engine.snapshot();
                let result = engine.execute(action);

                match table.lookup(state, action) {
                    Some(to) => {
                        let after = result.unwrap();
                        assert_eq!(after.power_state, to.axes().power);
                        assert_eq!(after.vinyl_state, to.axes().vinyl);
                        assert_eq!(after.playback_state, to.axes().playback);
                    }
                    None => {
                        let err = result.unwrap_err();
                        assert!(
                            matches!(err, CoreError::InvalidTransition { .. }),
                            "state {} action {}",
                            state,
                            action
                        );
                        assert_eq!(engine.snapshot(), before);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rejected_action_never_mutates() {
        let (_, engine) = test_engine();
        for _ in 0..3 {
            let err = engine.play().unwrap_err();
            assert!(matches!(err, CoreError::InvalidTransition { .. }));
        }
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.power_state, PowerState::Off);
        assert!(snapshot.current_vinyl.is_none());
    }

    #[test]
    fn test_play_rejected_without_vinyl() {
        let engine = engine_in(StateId::S3);
        let err = engine.play().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn test_only_stop_legal_while_playing() {
        for action in [Action::PowerOff, Action::PutVinyl, Action::RemoveVinyl] {
            let engine = engine_in(StateId::S5);
            let err = engine.execute(action).unwrap_err();
            assert!(matches!(err, CoreError::InvalidTransition { .. }));
        }
        let engine = engine_in(StateId::S5);
        let after = engine.stop().unwrap();
        assert_eq!(after.playback_state, PlaybackState::Stopped);
    }

    #[test]
    fn test_load_vinyl_puts_then_changes() {
        let (catalog, engine) = test_engine();
        engine.power_on().unwrap();

        let first = engine.load_vinyl().unwrap();
        assert_eq!(first.vinyl_state, VinylState::Loaded);
        let first_id = first.current_vinyl.unwrap().id;

        let second = engine.load_vinyl().unwrap();
        assert_eq!(second.vinyl_state, VinylState::Loaded);
        assert_eq!(second.playback_state, PlaybackState::Stopped);
        let second_id = second.current_vinyl.unwrap().id;

        assert_ne!(first_id, second_id);
        assert_eq!(catalog.fetch_count(), 2);
    }

    #[test]
    fn test_vinyl_survives_power_cycle() {
        let engine = engine_in(StateId::S4);
        let mounted = engine.snapshot().current_vinyl.unwrap();

        let off = engine.power_off().unwrap();
        assert_eq!(off.vinyl_state, VinylState::Loaded);
        assert_eq!(off.current_vinyl.as_ref(), Some(&mounted));

        let on = engine.power_on().unwrap();
        assert_eq!(on.current_vinyl, Some(mounted));
    }

    #[test]
    fn test_catalog_down_leaves_resource_unchanged() {
        let engine = TurntableEngine::new(Arc::new(DownCatalog)).unwrap();
        engine.power_on().unwrap();
        let before = engine.snapshot();

        let err = engine.load_vinyl().unwrap_err();
        match err {
            CoreError::CatalogUnavailable { reason } => {
                assert_eq!(reason, "track catalog failed to load");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let after = engine.snapshot();
        assert_eq!(after, before);
        assert_eq!(after.vinyl_state, VinylState::Empty);
        assert!(after.current_vinyl.is_none());
    }

    #[test]
    fn test_concurrent_puts_run_exactly_one_side_effect() {
        let catalog = Arc::new(FixedCatalog::new());
        let engine = Arc::new(TurntableEngine::new(catalog.clone()).unwrap());
        engine.power_on().unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let mut handles = Vec::new();
        for _ in 0..2 {
            let engine = engine.clone();
            let barrier = barrier.clone();
            handles.push(std::thread::spawn(move || {
                barrier.wait();
                engine.execute(Action::PutVinyl)
            }));
        }

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let oks = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(oks, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(CoreError::InvalidTransition {
                action: Action::PutVinyl,
                state: StateId::S4
            })
        )));

        assert_eq!(catalog.fetch_count(), 1);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.vinyl_state, VinylState::Loaded);
        assert_eq!(snapshot.playback_state, PlaybackState::Stopped);
        assert!(snapshot.current_vinyl.is_some());
    }
}
