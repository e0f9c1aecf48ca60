//! JourneyTracker - load, mutate and persist journeys by project key

use super::store::StateStore;
use crate::error::{EngineError, EngineResult};
use crate::models::journey::{LAST_PHASE, PASSES_PER_LAYER, PHASES_PER_PASS};
use crate::models::{phase_name, JourneyState, Position};
use std::path::PathBuf;

/// Root of the per-project directory skeleton
pub const THINKING_DIR: &str = "3_pass_thinking";

/// Outcome of a single advance
#[derive(Debug, Clone)]
pub struct Advance {
    pub previous: Position,
    pub state: JourneyState,
}

impl Advance {
    pub fn crossed_pass(&self) -> bool {
        self.previous.pass_num != self.state.pass_num
    }

    pub fn crossed_layer(&self) -> bool {
        self.previous.layer != self.state.layer
    }
}

/// What the next advance will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Phase(u32),
    Pass(u32),
    LayerOrComplete,
}

/// Detailed progress view of a journey
#[derive(Debug, Clone)]
pub struct JourneyStatus {
    pub state: JourneyState,
    pub step: u64,
    pub pass_progress: f64,
    pub overall_progress: f64,
    pub next: NextStep,
}

impl JourneyStatus {
    fn from_state(state: JourneyState) -> Self {
        let pos = state.position();
        let phases = f64::from(PHASES_PER_PASS);
        let done_in_pass = f64::from(pos.phase + 1);
        let done_in_layer = f64::from((pos.pass_num - 1) * PHASES_PER_PASS + pos.phase + 1);

        let next = if pos.phase < LAST_PHASE {
            NextStep::Phase(pos.phase + 1)
        } else if pos.pass_num < PASSES_PER_LAYER {
            NextStep::Pass(pos.pass_num + 1)
        } else {
            NextStep::LayerOrComplete
        };

        Self {
            step: pos.step(),
            pass_progress: done_in_pass / phases * 100.0,
            overall_progress: done_in_layer / (phases * f64::from(PASSES_PER_LAYER)) * 100.0,
            next,
            state,
        }
    }
}

/// Where the current phase's output file goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseFileTarget {
    Global,
    Component(String),
}

/// Tracks journeys for many project keys on top of a [`StateStore`]
#[derive(Debug, Clone)]
pub struct JourneyTracker {
    store: StateStore,
}

impl JourneyTracker {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Start a fresh journey, discarding any existing one for the key
    pub fn start_or_reset(&self, domain: &str, key: &str) -> EngineResult<JourneyState> {
        if let Ok(Some(existing)) = self.store.load(key) {
            tracing::warn!(
                key,
                previous_domain = %existing.domain,
                previous_position = %existing.position(),
                "overwriting existing journey"
            );
        }
        self.create(domain, key)
    }

    /// Start a fresh journey; fails if one is already active for the key
    pub fn start(&self, domain: &str, key: &str) -> EngineResult<JourneyState> {
        if let Some(existing) = self.store.load(key)? {
            return Err(EngineError::JourneyExists {
                key: key.to_string(),
                domain: existing.domain,
            });
        }
        self.create(domain, key)
    }

    fn create(&self, domain: &str, key: &str) -> EngineResult<JourneyState> {
        let mut state = JourneyState::new(domain);
        self.store.save(key, &mut state)?;
        tracing::info!(key, domain, position = %state.position(), "started journey");
        Ok(state)
    }

    /// Load the journey for a key or fail with `NoActiveJourney`
    pub fn load(&self, key: &str) -> EngineResult<JourneyState> {
        self.store
            .load(key)?
            .ok_or_else(|| EngineError::NoActiveJourney(key.to_string()))
    }

    /// Advance one phase, carrying into pass and layer
    pub fn advance(&self, key: &str) -> EngineResult<Advance> {
        let mut state = self.load(key)?;
        let previous = state.advance();
        self.store.save(key, &mut state)?;

        let advance = Advance { previous, state };
        if advance.crossed_layer() {
            tracing::info!(key, layer = advance.state.layer, "advanced to next layer");
        } else if advance.crossed_pass() {
            tracing::info!(key, pass = advance.state.pass_num, "advanced to next pass");
        }
        tracing::info!(key, from = %previous, to = %advance.state.position(), "phase transition");

        Ok(advance)
    }

    /// Return to `L0P1W[0](0)` keeping the domain
    pub fn reset(&self, key: &str) -> EngineResult<JourneyState> {
        let mut state = self.load(key)?;
        state.reset();
        self.store.save(key, &mut state)?;
        tracing::info!(key, "reset journey");
        Ok(state)
    }

    pub fn current_position(&self, key: &str) -> EngineResult<Position> {
        Ok(self.load(key)?.position())
    }

    pub fn status(&self, key: &str) -> EngineResult<JourneyStatus> {
        Ok(JourneyStatus::from_state(self.load(key)?))
    }

    /// Finish the journey and remove its state file
    pub fn complete(&self, key: &str) -> EngineResult<JourneyState> {
        let state = self.remove(key)?;
        tracing::info!(key, domain = %state.domain, position = %state.position(), "completed journey");
        Ok(state)
    }

    /// Drop the journey and remove its state file
    pub fn abandon(&self, key: &str) -> EngineResult<JourneyState> {
        let state = self.remove(key)?;
        tracing::info!(key, domain = %state.domain, position = %state.position(), "abandoned journey");
        Ok(state)
    }

    fn remove(&self, key: &str) -> EngineResult<JourneyState> {
        let state = self.load(key)?;
        self.store.delete(key)?;
        Ok(state)
    }

    /// Output file for the current phase, rooted at the key as a project path
    pub fn phase_file_path(&self, key: &str, target: &PhaseFileTarget) -> EngineResult<PathBuf> {
        let state = self.load(key)?;

        let mut dir = PathBuf::from(key).join(THINKING_DIR);
        match target {
            PhaseFileTarget::Global => dir.push("global_system"),
            PhaseFileTarget::Component(name) => {
                crate::services::structure_service::validate_component_name(name)?;
                dir.push("component_specific");
                dir.push(name);
            }
        }
        dir.push(format!("layer_{}", state.layer));
        dir.push(format!("pass_{}", state.pass_num));

        Ok(dir.join(format!("{}_{}.md", state.phase, phase_name(state.phase))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_tracker() -> (TempDir, JourneyTracker) {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::open(temp_dir.path().join("states")).unwrap();
        (temp_dir, JourneyTracker::new(store))
    }

    #[test]
    fn test_start_creates_fresh_state() {
        let (_temp, tracker) = setup_tracker();

        let state = tracker.start_or_reset("Autobiography", "/proj/a").unwrap();
        assert_eq!(state.notation(), "L0P1W[0](0)");
        assert_eq!(
            tracker.current_position("/proj/a").unwrap(),
            Position::START
        );
    }

    #[test]
    fn test_start_or_reset_overwrites() {
        let (_temp, tracker) = setup_tracker();

        tracker.start_or_reset("First", "k").unwrap();
        tracker.advance("k").unwrap();
        tracker.advance("k").unwrap();

        let state = tracker.start_or_reset("Second", "k").unwrap();
        assert_eq!(state.domain, "Second");
        assert_eq!(tracker.load("k").unwrap().position(), Position::START);
    }

    #[test]
    fn test_strict_start_refuses_existing() {
        let (_temp, tracker) = setup_tracker();

        tracker.start("First", "k").unwrap();
        let err = tracker.start("Second", "k").unwrap_err();
        assert!(matches!(err, EngineError::JourneyExists { ref domain, .. } if domain == "First"));
    }

    #[test]
    fn test_advance_persists() {
        let (_temp, tracker) = setup_tracker();
        tracker.start_or_reset("Chess", "k").unwrap();

        let advance = tracker.advance("k").unwrap();
        assert_eq!(advance.previous, Position::START);
        assert_eq!(advance.state.position(), Position::new(0, 1, 1));
        assert_eq!(tracker.current_position("k").unwrap(), Position::new(0, 1, 1));
    }

    #[test]
    fn test_advance_across_pass_and_layer() {
        let (_temp, tracker) = setup_tracker();
        tracker.start_or_reset("Chess", "k").unwrap();

        for _ in 0..6 {
            tracker.advance("k").unwrap();
        }
        let advance = tracker.advance("k").unwrap();
        assert!(advance.crossed_pass());
        assert_eq!(advance.state.position(), Position::new(0, 2, 0));

        for _ in 0..14 {
            tracker.advance("k").unwrap();
        }
        assert_eq!(tracker.current_position("k").unwrap(), Position::new(1, 1, 0));
    }

    #[test]
    fn test_missing_journey_errors() {
        let (_temp, tracker) = setup_tracker();

        assert!(matches!(
            tracker.advance("nope").unwrap_err(),
            EngineError::NoActiveJourney(_)
        ));
        assert!(matches!(
            tracker.reset("nope").unwrap_err(),
            EngineError::NoActiveJourney(_)
        ));
        assert!(matches!(
            tracker.complete("nope").unwrap_err(),
            EngineError::NoActiveJourney(_)
        ));
        assert!(matches!(
            tracker.abandon("nope").unwrap_err(),
            EngineError::NoActiveJourney(_)
        ));
    }

    #[test]
    fn test_reset_keeps_domain() {
        let (_temp, tracker) = setup_tracker();
        tracker.start_or_reset("Chess", "k").unwrap();
        for _ in 0..10 {
            tracker.advance("k").unwrap();
        }

        let state = tracker.reset("k").unwrap();
        assert_eq!(state.position(), Position::START);
        assert_eq!(state.domain, "Chess");
    }

    #[test]
    fn test_complete_and_abandon_delete() {
        let (_temp, tracker) = setup_tracker();

        tracker.start_or_reset("Chess", "k").unwrap();
        tracker.advance("k").unwrap();
        let done = tracker.complete("k").unwrap();
        assert_eq!(done.notation(), "L0P1W[0](1)");
        assert!(!tracker.store().exists("k"));

        tracker.start_or_reset("Go", "k").unwrap();
        let dropped = tracker.abandon("k").unwrap();
        assert_eq!(dropped.domain, "Go");
        assert!(matches!(
            tracker.status("k").unwrap_err(),
            EngineError::NoActiveJourney(_)
        ));
    }

    #[test]
    fn test_status_progress() {
        let (_temp, tracker) = setup_tracker();
        tracker.start_or_reset("Chess", "k").unwrap();

        let status = tracker.status("k").unwrap();
        assert_eq!(status.step, 1);
        assert_eq!(status.next, NextStep::Phase(1));

        for _ in 0..6 {
            tracker.advance("k").unwrap();
        }
        let status = tracker.status("k").unwrap();
        assert_eq!(status.step, 7);
        assert!((status.pass_progress - 100.0).abs() < 1e-9);
        assert!((status.overall_progress - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(status.next, NextStep::Pass(2));

        for _ in 0..14 {
            tracker.advance("k").unwrap();
        }
        let status = tracker.status("k").unwrap();
        assert_eq!(status.step, 21);
        assert_eq!(status.next, NextStep::LayerOrComplete);
    }

    #[test]
    fn test_phase_file_path() {
        let (_temp, tracker) = setup_tracker();
        tracker.start_or_reset("Chess", "/proj/chess").unwrap();
        for _ in 0..9 {
            tracker.advance("/proj/chess").unwrap();
        }

        let global = tracker
            .phase_file_path("/proj/chess", &PhaseFileTarget::Global)
            .unwrap();
        assert_eq!(
            global,
            PathBuf::from("/proj/chess/3_pass_thinking/global_system/layer_0/pass_2/2_SystemsArchitecture.md")
        );

        let component = tracker
            .phase_file_path("/proj/chess", &PhaseFileTarget::Component("engine".into()))
            .unwrap();
        assert_eq!(
            component,
            PathBuf::from(
                "/proj/chess/3_pass_thinking/component_specific/engine/layer_0/pass_2/2_SystemsArchitecture.md"
            )
        );

        let err = tracker
            .phase_file_path("/proj/chess", &PhaseFileTarget::Component("../up".into()))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidComponentName { .. }));
    }
}
