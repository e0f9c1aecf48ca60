//! Journey service - renders tracker results as the text both the CLI and
//! the MCP tools return

use crate::error::{EngineError, EngineResult};
use crate::models::JourneyState;
use crate::prompts;
use crate::state::tracker::{JourneyStatus, NextStep, PhaseFileTarget};
use crate::state::JourneyTracker;
use serde_json::{json, Value};

/// Start (or restart) a journey with a short confirmation
pub fn core_run(tracker: &JourneyTracker, domain: &str, key: &str) -> EngineResult<String> {
    let state = tracker.start_or_reset(domain, key)?;
    Ok(render_started(&state))
}

/// Start (or restart) a journey with the full instruction block
pub fn expanded_run(tracker: &JourneyTracker, domain: &str, key: &str) -> EngineResult<String> {
    let state = tracker.start_or_reset(domain, key)?;
    Ok(render_expanded(&state))
}

pub fn render_started(state: &JourneyState) -> String {
    format!(
        r#"✅ **3-Pass Session Started**

**Domain**: {domain}
**Position**: {position}
**Status**: Ready to begin

Use `get_next_phase()` to get your next prompt, or `expanded_run()` for detailed guidance."#,
        domain = state.domain,
        position = state.position(),
    )
}

pub fn render_expanded(state: &JourneyState) -> String {
    let instructions = prompts::instructions(state);

    format!(
        r#"🚀 **Expanded 3-Pass Journey Started**

**Domain**: {domain}
**Current Position**: {position}

{instructions}

---

📚 **Key Resources**:
- Use `get_next_phase()` to advance and get next prompt
- Use `get_status()` to see overall progress
- Each phase guides you through the systematic thinking process

🎯 **Remember the Three Passes**:
1. **Pass 1 (Conceptualize)**: What IS this domain? (Ontological understanding)
2. **Pass 2 (Generally Reify)**: How do we MAKE things in this domain? (System building)
3. **Pass 3 (Specifically Reify)**: How do we make THIS specific instance? (Concrete creation)

Ready to begin your systematic thinking journey!"#,
        domain = state.domain,
        position = state.position(),
        instructions = instructions,
    )
}

/// Advance one phase and hand back the prompt for the new position
pub fn next_phase(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    let advance = tracker.advance(key)?;
    let state = &advance.state;

    let prompt = prompts::lookup(state.pass_num, state.phase, &state.domain);
    let definition = prompts::phase_definition(state.phase);
    let file_path = tracker.phase_file_path(key, &PhaseFileTarget::Global)?;

    let mut result = format!("{}\n\n", state.position());
    if advance.crossed_layer() {
        result.push_str(&format!(
            "🔁 Entering layer {}: the methodology applies again, one level deeper.\n\n",
            state.layer
        ));
    } else if advance.crossed_pass() {
        result.push_str(&format!("➡️ Entering {}\n\n", state.position().pass_name()));
    }
    result.push_str(&prompt);
    result.push_str("\n\n");
    result.push_str(&definition);
    result.push_str(&format!("\n\nWrite file: {}\n\n", file_path.display()));
    result.push_str(prompts::MASTER_PROMPT_REMINDER);

    Ok(result)
}

pub fn current_state(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    Ok(tracker.current_position(key)?.to_string())
}

pub fn instructions(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    let state = tracker.load(key)?;
    Ok(prompts::instructions(&state))
}

/// Detailed status with progress analysis
pub fn status(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    let status = tracker.status(key)?;
    Ok(render_status(&status))
}

fn render_status(status: &JourneyStatus) -> String {
    let state = &status.state;
    let pos = state.position();

    let whats_next = match status.next {
        NextStep::Phase(phase) => format!("Next: Phase {} in {}", phase, pos.pass_name()),
        NextStep::Pass(pass_num) => format!("Next: Start Pass {}", pass_num),
        NextStep::LayerOrComplete => {
            "Next: Consider recursive application to new layer or complete the journey"
                .to_string()
        }
    };

    format!(
        r#"3-Pass Journey Status:
Domain: {domain}
Position: {position}
Layer: {layer} | Pass: {pass_num}/3 | Phase: {phase}/6
Current Step: {step}
Started: {started}
Last Updated: {updated}

Current Phase: {phase_name}
Current Pass: {pass_name}

---

📊 **Progress Analysis**:
- **Current Pass Progress**: {pass_progress:.1}% ({done}/7 phases)
- **Overall Journey Progress**: {overall_progress:.1}%
- **{whats_next}**

📁 **Recommended Files/Outputs**:
- **Pass 1**: Ontology document, concept map, domain understanding
- **Pass 2**: System design, architecture, implementation plan
- **Pass 3**: Specific instance, configuration, actual output

🔄 **Actions Available**:
- `get_next_phase()` - Advance and get next guidance
- `get_instructions()` - Detailed guidance for the current phase
- `get_status()` - Check progress anytime"#,
        domain = state.domain,
        position = pos,
        layer = pos.layer,
        pass_num = pos.pass_num,
        phase = pos.phase,
        step = status.step,
        started = state.started_at.format("%Y-%m-%d %H:%M"),
        updated = state.last_updated.format("%Y-%m-%d %H:%M"),
        phase_name = pos.phase_name(),
        pass_name = pos.pass_name(),
        pass_progress = status.pass_progress,
        done = pos.phase + 1,
        overall_progress = status.overall_progress,
        whats_next = whats_next,
    )
}

/// Machine-readable status for `--json`
pub fn status_json(tracker: &JourneyTracker, key: &str) -> EngineResult<Value> {
    let status = tracker.status(key)?;
    let state = &status.state;

    Ok(json!({
        "key": key,
        "domain": state.domain,
        "position": state.notation(),
        "layer": state.layer,
        "pass_num": state.pass_num,
        "phase": state.phase,
        "phase_name": state.position().phase_name(),
        "pass_name": state.position().pass_name(),
        "step": status.step,
        "pass_progress": status.pass_progress,
        "overall_progress": status.overall_progress,
        "started_at": state.started_at.to_rfc3339(),
        "last_updated": state.last_updated.to_rfc3339(),
    }))
}

pub fn reset(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    let state = tracker.reset(key)?;

    Ok(format!(
        r#"🔄 **Journey Reset**

**Domain**: {}
**Position**: {} (back to start)

Ready to begin again! Use `get_next_phase()` to get your first prompt."#,
        state.domain,
        state.position()
    ))
}

pub fn complete(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    let state = tracker.complete(key)?;

    Ok(format!(
        r#"✅ **3-Pass Journey Completed**

Journey completed and cleaned up: '{}' (final position: {})

State cleaned up. Use `core_run()` or `expanded_run()` to start a new journey."#,
        state.domain,
        state.position()
    ))
}

pub fn abandon(tracker: &JourneyTracker, key: &str) -> EngineResult<String> {
    let state = tracker.abandon(key)?;

    Ok(format!(
        r#"🗑️ **3-Pass Journey Abandoned**

Journey abandoned and cleaned up: '{}' (last position: {})

State cleaned up. Use `core_run()` or `expanded_run()` to start a new journey."#,
        state.domain,
        state.position()
    ))
}

/// Output path for the current phase; `component` selects a component run
pub fn phase_file(
    tracker: &JourneyTracker,
    key: &str,
    component: Option<&str>,
) -> EngineResult<String> {
    let target = match component {
        Some(name) => PhaseFileTarget::Component(name.to_string()),
        None => PhaseFileTarget::Global,
    };
    let path = tracker.phase_file_path(key, &target)?;
    Ok(path.display().to_string())
}

/// User-facing text for a recoverable error
pub fn render_error(err: &EngineError) -> String {
    match err {
        EngineError::NoActiveJourney(_) => {
            "❌ No active journey found. Use `core_run()` or `expanded_run()` to start.".to_string()
        }
        EngineError::JourneyExists { domain, .. } => format!(
            "❌ A journey for '{}' is already active here. Use `reset_journey()`, `complete_3pass_journey()` or start with overwrite.",
            domain
        ),
        EngineError::CorruptState { path, reason } => format!(
            "❌ Journey state at {} is unreadable ({}). Delete or fix the file.",
            path.display(),
            reason
        ),
        EngineError::MissingComponentName => {
            "❌ Component name required for local runs".to_string()
        }
        other => format!("❌ {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateStore;
    use tempfile::TempDir;

    fn setup_tracker() -> (TempDir, JourneyTracker) {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::open(temp_dir.path().join("states")).unwrap();
        (temp_dir, JourneyTracker::new(store))
    }

    #[test]
    fn test_core_run() {
        let (_temp, tracker) = setup_tracker();
        let text = core_run(&tracker, "Autobiography", "/proj").unwrap();
        assert!(text.contains("**Position**: L0P1W[0](0)"));
        assert!(text.contains("**Domain**: Autobiography"));
    }

    #[test]
    fn test_expanded_run_includes_instructions() {
        let (_temp, tracker) = setup_tracker();
        let text = expanded_run(&tracker, "Chess", "/proj").unwrap();
        assert!(text.contains("Current Position: L0P1W[0](0)"));
        assert!(text.contains("Phase: AbstractGoal"));
    }

    #[test]
    fn test_next_phase_text() {
        let (_temp, tracker) = setup_tracker();
        core_run(&tracker, "Chess", "/proj/chess").unwrap();

        let text = next_phase(&tracker, "/proj/chess").unwrap();
        assert!(text.starts_with("L0P1W[0](1)"));
        assert!(text.contains("universal characteristics of Chess"));
        assert!(text.contains("(1)[SystemsDesign"));
        assert!(text.contains("global_system/layer_0/pass_1/1_SystemsDesign.md"));
        assert!(text.contains("REMINDER"));
    }

    #[test]
    fn test_next_phase_announces_pass_change() {
        let (_temp, tracker) = setup_tracker();
        core_run(&tracker, "Chess", "k").unwrap();
        for _ in 0..6 {
            next_phase(&tracker, "k").unwrap();
        }
        let text = next_phase(&tracker, "k").unwrap();
        assert!(text.starts_with("L0P2W[0](0)"));
        assert!(text.contains("Entering Generally Reify"));
    }

    #[test]
    fn test_status_text() {
        let (_temp, tracker) = setup_tracker();
        core_run(&tracker, "Chess", "k").unwrap();
        next_phase(&tracker, "k").unwrap();

        let text = status(&tracker, "k").unwrap();
        assert!(text.contains("Position: L0P1W[0](1)"));
        assert!(text.contains("Current Step: 2"));
        assert!(text.contains("28.6% (2/7 phases)"));
        assert!(text.contains("Next: Phase 2 in Conceptualize (What IS)"));
    }

    #[test]
    fn test_status_json() {
        let (_temp, tracker) = setup_tracker();
        core_run(&tracker, "Chess", "k").unwrap();
        let value = status_json(&tracker, "k").unwrap();
        assert_eq!(value["position"], "L0P1W[0](0)");
        assert_eq!(value["phase_name"], "AbstractGoal");
        assert_eq!(value["step"], 1);
    }

    #[test]
    fn test_lifecycle_texts() {
        let (_temp, tracker) = setup_tracker();
        core_run(&tracker, "Chess", "k").unwrap();
        next_phase(&tracker, "k").unwrap();

        assert!(reset(&tracker, "k").unwrap().contains("L0P1W[0](0) (back to start)"));
        assert!(complete(&tracker, "k")
            .unwrap()
            .contains("'Chess' (final position: L0P1W[0](0))"));

        let err = abandon(&tracker, "k").unwrap_err();
        assert!(render_error(&err).contains("No active journey found"));
    }

    #[test]
    fn test_phase_file() {
        let (_temp, tracker) = setup_tracker();
        core_run(&tracker, "Chess", "/proj").unwrap();

        let global = phase_file(&tracker, "/proj", None).unwrap();
        assert!(global.ends_with("0_AbstractGoal.md"));

        let err = phase_file(&tracker, "/proj", Some("bad name")).unwrap_err();
        assert!(render_error(&err).contains("Invalid component name"));
    }
}
