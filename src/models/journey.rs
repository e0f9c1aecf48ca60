//! Journey state and the (layer, pass, phase) position counter
//!
//! Position notation follows the System Design DSL:
//! `L0P1W[0](3)` = layer 0, pass 1, workflow phase 3.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of workflow phases in one pass (0-6)
pub const PHASES_PER_PASS: u32 = 7;

/// Number of passes in one layer (1-3)
pub const PASSES_PER_LAYER: u32 = 3;

/// Highest phase index
pub const LAST_PHASE: u32 = PHASES_PER_PASS - 1;

/// The three fixed mindsets applied within a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// What IS this domain (ontological)
    Conceptualize,
    /// How to MAKE things in this domain (system building)
    GenerallyReify,
    /// Make THIS specific instance
    SpecificallyReify,
}

impl Pass {
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Pass::Conceptualize),
            2 => Some(Pass::GenerallyReify),
            3 => Some(Pass::SpecificallyReify),
            _ => None,
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            Pass::Conceptualize => 1,
            Pass::GenerallyReify => 2,
            Pass::SpecificallyReify => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pass::Conceptualize => "Conceptualize (What IS)",
            Pass::GenerallyReify => "Generally Reify (How MAKE)",
            Pass::SpecificallyReify => "Specifically Reify (Make THIS)",
        }
    }
}

/// The seven fixed workflow stages applied within a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AbstractGoal,
    SystemsDesign,
    SystemsArchitecture,
    Dsl,
    Topology,
    EngineeredSystem,
    FeedbackLoop,
}

impl Phase {
    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            0 => Some(Phase::AbstractGoal),
            1 => Some(Phase::SystemsDesign),
            2 => Some(Phase::SystemsArchitecture),
            3 => Some(Phase::Dsl),
            4 => Some(Phase::Topology),
            5 => Some(Phase::EngineeredSystem),
            6 => Some(Phase::FeedbackLoop),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::AbstractGoal => "AbstractGoal",
            Phase::SystemsDesign => "SystemsDesign",
            Phase::SystemsArchitecture => "SystemsArchitecture",
            Phase::Dsl => "DSL",
            Phase::Topology => "Topology",
            Phase::EngineeredSystem => "EngineeredSystem",
            Phase::FeedbackLoop => "FeedbackLoop",
        }
    }
}

/// Human-readable pass name, `Pass{n}` for numbers outside 1-3
pub fn pass_name(pass_num: u32) -> String {
    Pass::from_number(pass_num)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| format!("Pass{}", pass_num))
}

/// Human-readable phase name, `Phase{n}` for numbers outside 0-6
pub fn phase_name(phase: u32) -> String {
    Phase::from_number(phase)
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| format!("Phase{}", phase))
}

/// A point in the layer-major, then pass, then phase ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub layer: u32,
    pub pass_num: u32,
    pub phase: u32,
}

impl Position {
    /// `L0P1W[0](0)`
    pub const START: Position = Position {
        layer: 0,
        pass_num: 1,
        phase: 0,
    };

    pub fn new(layer: u32, pass_num: u32, phase: u32) -> Self {
        Self {
            layer,
            pass_num,
            phase,
        }
    }

    /// Whether pass and phase are inside their fixed ranges
    pub fn is_valid(&self) -> bool {
        (1..=PASSES_PER_LAYER).contains(&self.pass_num) && self.phase <= LAST_PHASE
    }

    /// Next position: phase carries into pass, pass carries into layer.
    ///
    /// Layers have no upper bound; the methodology is reapplied recursively.
    pub fn advance(&self) -> Position {
        if self.phase < LAST_PHASE {
            Position {
                phase: self.phase + 1,
                ..*self
            }
        } else if self.pass_num < PASSES_PER_LAYER {
            Position {
                pass_num: self.pass_num + 1,
                phase: 0,
                ..*self
            }
        } else {
            Position {
                layer: self.layer.saturating_add(1),
                pass_num: 1,
                phase: 0,
            }
        }
    }

    /// One-based step counter across all layers
    pub fn step(&self) -> u64 {
        let per_layer = u64::from(PASSES_PER_LAYER * PHASES_PER_PASS);
        u64::from(self.layer) * per_layer
            + u64::from(self.pass_num.saturating_sub(1)) * u64::from(PHASES_PER_PASS)
            + u64::from(self.phase)
            + 1
    }

    pub fn pass_name(&self) -> String {
        pass_name(self.pass_num)
    }

    pub fn phase_name(&self) -> String {
        phase_name(self.phase)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{}P{}W[{}]({})",
            self.layer, self.pass_num, self.layer, self.phase
        )
    }
}

/// Persisted progress record for one project key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyState {
    /// The domain being analyzed, fixed at creation
    pub domain: String,

    #[serde(default)]
    pub layer: u32,

    #[serde(default = "default_pass_num")]
    pub pass_num: u32,

    #[serde(default)]
    pub phase: u32,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub started_at: DateTime<Utc>,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_updated: DateTime<Utc>,
}

fn default_pass_num() -> u32 {
    1
}

impl JourneyState {
    /// Fresh journey at `L0P1W[0](0)`
    pub fn new(domain: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            domain: domain.into(),
            layer: 0,
            pass_num: 1,
            phase: 0,
            started_at: now,
            last_updated: now,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.layer, self.pass_num, self.phase)
    }

    pub fn set_position(&mut self, position: Position) {
        self.layer = position.layer;
        self.pass_num = position.pass_num;
        self.phase = position.phase;
    }

    /// Advance one phase and return the position left behind
    pub fn advance(&mut self) -> Position {
        let previous = self.position();
        self.set_position(previous.advance());
        previous
    }

    /// Back to `L0P1W[0](0)`, domain and start time kept
    pub fn reset(&mut self) {
        self.set_position(Position::START);
    }

    /// DSL notation for the current position
    pub fn notation(&self) -> String {
        self.position().to_string()
    }
}

/// Timestamp parsing that accepts RFC 3339 and the naive
/// `YYYY-MM-DD HH:MM:SS[.ffffff]` form (interpreted as local time).
mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        let naive = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;

        Some(match Local.from_local_datetime(&naive).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&naive),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_valid_positions(layer: u32) -> Vec<Position> {
        let mut positions = Vec::new();
        for pass_num in 1..=PASSES_PER_LAYER {
            for phase in 0..=LAST_PHASE {
                positions.push(Position::new(layer, pass_num, phase));
            }
        }
        positions
    }

    #[test]
    fn test_advance_within_pass() {
        assert_eq!(Position::new(0, 1, 0).advance(), Position::new(0, 1, 1));
        assert_eq!(Position::new(4, 2, 5).advance(), Position::new(4, 2, 6));
    }

    #[test]
    fn test_advance_rolls_pass() {
        assert_eq!(Position::new(0, 1, 6).advance(), Position::new(0, 2, 0));
        assert_eq!(Position::new(1, 2, 6).advance(), Position::new(1, 3, 0));
    }

    #[test]
    fn test_advance_rolls_layer() {
        assert_eq!(Position::new(2, 3, 6).advance(), Position::new(3, 1, 0));
    }

    #[test]
    fn test_full_cycle_increments_layer_once() {
        for layer in [0, 1, 7] {
            for start in all_valid_positions(layer) {
                let mut pos = start;
                for _ in 0..(PASSES_PER_LAYER * PHASES_PER_PASS) {
                    pos = pos.advance();
                }
                assert_eq!(pos.layer, start.layer + 1, "from {}", start);
                assert_eq!((pos.pass_num, pos.phase), (start.pass_num, start.phase));
            }
        }

        let mut pos = Position::START;
        for _ in 0..21 {
            pos = pos.advance();
        }
        assert_eq!(pos, Position::new(1, 1, 0));
    }

    #[test]
    fn test_advance_is_monotonic() {
        let mut pos = Position::START;
        for _ in 0..50 {
            let next = pos.advance();
            assert!(next > pos);
            assert!(next.is_valid());
            assert_eq!(next.step(), pos.step() + 1);
            pos = next;
        }
    }

    #[test]
    fn test_layer_saturates() {
        let pos = Position::new(u32::MAX, 3, 6).advance();
        assert_eq!(pos, Position::new(u32::MAX, 1, 0));
    }

    #[test]
    fn test_notation() {
        assert_eq!(Position::START.to_string(), "L0P1W[0](0)");
        assert_eq!(Position::new(2, 3, 4).to_string(), "L2P3W[2](4)");
    }

    #[test]
    fn test_validity() {
        assert!(Position::new(0, 1, 0).is_valid());
        assert!(Position::new(9, 3, 6).is_valid());
        assert!(!Position::new(0, 0, 0).is_valid());
        assert!(!Position::new(0, 4, 0).is_valid());
        assert!(!Position::new(0, 1, 7).is_valid());
    }

    #[test]
    fn test_names_with_fallback() {
        assert_eq!(pass_name(2), "Generally Reify (How MAKE)");
        assert_eq!(pass_name(9), "Pass9");
        assert_eq!(phase_name(3), "DSL");
        assert_eq!(phase_name(11), "Phase11");
        assert_eq!(Pass::from_number(3).map(|p| p.number()), Some(3));
    }

    #[test]
    fn test_reset_keeps_domain() {
        let mut state = JourneyState::new("Autobiography System");
        state.set_position(Position::new(3, 2, 5));
        state.reset();
        assert_eq!(state.position(), Position::START);
        assert_eq!(state.domain, "Autobiography System");
    }

    #[test]
    fn test_state_json_fields() {
        let state = JourneyState::new("Chess");
        let value = serde_json::to_value(&state).unwrap();
        for field in ["domain", "layer", "pass_num", "phase", "started_at", "last_updated"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        let back: JourneyState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_naive_timestamps_accepted() {
        let json = r#"{
            "domain": "Chess",
            "layer": 1,
            "pass_num": 2,
            "phase": 3,
            "started_at": "2025-01-02 03:04:05.123456",
            "last_updated": "2025-01-02T03:04:06"
        }"#;
        let state: JourneyState = serde_json::from_str(json).unwrap();
        assert_eq!(state.position(), Position::new(1, 2, 3));
        assert!(state.last_updated > state.started_at);
    }

    #[test]
    fn test_garbage_timestamp_rejected() {
        assert!(timestamp::parse("yesterday").is_none());
    }
}
