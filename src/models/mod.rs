pub mod journey;

pub use journey::{pass_name, phase_name, JourneyState, Pass, Phase, Position};
