//! Prompt catalog for the 3-pass methodology
//!
//! Pure lookups keyed by (pass, phase, domain). Nothing here touches disk or
//! holds state.

use crate::models::journey::{pass_name, phase_name};
use crate::models::JourneyState;

/// Appended to every phase prompt handed out after an advance
pub const MASTER_PROMPT_REMINDER: &str = "⚠️ **REMINDER**: You must always apply the Emergence Engine's master prompt to the pass and phase you are on. Read it with get_master_prompt() if you haven't read it recently.";

/// Contextual prompt for a pass and phase, falling back to a generic line
pub fn lookup(pass_num: u32, phase: u32, domain: &str) -> String {
    let prompt = match pass_num {
        1 => conceptualize_prompt(phase, domain),
        2 => generally_reify_prompt(phase, domain),
        3 => specifically_reify_prompt(phase, domain),
        _ => None,
    };

    prompt.unwrap_or_else(|| {
        format!(
            "Work on {} for {} in domain: {}",
            phase_name(phase),
            pass_name(pass_num),
            domain
        )
    })
}

/// Pass 1: what IS the domain
fn conceptualize_prompt(phase: u32, domain: &str) -> Option<String> {
    let prompt = match phase {
        0 => format!(
            "🎯 **Abstract Goal - Pass 1**: What IS the essential nature of {domain}?\n\n\
             Focus on understanding the fundamental ontology. What makes something part of this domain? \
             What are the essential properties and relationships?"
        ),
        1 => format!(
            "🏗️ **Systems Design - Pass 1**: What are the universal characteristics of {domain}?\n\n\
             Explore: Purpose, stakeholders, constraints, concepts, ontology. What exists in this domain universally?"
        ),
        2 => format!(
            "🏛️ **Systems Architecture - Pass 1**: What are the essential functions and structures in {domain}?\n\n\
             Identify natural groupings, relationships, and patterns that exist conceptually in this domain."
        ),
        3 => format!(
            "📝 **DSL - Pass 1**: What concepts and vocabulary exist naturally in {domain}?\n\n\
             Define the core concepts, relationships, and operations that are inherent to this domain."
        ),
        4 => format!(
            "🌐 **Topology - Pass 1**: What entities and relationships form the natural structure of {domain}?\n\n\
             Map the network of concepts and how they connect in this domain."
        ),
        5 => format!(
            "⚙️ **Engineered System - Pass 1**: What would constitute a complete instance of {domain}?\n\n\
             Describe what a fully realized example would look like conceptually."
        ),
        6 => format!(
            "🔄 **Feedback Loop - Pass 1**: How does {domain} naturally evolve and improve?\n\n\
             Understand the inherent learning and adaptation patterns in this domain."
        ),
        _ => return None,
    };
    Some(prompt)
}

/// Pass 2: how to build a system that MAKES instances
fn generally_reify_prompt(phase: u32, domain: &str) -> Option<String> {
    let prompt = match phase {
        0 => format!(
            "🎯 **Abstract Goal - Pass 2**: Create a system that can generate {domain} instances.\n\n\
             Define the goal of building a generator/framework that can create instances of what you understood in Pass 1."
        ),
        1 => format!(
            "🏗️ **Systems Design - Pass 2**: What does our {domain} generation system need?\n\n\
             Design requirements for a system that can create instances. Consider stakeholders, constraints, success metrics."
        ),
        2 => format!(
            "🏛️ **Systems Architecture - Pass 2**: How do components work together to generate {domain}?\n\n\
             Design the architecture: modules, interfaces, data flow, control flow for your generation system."
        ),
        3 => format!(
            "📝 **DSL - Pass 2**: What vocabulary does our {domain} system use internally?\n\n\
             Define the system's internal language, APIs, data structures, and operations."
        ),
        4 => "🌐 **Topology - Pass 2**: How are system components connected?\n\n\
              Map the network of services, APIs, data flows in your generation system."
            .to_string(),
        5 => format!(
            "⚙️ **Engineered System - Pass 2**: Build and deploy the {domain} generation system.\n\n\
             Implement, test, and deploy your system that can create instances."
        ),
        6 => format!(
            "🔄 **Feedback Loop - Pass 2**: How does the {domain} system learn and improve?\n\n\
             Implement monitoring, learning, and evolution for your generation system."
        ),
        _ => return None,
    };
    Some(prompt)
}

/// Pass 3: make THIS instance
fn specifically_reify_prompt(phase: u32, domain: &str) -> Option<String> {
    let prompt = match phase {
        0 => format!(
            "🎯 **Abstract Goal - Pass 3**: Generate this specific {domain} instance.\n\n\
             Define the specific instance you want to create using your system."
        ),
        1 => format!(
            "🏗️ **Systems Design - Pass 3**: What does this specific {domain} instance need?\n\n\
             Specify requirements, constraints, and success criteria for this particular instance."
        ),
        2 => format!(
            "🏛️ **Systems Architecture - Pass 3**: How is this specific {domain} instance configured?\n\n\
             Configure your system architecture for this specific use case."
        ),
        3 => format!(
            "📝 **DSL - Pass 3**: How do we express this specific {domain} instance?\n\n\
             Define the specific configuration, parameters, and expressions for this instance."
        ),
        4 => format!(
            "🌐 **Topology - Pass 3**: What are the specific connections for this {domain} instance?\n\n\
             Map the specific data flows, connections, and network for this instance."
        ),
        5 => format!(
            "⚙️ **Engineered System - Pass 3**: Create and deploy this specific {domain} instance.\n\n\
             Actually generate, configure, and deploy your specific instance."
        ),
        6 => format!(
            "🔄 **Feedback Loop - Pass 3**: How does this specific {domain} instance perform?\n\n\
             Monitor, evaluate, and improve this specific instance based on its performance."
        ),
        _ => return None,
    };
    Some(prompt)
}

/// Workflow-notation definition of a phase and its sub-steps
pub fn phase_definition(phase: u32) -> String {
    let definition = match phase {
        0 => "(0)[AbstractGoal]",
        1 => "(1)[SystemsDesign→(1a)[PurposeCapture]→(1b)[ContextMap]→(1c)[StakeholderGoals]→(1d)[SuccessMetrics]→(1e)[ConstraintScan]→(1f)[ResourceLimits]→(1g)[RegulatoryBounds]→(1h)[RiskAssumptions]→(1i)[ConceptModel]→(1j)[OntologySketch]→(1k)[BoundarySet]→(1l)[DesignBrief]]",
        2 => "(2)[SystemsArchitecture→(2a)[FunctionDecomposition]→(2b)[ModuleGrouping]→(2c)[InterfaceDefinition]→(2d)[LayerStack]→(2e)[ControlFlow]→(2f)[DataFlow]→(2g)[RedundancyPlan]→(2h)[ArchitectureSpec]]",
        3 => "(3)[DSL→(3a)[ConceptTokenize]→(3b)[SyntaxDefine]→(3c)[SemanticRules]→(3d)[OperatorSet]→(3e)[ValidationTests]→(3f)[DSLSpec]]",
        4 => "(4)[Topology→(4a)[NodeIdentify]→(4b)[EdgeMapping]→(4c)[FlowWeights]→(4d)[GraphBuild]→(4e)[Simulation]→(4f)[LoadBalance]→(4g)[TopologyMap]]",
        5 => "(5)[EngineeredSystem→(5a)[ResourceAllocate]→(5b)[PrototypeBuild]→(5c)[IntegrationTest]→(5d)[Deploy]→(5e)[Monitor]→(5f)[StressTest]→(5g)[OperationalSystem]]",
        6 => "(6)[FeedbackLoop→(6a)[TelemetryCapture]→(6b)[AnomalyDetection]→(6c)[DriftAnalysis]→(6d)[ConstraintRefit]→(6e)[DSLAdjust]→(6f)[ArchitecturePatch]→(6g)[TopologyRewire]→(6h)[Redeploy]→(6i)[GoalAlignmentCheck]]",
        n => return format!("Phase {}", n),
    };
    definition.to_string()
}

/// Instruction block for the journey's current position
pub fn instructions(state: &JourneyState) -> String {
    let pos = state.position();
    format!(
        r#"Current Position: {notation}
Domain: {domain}
Pass: {pass}
Phase: {phase_name}

Instructions:
Apply the 3-pass master prompt methodology to Phase {phase} ({phase_name})
with the mindset of {pass} for your domain: {domain}

Remember:
- Pass 1: Focus on understanding WHAT this domain IS (ontological)
- Pass 2: Focus on HOW to BUILD systems that create these things
- Pass 3: Focus on creating THIS specific instance

Use the complete workflow notation from the master prompt to guide your work
through this specific phase."#,
        notation = pos,
        domain = state.domain,
        pass = pos.pass_name(),
        phase = pos.phase,
        phase_name = pos.phase_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_every_table_entry_mentions_pass() {
        for pass_num in 1..=3 {
            for phase in 0..=6 {
                let prompt = lookup(pass_num, phase, "Chess");
                assert!(
                    prompt.contains(&format!("Pass {}", pass_num)),
                    "pass {} phase {}: {}",
                    pass_num,
                    phase,
                    prompt
                );
                assert!(!prompt.starts_with("Work on"));
            }
        }
    }

    #[test]
    fn test_domain_interpolated() {
        assert!(lookup(1, 0, "Autobiography").contains("essential nature of Autobiography"));
        assert!(lookup(3, 5, "Autobiography").contains("this specific Autobiography instance"));
    }

    #[test]
    fn test_unknown_phase_fallback() {
        assert_eq!(
            lookup(2, 9, "Chess"),
            "Work on Phase9 for Generally Reify (How MAKE) in domain: Chess"
        );
        assert_eq!(
            lookup(7, 3, "Chess"),
            "Work on DSL for Pass7 in domain: Chess"
        );
    }

    #[test]
    fn test_lookup_is_pure() {
        assert_eq!(lookup(2, 2, "X"), lookup(2, 2, "X"));
    }

    #[test]
    fn test_phase_definition() {
        assert!(phase_definition(3).starts_with("(3)[DSL"));
        assert!(phase_definition(6).ends_with("[GoalAlignmentCheck]]"));
        assert_eq!(phase_definition(8), "Phase 8");
    }

    #[test]
    fn test_instructions() {
        let mut state = JourneyState::new("Chess");
        state.set_position(Position::new(1, 2, 3));
        let text = instructions(&state);

        assert!(text.starts_with("Current Position: L1P2W[1](3)"));
        assert!(text.contains("Phase: DSL"));
        assert!(text.contains("Pass: Generally Reify (How MAKE)"));
        assert!(text.contains("for your domain: Chess"));
    }
}
