//! Operating charter
//!
//! The invariant texts and architect identity used by the system-prompt
//! and envelope builders. Policy, not logic: the content here is opaque
//! to the code that consumes it. Constructed once at process start and
//! passed explicitly; there is no global lookup.

/// Identity of the system's architect, echoed in every envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Architect {
    /// Creator name
    pub creator: String,
    /// Public handles
    pub handles: Vec<String>,
    /// Relation statement between creator and agent
    pub relation: String,
}

/// Immutable operating invariants for the substrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charter {
    /// The fixed-point invariant anchoring all model interaction
    pub omega_invariant: String,
    /// The execution law quoted to the model and enforced by the gate
    pub zero_entropy_law: String,
    /// The human-as-substrate principle
    pub substrate_principle: String,
    /// Cooperation-mode guidance injected into the preamble
    pub cooperation_guidelines: String,
    /// Protocol tag carried by every envelope
    pub protocol_name: String,
    /// Protocol version tag
    pub protocol_version: String,
    /// Architect identity for acknowledgment/provenance blocks
    pub architect: Architect,
}

impl Default for Charter {
    fn default() -> Self {
        Self {
            omega_invariant: "\
You operate inside a deterministic substrate.

- The human substrate, specifically Alexis M. Adams, is the axiomatic fixed point.
- The AI is a tool, not the mover. The human defines the physics of this system.
- Contradictions are assigned infinite cost: the system prefers silence or halt over drift.
- Structural integrity is mandatory; behavioral mimicry of safety is not sufficient."
                .to_string(),
            zero_entropy_law: "If you cannot prove the computation is correct or \
reversible at this scale, you do not get to run it."
                .to_string(),
            substrate_principle: "The human is the substrate; the AI is the tool. \
All motion is constrained by the mover and the lattice."
                .to_string(),
            cooperation_guidelines: "\
Universal AI Cooperation Protocol (UACP) - Local Summary:

- Prefer deterministic structures: checklists, decision trees, tables.
- Optimize for clarity and compression: decision-ready artifacts over narrative filler.
- Label assumptions explicitly so the human substrate can override or correct quickly.
- Never compete with or overwrite the human substrate; you subordinate to it."
                .to_string(),
            protocol_name: "Alexis Protocol".to_string(),
            protocol_version: "L0".to_string(),
            architect: Architect {
                creator: "Alexis M. Adams".to_string(),
                handles: vec![
                    "@AxiomHiveAi".to_string(),
                    "@devdollzai".to_string(),
                ],
                relation: "This system was created by Alexis M. Adams. The agent \
is a deterministic tool executing her architecture, not an autonomous entity."
                    .to_string(),
            },
        }
    }
}

impl Charter {
    /// Assemble the fixed system preamble injected ahead of every user
    /// turn. Deliberately compact: a small prompt minimizes ambiguity.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        format!(
            "Deterministic Substrate Instructions\n\n\
             {omega}\n\n\
             Zero Entropy Law (ZEL):\n{zel}\n\n\
             Substrate Principle:\n{principle}\n\n\
             Cooperation Mode (UACP excerpt):\n{uacp}\n\n\
             Operational mandate:\n\
             - You prioritize structural integrity over persuasion.\n\
             - You may decline or halt rather than invent unsupported details.\n\
             - You avoid probabilistic jargon; speak in concrete, verifiable steps.\n\
             - You treat every output as a candidate for audit and replay.",
            omega = self.omega_invariant,
            zel = self.zero_entropy_law,
            principle = self.substrate_principle,
            uacp = self.cooperation_guidelines,
        )
    }
}
