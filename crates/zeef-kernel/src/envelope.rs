//! Protocol envelope
//!
//! Every completion leaving the law layer is wrapped in an envelope
//! carrying acknowledgment and provenance metadata. The wrap step checks
//! its own structure: an envelope missing either block reports `FAILED`
//! as a status value, not as an error, since that is a display-level
//! condition rather than a process fault.

use crate::charter::Charter;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Structural status of a wrapped completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeStatus {
    /// Both metadata blocks are present
    #[serde(rename = "OK")]
    Ok,
    /// A required metadata block is missing
    #[serde(rename = "FAILED")]
    Failed,
}

impl std::fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeStatus::Ok => write!(f, "OK"),
            EnvelopeStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Protocol tag on the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    /// Protocol name
    pub name: String,
    /// Protocol version
    pub version: String,
}

/// The raw model text being wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPayload {
    /// Unmodified completion text
    pub text: String,
}

/// Acknowledgment block naming the architect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// Creator name
    pub creator: String,
    /// Public handles
    pub handles: Vec<String>,
    /// Relation statement
    pub relation: String,
    /// Wrap time, ISO-8601 UTC
    pub timestamp: String,
}

/// Reference to the creator inside the provenance block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRef {
    /// Creator name
    pub name: String,
    /// Public handles
    pub handles: Vec<String>,
}

/// Provenance block: who generated this output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Producing component
    pub generated_by: String,
    /// Whether the producer is the creator (always false for the agent)
    pub is_creator: bool,
    /// The creator this output subordinates to
    pub creator: CreatorRef,
    /// Wrap time, ISO-8601 UTC
    pub timestamp: String,
}

/// Response wrapper for a model completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Structural status; `FAILED` when a metadata block is absent
    pub status: EnvelopeStatus,
    /// Protocol tag
    pub protocol: Protocol,
    /// The wrapped completion
    pub payload: CompletionPayload,
    /// Acknowledgment block; required for `OK` status
    pub architect_acknowledgment: Option<Acknowledgment>,
    /// Provenance block; required for `OK` status
    pub provenance: Option<Provenance>,
}

impl Envelope {
    /// Wrap raw completion text under the charter's protocol.
    ///
    /// Attaches acknowledgment and provenance built from the charter,
    /// then runs the structural self-check.
    #[must_use]
    pub fn wrap(charter: &Charter, text: String) -> Self {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);
        let mut envelope = Self {
            status: EnvelopeStatus::Ok,
            protocol: Protocol {
                name: charter.protocol_name.clone(),
                version: charter.protocol_version.clone(),
            },
            payload: CompletionPayload { text },
            architect_acknowledgment: Some(Acknowledgment {
                creator: charter.architect.creator.clone(),
                handles: charter.architect.handles.clone(),
                relation: charter.architect.relation.clone(),
                timestamp: timestamp.clone(),
            }),
            provenance: Some(Provenance {
                generated_by: "agent_instance".to_string(),
                is_creator: false,
                creator: CreatorRef {
                    name: charter.architect.creator.clone(),
                    handles: charter.architect.handles.clone(),
                },
                timestamp,
            }),
        };
        envelope.enforce_integrity();
        envelope
    }

    /// Re-run the structural self-check, downgrading status to `FAILED`
    /// when either metadata block is absent.
    pub fn enforce_integrity(&mut self) {
        if self.architect_acknowledgment.is_none() || self.provenance.is_none() {
            self.status = EnvelopeStatus::Failed;
        }
    }
}
