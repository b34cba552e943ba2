//! Ledger event types
//!
//! A [`LedgerEvent`] is immutable once appended. The closed [`EventKind`]
//! enumeration is extended only by adding a variant; existing variants and
//! payload shapes never change, so every historical line stays parseable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of event kinds recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A shell command reached the host via the guarded executor
    Command,
    /// A file was written through the mutation recorder
    FileChange,
    /// A model completion passed through the law-guarded chokepoint
    KernelCall,
}

/// One immutable ledger record.
///
/// Fields are declared in alphabetical order and the payload is a
/// `BTreeMap`, so the serialized line carries fully sorted keys and is
/// byte-reproducible across implementations. Parsers must not depend on
/// key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Which kind of event this line records
    pub kind: EventKind,
    /// Kind-specific key/value payload
    pub payload: BTreeMap<String, serde_json::Value>,
    /// ISO-8601 UTC creation time, non-decreasing in append order
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn serialized_line_has_sorted_keys() {
        let mut payload = BTreeMap::new();
        payload.insert("cwd".to_string(), Value::from("/tmp"));
        payload.insert("command".to_string(), Value::from("ls"));
        payload.insert("exit_code".to_string(), Value::from(0));

        let event = LedgerEvent {
            kind: EventKind::Command,
            payload,
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        };

        let line = serde_json::to_string(&event).unwrap();
        assert_eq!(
            line,
            "{\"kind\":\"command\",\"payload\":{\"command\":\"ls\",\"cwd\":\"/tmp\",\
             \"exit_code\":0},\"timestamp\":\"2026-01-01T00:00:00+00:00\"}"
        );
    }

    #[test]
    fn kind_round_trips_through_wire_names() {
        for (kind, wire) in [
            (EventKind::Command, "\"command\""),
            (EventKind::FileChange, "\"file_change\""),
            (EventKind::KernelCall, "\"kernel_call\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), wire);
            assert_eq!(serde_json::from_str::<EventKind>(wire).unwrap(), kind);
        }
    }
}
