use std::io;

/// Errors raised by ledger persistence.
///
/// An append failure is fatal to the operation that triggered it: the
/// ledger's completeness is the system's core correctness property, so
/// a write that cannot be proven durable is surfaced, never absorbed.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The ledger file or its directory could not be created or written
    #[error("ledger i/o failed: {0}")]
    Io(#[from] io::Error),

    /// An event could not be serialized to a ledger line
    #[error("ledger serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
