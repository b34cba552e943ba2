use std::io;
use zeef_gate::InvariantViolation;
use zeef_ledger::LedgerError;

/// Errors raised by the deterministic agent.
///
/// The variants keep the failure stages distinguishable: a violation
/// happens before any side effect, a spawn failure happens before any
/// ledger entry, and a ledger failure means the command ran but could
/// not be durably recorded.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The command failed a safety rule; nothing was executed
    #[error(transparent)]
    Violation(#[from] InvariantViolation),

    /// The verified command could not be spawned; no ledger entry exists
    #[error("failed to spawn verified command: {0}")]
    Spawn(io::Error),

    /// The ledger rejected the record; the triggering operation fails
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A file read or write outside the ledger failed
    #[error("file operation failed: {0}")]
    Io(#[from] io::Error),
}
