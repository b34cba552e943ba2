use zeef_ledger::LedgerError;

/// Errors raised by the inference kernel.
///
/// A failed model call surfaces to the caller; no retry is attempted.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// The HTTP layer failed (connection, non-2xx status, body read)
    #[error("kernel transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("kernel request timed out")]
    Timeout,

    /// The response did not contain the expected completion field
    #[error("kernel response shape mismatch: {0}")]
    Schema(String),
}

/// Errors raised by the law-guarded completion chokepoint.
#[derive(Debug, thiserror::Error)]
pub enum LawError {
    /// The model call failed
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// The exchange could not be recorded in the ledger
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
