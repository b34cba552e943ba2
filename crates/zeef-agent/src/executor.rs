//! Guarded executor
//!
//! # Critical Invariant
//!
//! Verification failure implies zero side effects: no process spawns and
//! the ledger is untouched. Conversely, once a process has run, the
//! command is recorded unconditionally; a non-zero exit is failure of
//! the command, not of the recording.

use crate::error::AgentError;
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;
use zeef_gate::{CommandVerifier, InvariantViolation};
use zeef_ledger::Ledger;

/// Transient result of one command execution.
///
/// Not persisted directly; only the derived summary (command text,
/// working directory, exit code) reaches the ledger.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Process exit code; `None` when terminated without one
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Agent that only executes commands after invariant verification.
pub struct DeterministicAgent {
    ledger: Arc<Ledger>,
    verifier: CommandVerifier,
}

impl DeterministicAgent {
    /// Agent with the default invariant chain.
    #[must_use]
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger, verifier: CommandVerifier::new() }
    }

    /// Agent with an explicit verifier.
    #[must_use]
    pub fn with_verifier(ledger: Arc<Ledger>, verifier: CommandVerifier) -> Self {
        Self { ledger, verifier }
    }

    /// The ledger this agent records into.
    #[must_use]
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Verify a command without executing it.
    ///
    /// # Errors
    /// The first invariant violation, if any.
    pub fn verify_command(&self, command: &str) -> Result<Vec<String>, InvariantViolation> {
        self.verifier.verify(command)
    }

    /// Execute a verified command in `cwd` and record it in the ledger.
    ///
    /// The token vector is spawned directly as argv, never through a
    /// shell interpreter. Stdout and stderr are captured as text.
    ///
    /// # Errors
    /// - `AgentError::Violation` - verification failed; nothing ran and
    ///   the ledger is untouched
    /// - `AgentError::Spawn` - the process could not be started; no
    ///   ledger entry is written
    /// - `AgentError::Ledger` - the command ran but could not be
    ///   recorded; the operation fails rather than hide the gap
    pub async fn execute_command(
        &self,
        command: &str,
        cwd: &Path,
    ) -> Result<CommandOutcome, AgentError> {
        let tokens = self.verifier.verify(command)?;
        let Some((program, args)) = tokens.split_first() else {
            return Err(InvariantViolation::EmptyCommand.into());
        };

        tracing::info!(%command, cwd = %cwd.display(), "executing verified command");
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(AgentError::Spawn)?;

        let outcome = CommandOutcome {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        self.ledger.record_command(
            command,
            &cwd.display().to_string(),
            outcome.exit_code.map(i64::from),
        )?;

        tracing::debug!(exit_code = ?outcome.exit_code, "command completed");
        Ok(outcome)
    }
}
