//! Command verifier
//!
//! Couples tokenization to the invariant chain and the final coherence
//! gate. Verification is pure: no I/O, no process, no observable side
//! effect beyond the returned tokens or the violation.

use crate::error::InvariantViolation;
use crate::invariant::{default_invariants, scan_metacharacters, Invariant};

/// Decides whether a raw command line may be executed.
#[derive(Debug, Clone)]
pub struct CommandVerifier {
    invariants: Vec<Invariant>,
}

impl CommandVerifier {
    /// Verifier with the default invariant chain.
    #[must_use]
    pub fn new() -> Self {
        Self { invariants: default_invariants() }
    }

    /// Verifier with an explicit ordered invariant chain.
    #[must_use]
    pub fn with_invariants(invariants: Vec<Invariant>) -> Self {
        Self { invariants }
    }

    /// Split a command line on shell-lexical rules.
    ///
    /// Quoted segments stay single tokens; redirection and glob
    /// characters are left as literal tokens, not interpreted. Empty
    /// input tokenizes to an empty sequence.
    ///
    /// # Errors
    /// Returns `InvariantViolation::Unparseable` when splitting fails
    /// (for example, an unbalanced quote): a command that cannot be
    /// tokenized cannot be proven flat.
    pub fn tokenize(command: &str) -> Result<Vec<String>, InvariantViolation> {
        shell_words::split(command).map_err(|err| InvariantViolation::Unparseable {
            reason: err.to_string(),
        })
    }

    /// Verify a command line, returning its tokens unchanged on success.
    ///
    /// The checks run in a fixed order: tokenize, reject empty input,
    /// apply each invariant in registration order (first violation wins,
    /// later rules are not evaluated), then the coherence-gate
    /// metacharacter pass over the rejoined tokens. No normalization or
    /// escaping is applied to the returned sequence.
    ///
    /// # Errors
    /// The first violation encountered, with its tagged kind.
    pub fn verify(&self, command: &str) -> Result<Vec<String>, InvariantViolation> {
        let tokens = Self::tokenize(command)?;
        tracing::debug!(?tokens, "verifying command");

        if tokens.is_empty() {
            return Err(InvariantViolation::EmptyCommand);
        }

        for invariant in &self.invariants {
            invariant.validate(&tokens)?;
        }

        // Coherence gate: what will execute must be a single literal
        // argv vector, so command chaining and piping are rejected here
        // even when no configured invariant covers them.
        scan_metacharacters(&tokens.join(" "))?;

        Ok(tokens)
    }
}

impl Default for CommandVerifier {
    fn default() -> Self {
        Self::new()
    }
}
