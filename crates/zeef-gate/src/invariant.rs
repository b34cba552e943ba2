//! Safety invariants
//!
//! A closed set of tagged rule variants dispatched through one
//! `validate` entry point. The verifier owns an explicit ordered list of
//! these; order decides which violation is reported first.

use crate::error::InvariantViolation;

/// Shell control sequences banned by the coherence gate, longest first
/// so `&&` is reported as `&&` and not as its `&` prefix.
pub const METACHARACTERS: [&str; 5] = ["&&", "||", "|", "&", ";"];

/// Default forbidden token set: destructive or host-level commands.
const DEFAULT_FORBIDDEN_TOKENS: [&str; 5] = ["rm", "rm -rf", "shutdown", "reboot", "format"];

/// One pass/fail safety rule applied to a tokenized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invariant {
    /// Reject when any token case-insensitively matches the set
    ForbiddenTokens(Vec<String>),
    /// Reject when the rejoined command contains a shell control character
    Metacharacters,
}

impl Invariant {
    /// Check the rule against a token sequence.
    ///
    /// # Errors
    /// Returns the violation when the rule's condition holds.
    pub fn validate(&self, tokens: &[String]) -> Result<(), InvariantViolation> {
        match self {
            Invariant::ForbiddenTokens(forbidden) => {
                let lowered: Vec<String> =
                    tokens.iter().map(|t| t.to_lowercase()).collect();
                for candidate in forbidden {
                    if lowered.iter().any(|t| t == &candidate.to_lowercase()) {
                        return Err(InvariantViolation::ForbiddenToken {
                            token: candidate.clone(),
                        });
                    }
                }
                Ok(())
            }
            Invariant::Metacharacters => scan_metacharacters(&tokens.join(" ")),
        }
    }
}

/// Reject `joined` if it contains any banned control sequence.
pub(crate) fn scan_metacharacters(joined: &str) -> Result<(), InvariantViolation> {
    for symbol in METACHARACTERS {
        if joined.contains(symbol) {
            return Err(InvariantViolation::Metacharacter {
                symbol: symbol.to_string(),
            });
        }
    }
    Ok(())
}

/// The default invariant chain: the forbidden-token blacklist.
///
/// The metacharacter ban is not part of this list; the verifier applies
/// it unconditionally as its final coherence-gate pass.
#[must_use]
pub fn default_invariants() -> Vec<Invariant> {
    vec![Invariant::ForbiddenTokens(
        DEFAULT_FORBIDDEN_TOKENS.iter().map(ToString::to_string).collect(),
    )]
}
