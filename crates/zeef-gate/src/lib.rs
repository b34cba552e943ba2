//! Deterministic Coherence Gate
//!
//! Pure, side-effect-free verification applied to every shell command
//! before it may execute:
//! - Shell-lexical tokenization (quoted segments preserved, redirection
//!   and globbing left as literal tokens)
//! - An ordered chain of safety invariants (explicit blacklist, no
//!   whitelist)
//! - A final metacharacter pass that forces every accepted command to be
//!   a flat argv vector, never shell-interpreted
//!
//! A command that cannot be represented as a flat argv vector is halted
//! rather than approximated.

pub mod error;
pub mod invariant;
pub mod verifier;

pub use error::InvariantViolation;
pub use invariant::{default_invariants, Invariant, METACHARACTERS};
pub use verifier::CommandVerifier;
