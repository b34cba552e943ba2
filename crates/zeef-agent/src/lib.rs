//! Deterministic agent
//!
//! The only path by which a shell command reaches the operating system,
//! and the only path by which the substrate writes files:
//! - Every command passes the coherence gate first; a violation means no
//!   process is spawned and the ledger is untouched
//! - Verified commands run as a literal argv vector, never through a
//!   shell interpreter
//! - Every execution and file mutation is recorded in the ledger before
//!   the outcome is returned

pub mod error;
pub mod executor;
pub mod recorder;

pub use error::AgentError;
pub use executor::{CommandOutcome, DeterministicAgent};
pub use recorder::FileChange;
