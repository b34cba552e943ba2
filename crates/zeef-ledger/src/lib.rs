//! Zero Entropy Ledger
//!
//! Durable, append-only persistence for everything the substrate does:
//! - Shell commands (with working directory and exit code)
//! - File mutations (before/after content digests)
//! - Kernel calls (prompt/response digests, never verbatim content)
//!
//! Events are appended as JSON Lines with fully sorted keys. No data is
//! discarded and no existing byte is ever rewritten. The ledger file is
//! the single source of narrative state.

pub mod digest;
pub mod error;
pub mod event;
pub mod store;

pub use digest::sha256_hex;
pub use error::LedgerError;
pub use event::{EventKind, LedgerEvent};
pub use store::{Ledger, LedgerConfig, DEFAULT_LEDGER_FILENAME};
