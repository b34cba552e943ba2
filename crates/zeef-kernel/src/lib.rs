//! Inference kernel and law layer
//!
//! The deterministic substrate for all language-model interaction:
//! - [`Kernel`] speaks HTTP to a locally running inference endpoint and
//!   never sends data off the host
//! - [`Charter`] carries the operating invariants and architect identity
//!   as immutable configuration, passed explicitly to whoever needs it
//! - [`Envelope`] wraps every raw completion in acknowledgment and
//!   provenance metadata with a structural self-check
//! - [`law_guarded_completion`] is the single chokepoint through which a
//!   natural-language request reaches the model and returns, recording a
//!   hash-only trace of the exchange in the ledger

pub mod charter;
pub mod client;
pub mod envelope;
pub mod error;
pub mod law;

pub use charter::{Architect, Charter};
pub use client::{ChatMessage, Kernel, KernelConfig};
pub use envelope::{CompletionPayload, Envelope, EnvelopeStatus};
pub use error::{KernelError, LawError};
pub use law::law_guarded_completion;
