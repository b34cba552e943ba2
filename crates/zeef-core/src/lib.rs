//! ZEEF session layer
//!
//! Routes raw operator input by a fixed lexical convention and drives
//! the guarded executor and the law-guarded completion chokepoint. The
//! session emits display events; rendering them is the consumer's
//! concern.

pub mod route;
pub mod session;

pub use route::{route_input, InputRoute};
pub use session::{DisplayEvent, Session, Turn};
