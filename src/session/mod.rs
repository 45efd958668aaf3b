//! Session state module.
//!
//! Owns the user registry, live authenticated sessions, and the current
//! login. Sessions expire after a configurable lifetime and are purged
//! lazily on access.

mod id;
mod state;
mod user;

pub use id::SessionId;
pub use state::{Session, SessionState, DEFAULT_TTL_HOURS};
pub use user::{Role, User, DEFAULT_KDF_ROUNDS};
