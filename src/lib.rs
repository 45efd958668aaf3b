//! # statehub
//!
//! Modular application state container.
//!
//! statehub composes independent state modules into a single
//! process-wide store. Each module owns its own state, mutation
//! operations, and derived values; the store exposes the union of its
//! modules' state under their registered names.
//!
//! ## Modules
//!
//! - **session**: user accounts and authenticated sessions with salted
//!   PBKDF2 password hashing, role-tagged users, session expiry with
//!   lazy purge, login/logout
//! - **drawer**: navigation drawer UI state
//!
//! ## Quick Start
//!
//! ```
//! use statehub::AppStore;
//!
//! let store = AppStore::global();
//!
//! store.drawer.update(|drawer| drawer.toggle())?;
//!
//! let state = store.state();
//! assert!(state["drawer"]["open"].is_boolean());
//! assert_eq!(store.namespaces(), ["session", "drawer"]);
//! # Ok::<(), statehub::StatehubError>(())
//! ```

pub mod config;
pub mod drawer;
pub mod error;
pub mod logging;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use drawer::DrawerState;
pub use error::{Result, StatehubError};
pub use session::{Role, Session, SessionId, SessionState, User};
pub use store::{activate, compose_state, AppStore, ModuleCell, ModuleHandle, StateModule, WeakCell};
