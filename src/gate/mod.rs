//! Session resolution and the per-request authentication gate.
//! Keep the public surface thin and split implementation across sub-modules.

mod context;
mod decision;
mod routes;
mod session;

pub use context::Identity;
pub use decision::{Decision, SessionGate};
pub use routes::{Access, RouteClassifier, RouteTable};
pub use session::{MemorySessionStore, Session, SessionStore, SessionToken};
