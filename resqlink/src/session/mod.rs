mod guard;
mod pacing;
mod store;
mod types;

pub use guard::{GuardDecision, guard};
pub use pacing::finish_no_earlier_than;
pub use store::SessionStore;
pub use types::{Identity, SessionState};
