//! Chat session core
//!
//! - `store`: ordered messages and the busy flag, observable by the front end
//! - `coordinator`: single submission pathway and the delayed reply task

pub mod coordinator;
pub mod store;

pub use coordinator::{InputCoordinator, SubmitOutcome, FALLBACK_REPLY};
pub use store::{Message, Role, SessionState, SessionStore};
