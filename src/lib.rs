//! edcare - simulated learning and child-care assistants
//!
//! This library provides the chat session core shared by every assistant,
//! the simulated responders, the speech and camera input paths, and the
//! configuration that ties them together.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Session store (messages + busy flag) and input coordinator
//! - `responders`: Reply strategies (chat, math, tutor, guidance, symptoms)
//! - `speech`: Speech recognizer abstraction and dictation
//! - `emotion`: Camera frame source and emotion detector
//! - `assistant_mode`: Which assistant answers a session
//! - `config`: Configuration management and validation
//! - `logging`: Tracing subscriber setup
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Command handlers for the CLI
//!
//! # Example
//!
//! ```no_run
//! use edcare::{create_responder, AssistantMode, Config, InputCoordinator, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let store = SessionStore::new();
//!     let mode = AssistantMode::Chat;
//!     let mut coordinator = InputCoordinator::new(
//!         store.clone(),
//!         create_responder(mode, &config),
//!         mode.reply_delay(&config),
//!     );
//!
//!     coordinator.submit("hello");
//!     store.wait_until_idle().await;
//!     println!("{:?}", store.messages());
//!     Ok(())
//! }
//! ```

pub mod assistant_mode;
pub mod cli;
pub mod commands;
pub mod config;
pub mod emotion;
pub mod error;
pub mod logging;
pub mod responders;
pub mod session;
pub mod speech;

// Re-export commonly used types
pub use assistant_mode::AssistantMode;
pub use config::Config;
pub use error::{EdcareError, Result};
pub use responders::{create_responder, Responder};
pub use session::{InputCoordinator, Message, Role, SessionStore, SubmitOutcome};

#[cfg(test)]
pub mod test_utils;
