//! Responder module for EdCare
//!
//! A responder turns one accepted submission into the assistant's reply.
//! Every implementation here is simulated: canned phrase banks, a
//! subject-aware tutor, and a rule-based symptom checker. A real inference
//! backend only needs to implement [`Responder`] to slot into a session.

pub mod canned;
pub mod symptoms;
pub mod tutor;

pub use canned::CannedResponder;
pub use symptoms::{Symptom, SymptomResponder, SymptomSet};
pub use tutor::{AgeGroup, Subject, TutorResponder};

use crate::assistant_mode::AssistantMode;
use crate::config::Config;
use crate::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Reply strategy for a session
///
/// Implementations must be cheap to share across tasks; the session calls
/// `respond` from a background task once the simulated delay has elapsed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// Short name used in logs and status output
    fn name(&self) -> &'static str;

    /// Produces the reply for a submission
    ///
    /// # Arguments
    ///
    /// * `submission` - The user text that was accepted by the session
    ///
    /// # Errors
    ///
    /// Returns error if no reply can be produced
    async fn respond(&self, submission: &str) -> Result<String>;
}

/// Create the responder for an assistant mode
///
/// # Arguments
///
/// * `mode` - Which assistant answers
/// * `config` - Global configuration (seed, tutor defaults)
///
/// # Examples
///
/// ```
/// use edcare::assistant_mode::AssistantMode;
/// use edcare::config::Config;
/// use edcare::responders::create_responder;
///
/// let responder = create_responder(AssistantMode::Math, &Config::default());
/// assert_eq!(responder.name(), "math");
/// ```
pub fn create_responder(mode: AssistantMode, config: &Config) -> Arc<dyn Responder> {
    let seed = config.session.seed;
    match mode {
        AssistantMode::Chat => Arc::new(CannedResponder::chat(seed)),
        AssistantMode::Math => Arc::new(CannedResponder::math(seed)),
        AssistantMode::Education => Arc::new(CannedResponder::education(seed)),
        AssistantMode::Health => Arc::new(CannedResponder::health(seed)),
        AssistantMode::Tutor => Arc::new(TutorResponder::new(
            config.tutor.subject,
            config.tutor.age_group,
        )),
        AssistantMode::Symptoms => Arc::new(SymptomResponder),
    }
}

/// Random source for simulated output, reproducible when seeded
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
