//! Input coordination for a chat session
//!
//! Typed text and final speech transcripts both end up in [`InputCoordinator::submit`].
//! An accepted submission appends the user message, clears the draft, and
//! spawns the reply task. The reply task waits the simulated delay, asks the
//! responder, and appends the assistant message, unless the coordinator was
//! shut down or the session cleared first.

use super::store::SessionStore;
use crate::responders::Responder;
use crate::speech::Transcript;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Assistant reply used when a responder fails, so the session never stays busy
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't come up with an answer right now. Please try asking again.";

/// Result of a submission attempt
///
/// Rejections are silent no-ops for the session; the value only tells the
/// caller what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User message appended and a reply scheduled
    Accepted,
    /// Text was empty or whitespace only
    Empty,
    /// A reply is still outstanding
    Busy,
}

impl SubmitOutcome {
    /// True if the submission was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Merges input paths into one submission pathway for a session
pub struct InputCoordinator {
    store: SessionStore,
    responder: Arc<dyn Responder>,
    reply_delay: Duration,
    draft: String,
    shutdown: CancellationToken,
    pending: Option<JoinHandle<()>>,
}

impl InputCoordinator {
    /// Creates a coordinator bound to a session store
    ///
    /// # Arguments
    ///
    /// * `store` - The session this coordinator submits into
    /// * `responder` - Reply strategy
    /// * `reply_delay` - Simulated latency before the reply is produced
    pub fn new(store: SessionStore, responder: Arc<dyn Responder>, reply_delay: Duration) -> Self {
        Self {
            store,
            responder,
            reply_delay,
            draft: String::new(),
            shutdown: CancellationToken::new(),
            pending: None,
        }
    }

    /// The session store this coordinator writes to
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Name of the active responder
    pub fn responder_name(&self) -> &'static str {
        self.responder.name()
    }

    /// Simulated reply latency in use
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Swaps the responder and delay used for future submissions
    ///
    /// Refused while a reply is outstanding so the pending reply and the
    /// next one never come from different assistants.
    ///
    /// # Returns
    ///
    /// Returns true if the responder was replaced
    pub fn set_responder(&mut self, responder: Arc<dyn Responder>, reply_delay: Duration) -> bool {
        if self.store.is_busy() {
            return false;
        }
        tracing::debug!(
            from = self.responder.name(),
            to = responder.name(),
            "Responder switched"
        );
        self.responder = responder;
        self.reply_delay = reply_delay;
        true
    }

    /// Current contents of the text field
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the contents of the text field
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submits the text field
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.draft.clone();
        self.submit(&text)
    }

    /// Submits text from any input path
    ///
    /// Must be called from within a Tokio runtime; the reply is produced by
    /// a spawned task.
    ///
    /// # Arguments
    ///
    /// * `text` - The text to submit, appended as-is when accepted
    ///
    /// # Returns
    ///
    /// `Empty` for blank text, `Busy` while a reply is outstanding,
    /// otherwise `Accepted`
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            tracing::trace!("Ignoring empty submission");
            return SubmitOutcome::Empty;
        }

        let Some(epoch) = self.store.admit(text) else {
            tracing::debug!(session_id = %self.store.id(), "Submission rejected: reply pending");
            return SubmitOutcome::Busy;
        };

        self.draft.clear();
        tracing::debug!(
            session_id = %self.store.id(),
            responder = self.responder.name(),
            "Submission accepted"
        );
        self.schedule_reply(epoch, text.to_string());
        SubmitOutcome::Accepted
    }

    /// Handles a transcript from the speech path
    ///
    /// Interim transcripts never submit.
    ///
    /// # Returns
    ///
    /// None for interim transcripts, otherwise the submission outcome
    pub fn on_transcript(&mut self, transcript: Transcript) -> Option<SubmitOutcome> {
        match transcript {
            Transcript::Interim(partial) => {
                tracing::trace!(len = partial.len(), "Interim transcript ignored");
                None
            }
            Transcript::Final(text) => Some(self.submit(&text)),
        }
    }

    /// True while a reply task is still running
    pub fn has_pending_reply(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }

    /// Stops the coordinator, suppressing any pending reply
    ///
    /// The store is left untouched: a reply that was pending is never
    /// appended, and the busy flag stays set until [`SessionStore::clear`].
    pub async fn shutdown(&mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Reply task failed");
            }
        }
    }

    fn schedule_reply(&mut self, epoch: u64, submission: String) {
        let store = self.store.clone();
        let responder = Arc::clone(&self.responder);
        let delay = self.reply_delay;
        let cancel = self.shutdown.child_token();
        let span = tracing::info_span!(
            "reply",
            session_id = %self.store.id(),
            responder = responder.name()
        );

        let handle = tokio::spawn(
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!("Session torn down, reply suppressed");
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }

                let reply = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!("Session torn down, reply suppressed");
                        return;
                    }
                    reply = responder.respond(&submission) => reply,
                };

                let content = match reply {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!(error = %e, "Responder failed, sending fallback reply");
                        FALLBACK_REPLY.to_string()
                    }
                };

                if store.append_reply_if_epoch(epoch, content) {
                    tracing::debug!("Reply appended");
                }
            }
            .instrument(span),
        );

        self.pending = Some(handle);
    }
}

impl Drop for InputCoordinator {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
