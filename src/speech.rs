//! Speech-to-text input path
//!
//! A [`SpeechRecognizer`] emits interim transcripts while the user speaks and
//! one final transcript when they stop. [`listen_once`] drives a single
//! dictation and hands only the final transcript to the session's
//! [`InputCoordinator`].

use crate::error::{EdcareError, Result};
use crate::session::{InputCoordinator, SubmitOutcome};
use async_trait::async_trait;
use std::time::Duration;

/// Text produced by speech recognition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    /// Partial result that may still change; never submitted
    Interim(String),
    /// Authoritative result for the utterance
    Final(String),
}

impl Transcript {
    /// Transcript text
    pub fn text(&self) -> &str {
        match self {
            Self::Interim(text) | Self::Final(text) => text,
        }
    }

    /// True for the authoritative transcript
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final(_))
    }
}

/// Microphone capture with speech recognition
#[async_trait]
pub trait SpeechRecognizer: Send {
    /// Starts listening
    ///
    /// # Errors
    ///
    /// Returns a capture error if the microphone is unavailable or
    /// recognition is already running
    async fn start(&mut self) -> Result<()>;

    /// Stops listening; a no-op when not listening
    async fn stop(&mut self);

    /// Next transcript, or None once the utterance is over
    async fn next_transcript(&mut self) -> Option<Transcript>;

    /// True between `start` and `stop`
    fn is_listening(&self) -> bool;
}

/// Recognizer that "hears" a fixed utterance
///
/// Emits one interim transcript per word, growing the phrase each time, then
/// the whole utterance as the final transcript.
#[derive(Debug, Clone)]
pub struct DictationRecognizer {
    words: Vec<String>,
    emitted: usize,
    listening: bool,
    word_interval: Duration,
}

impl DictationRecognizer {
    /// Creates a recognizer for an utterance
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::speech::DictationRecognizer;
    ///
    /// let recognizer = DictationRecognizer::new("how do plants grow");
    /// assert!(!edcare::speech::SpeechRecognizer::is_listening(&recognizer));
    /// ```
    pub fn new(utterance: &str) -> Self {
        Self {
            words: utterance.split_whitespace().map(str::to_string).collect(),
            emitted: 0,
            listening: false,
            word_interval: Duration::ZERO,
        }
    }

    /// Simulated speaking pace between transcripts
    pub fn with_word_interval(mut self, interval: Duration) -> Self {
        self.word_interval = interval;
        self
    }
}

#[async_trait]
impl SpeechRecognizer for DictationRecognizer {
    async fn start(&mut self) -> Result<()> {
        if self.listening {
            return Err(EdcareError::Speech("recognition already started".to_string()).into());
        }
        self.listening = true;
        self.emitted = 0;
        tracing::debug!(words = self.words.len(), "Dictation started");
        Ok(())
    }

    async fn stop(&mut self) {
        if self.listening {
            tracing::debug!("Dictation stopped");
        }
        self.listening = false;
    }

    async fn next_transcript(&mut self) -> Option<Transcript> {
        if !self.listening || self.emitted >= self.words.len() {
            return None;
        }

        if !self.word_interval.is_zero() {
            tokio::time::sleep(self.word_interval).await;
        }

        self.emitted += 1;
        let heard = self.words[..self.emitted].join(" ");
        if self.emitted == self.words.len() {
            Some(Transcript::Final(heard))
        } else {
            Some(Transcript::Interim(heard))
        }
    }

    fn is_listening(&self) -> bool {
        self.listening
    }
}

/// Listens for one utterance and submits its final transcript
///
/// Does not start the microphone while the session is busy. Interim
/// transcripts are passed to `on_interim` for display only.
///
/// # Returns
///
/// `Some(outcome)` for the submission (or `Some(Busy)` if listening was
/// refused), `None` if recognition ended without a final transcript
///
/// # Errors
///
/// Returns error if the recognizer cannot start
pub async fn listen_once<F>(
    recognizer: &mut dyn SpeechRecognizer,
    coordinator: &mut InputCoordinator,
    mut on_interim: F,
) -> Result<Option<SubmitOutcome>>
where
    F: FnMut(&str) + Send,
{
    if coordinator.store().is_busy() {
        tracing::debug!("Microphone disabled while a reply is pending");
        return Ok(Some(SubmitOutcome::Busy));
    }

    recognizer.start().await?;

    while let Some(transcript) = recognizer.next_transcript().await {
        if transcript.is_final() {
            recognizer.stop().await;
            return Ok(coordinator.on_transcript(transcript));
        }
        on_interim(transcript.text());
        coordinator.on_transcript(transcript);
    }

    recognizer.stop().await;
    tracing::debug!("Recognition ended without a final transcript");
    Ok(None)
}
