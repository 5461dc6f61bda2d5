//! Camera-based emotion detection
//!
//! Classification is simulated: the detector waits a processing delay,
//! ignores the frame content, and reports a random emotion with a random
//! confidence. The frame source still has to produce a frame, so camera
//! failures surface the same way they would with a real model.

use crate::config::EmotionConfig;
use crate::error::{EdcareError, Result};
use crate::responders::seeded_rng;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Message shown when the camera can not be opened
pub const CAMERA_UNAVAILABLE: &str =
    "Could not access camera. Please check permissions and try again.";

/// Recommendation shown when no emotion has been detected
pub const NO_EMOTION_RECOMMENDATION: &str =
    "No emotion detected. Try again when the child's face is clearly visible.";

/// Emotion reported by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Neutral,
    Tired,
    Excited,
}

impl Emotion {
    /// All emotions the detector can report
    pub const ALL: [Emotion; 5] = [
        Self::Happy,
        Self::Sad,
        Self::Neutral,
        Self::Tired,
        Self::Excited,
    ];

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
            Self::Tired => "tired",
            Self::Excited => "excited",
        }
    }

    /// Suggested activity for a child showing this emotion
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Happy => "Child appears happy. Great time for learning activities!",
            Self::Sad => {
                "Child seems sad. Consider engaging in fun activities or offering comfort."
            }
            Self::Neutral => "Child appears neutral. Good time for routine activities.",
            Self::Tired => "Child looks tired. Consider a rest period or nap time.",
            Self::Excited => {
                "Child is excited. Channel this energy into physical or creative activities."
            }
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detector output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmotionReading {
    /// Detected emotion
    pub emotion: Emotion,
    /// Confidence percentage
    pub confidence: u8,
}

impl EmotionReading {
    /// Recommendation for the detected emotion
    pub fn recommendation(&self) -> &'static str {
        self.emotion.recommendation()
    }
}

/// A still frame captured from the camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    /// Wraps raw frame bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Raw frame bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Camera abstraction: "give me a still frame"
pub trait FrameSource: Send {
    /// Captures one frame
    ///
    /// # Errors
    ///
    /// Returns a capture error if the camera is unavailable
    fn capture_frame(&mut self) -> Result<Frame>;
}

/// Frame source backed by an image file
#[derive(Debug, Clone)]
pub struct StillImageSource {
    path: PathBuf,
}

impl StillImageSource {
    /// Creates a source that reads `path` on every capture
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FrameSource for StillImageSource {
    fn capture_frame(&mut self) -> Result<Frame> {
        let data = std::fs::read(&self.path).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Error accessing camera");
            EdcareError::Capture(CAMERA_UNAVAILABLE.to_string())
        })?;
        if data.is_empty() {
            tracing::error!(path = %self.path.display(), "Captured frame is empty");
            return Err(EdcareError::Capture(CAMERA_UNAVAILABLE.to_string()).into());
        }
        Ok(Frame::new(data))
    }
}

/// Emotion classifier
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    /// Classifies the emotion shown in a frame
    async fn detect(&self, frame: &Frame) -> Result<EmotionReading>;
}

/// Detector that picks an emotion at random
pub struct RandomEmotionDetector {
    processing_delay: Duration,
    min_confidence: u8,
    max_confidence: u8,
    rng: Mutex<StdRng>,
}

impl RandomEmotionDetector {
    /// Creates a detector from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Delay and confidence bounds
    /// * `seed` - Optional seed for reproducible readings
    pub fn from_config(config: &EmotionConfig, seed: Option<u64>) -> Self {
        Self {
            processing_delay: Duration::from_millis(config.processing_delay_ms),
            min_confidence: config.min_confidence.min(config.max_confidence),
            max_confidence: config.max_confidence,
            rng: Mutex::new(seeded_rng(seed)),
        }
    }
}

#[async_trait]
impl EmotionDetector for RandomEmotionDetector {
    async fn detect(&self, frame: &Frame) -> Result<EmotionReading> {
        tracing::debug!(frame_bytes = frame.data().len(), "Analyzing frame");
        tokio::time::sleep(self.processing_delay).await;

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| EdcareError::Responder("random source lock poisoned".to_string()))?;
        let emotion = *Emotion::ALL
            .choose(&mut *rng)
            .ok_or_else(|| EdcareError::Responder("no emotions to choose from".to_string()))?;
        let confidence = rng.random_range(self.min_confidence..=self.max_confidence);

        tracing::info!(%emotion, confidence, "Emotion detected");
        Ok(EmotionReading {
            emotion,
            confidence,
        })
    }
}

/// Captures a frame and classifies it
///
/// # Errors
///
/// Returns the capture error if no frame could be taken
pub async fn detect_from_source(
    source: &mut dyn FrameSource,
    detector: &dyn EmotionDetector,
) -> Result<EmotionReading> {
    let frame = source.capture_frame()?;
    detector.detect(&frame).await
}
