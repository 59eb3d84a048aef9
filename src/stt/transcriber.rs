//! The transcriber seam: trait, result types and a mock for tests.

use crate::error::{ClipscribeError, Result};

/// A timestamped span of transcript text.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start offset in seconds, non-negative.
    pub start: f64,
    /// End offset in seconds, never before `start`.
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A structured transcription result.
///
/// `segments` is empty when the model produced no timing data; that is a
/// valid result, not an error. When present, segments are ordered by
/// non-decreasing start time and concatenate to (approximately) `text`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript {
    /// The full transcript, trimmed of leading/trailing whitespace.
    pub text: String,
    /// Detected or forced language code, empty if unknown.
    pub language: String,
    pub segments: Vec<Segment>,
}

/// Trait for speech-to-text transcription.
///
/// Allows swapping implementations (real Whisper vs mock).
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to a structured transcript.
    ///
    /// # Arguments
    /// * `audio` - Audio samples as 16-bit PCM at 16kHz mono
    fn transcribe(&self, audio: &[i16]) -> Result<Transcript>;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the transcriber is ready
    fn is_ready(&self) -> bool;
}

/// Mock transcriber for testing.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    segments: Vec<Segment>,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            segments: Vec::new(),
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific transcript text
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to return timestamped segments
    pub fn with_segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments = segments;
        self
    }

    /// Configure the mock to fail on transcribe
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<Transcript> {
        if self.should_fail {
            return Err(ClipscribeError::Transcription {
                message: "mock transcription failure".to_string(),
            });
        }
        Ok(Transcript {
            text: self.response.trim().to_string(),
            language: "en".to_string(),
            segments: self.segments.clone(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        !self.should_fail
    }
}
