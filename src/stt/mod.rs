//! Transcription execution: trait, device selection, model cache and the
//! Whisper implementation.

pub mod cache;
pub mod device;
pub mod engine;
pub mod transcriber;
pub mod whisper;

pub use cache::ModelCache;
pub use device::{ComputeHint, Device};
pub use engine::{FixedLoader, TranscriberLoader, TranscriptionEngine, TranscriptionRequest};
pub use transcriber::{MockTranscriber, Segment, Transcriber, Transcript};
pub use whisper::{WhisperConfig, WhisperLoader, WhisperTranscriber};
