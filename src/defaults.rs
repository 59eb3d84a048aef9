//! Default configuration constants for clipscribe.
//!
//! Shared constants used across configuration, acquisition and delivery
//! to keep the different entry points consistent.

/// Audio sample rate expected by Whisper, in Hz.
///
/// All decoded media is resampled to 16kHz mono before inference.
pub const SAMPLE_RATE: u32 = 16000;

/// Media file extensions accepted from uploads and local paths.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mkv", "wav", "mp3", "m4a", "flac", "webm"];

/// Extension given to acquired temp files whose declared name carries no
/// recognized extension. The decoder probes content, so the placeholder
/// only affects the temp file name.
pub const FALLBACK_EXTENSION: &str = "bin";

/// Default Whisper model tier.
///
/// "base" matches the quality/speed tradeoff the interactive flows default to.
pub const DEFAULT_MODEL: &str = "base";

/// Default language code for transcription.
///
/// "auto" lets Whisper detect the spoken language automatically.
/// Set to a specific code (e.g., "en", "de") to force a language.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default transcript file name when no media base name is available.
pub const DEFAULT_TRANSCRIPT_NAME: &str = "transcript.txt";

/// Suffix appended to the media base name for derived transcript files.
pub const TRANSCRIPT_SUFFIX: &str = "_transcript.txt";

/// MIME type for delivered transcript streams.
pub const TRANSCRIPT_CONTENT_TYPE: &str = "text/plain";

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// Only one GPU backend can be active at a time; if none is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else {
        "CPU"
    }
}

/// Whether this build can run inference on a GPU at all.
pub fn gpu_compiled() -> bool {
    gpu_backend() != "CPU"
}
