//! clipscribe - Transcribe media files and video URLs with Whisper
//!
//! Media goes in as bytes, a local path or a URL; a transcript comes out
//! as a string, a file on disk or a downloadable stream.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod deliver;
#[cfg(feature = "cli")]
pub mod diagnostics;
pub mod error;
pub mod job;
pub mod models;
pub mod source;
pub mod stt;

// L4 composition root - needs everything
#[cfg(feature = "cli")]
pub mod app;

// Core traits (source → transcribe → deliver)
pub use source::download::MediaDownloader;
pub use stt::transcriber::Transcriber;

// Pipeline
pub use deliver::{DeliverySpec, TranscriptArtifact, deliver};
pub use job::{JobOptions, NoopObserver, ProgressObserver, run_job};
pub use source::input::{LocalMediaHandle, MediaInput, acquire, classify_input};
pub use stt::engine::{TranscriptionEngine, TranscriptionRequest};

// Error handling
pub use error::{ClipscribeError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
