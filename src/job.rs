//! Job orchestration: acquire, transcribe, deliver.
//!
//! A job moves strictly forward through its stages; there is no retry
//! logic and no partial-result delivery. Temporary files created during
//! acquisition are owned by the media handle and removed when the job
//! ends, on every exit path.

use crate::deliver::{DeliverySpec, TranscriptArtifact, deliver};
use crate::error::Result;
use crate::models::catalog::ModelTier;
use crate::source::download::MediaDownloader;
use crate::source::input::{LocalMediaHandle, MediaInput, acquire};
use crate::stt::device::ComputeHint;
use crate::stt::engine::{TranscriptionEngine, TranscriptionRequest};
use crate::stt::transcriber::Transcript;

/// Per-job knobs: which model to run and where.
#[derive(Debug, Clone, Copy)]
pub struct JobOptions {
    pub tier: ModelTier,
    pub compute: ComputeHint,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            tier: ModelTier::Base,
            compute: ComputeHint::Auto,
        }
    }
}

/// Stage callbacks for progress reporting. All methods default to no-ops;
/// implement only the ones you care about.
pub trait ProgressObserver: Send + Sync {
    fn on_acquiring(&self, _input: &MediaInput) {}
    fn on_acquired(&self, _handle: &LocalMediaHandle) {}
    fn on_transcribing(&self, _tier: ModelTier) {}
    fn on_transcribed(&self, _transcript: &Transcript) {}
    fn on_delivering(&self) {}
}

/// Observer that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// Run one transcription job end to end.
///
/// Stages run in order: acquisition (materialize the input as a local
/// file), transcription (decode and run the model), delivery (persist
/// the transcript per `delivery`). A failure in any stage aborts the job
/// with that stage's error; the media handle is dropped either way, so
/// temporary files never outlive the job.
pub fn run_job(
    engine: &TranscriptionEngine,
    downloader: &dyn MediaDownloader,
    input: MediaInput,
    options: &JobOptions,
    delivery: &DeliverySpec,
    observer: &dyn ProgressObserver,
) -> Result<TranscriptArtifact> {
    observer.on_acquiring(&input);
    let handle = acquire(input, downloader)?;
    observer.on_acquired(&handle);

    observer.on_transcribing(options.tier);
    let request = TranscriptionRequest {
        handle: &handle,
        tier: options.tier,
        compute: options.compute,
    };
    let transcript = engine.transcribe(&request)?;
    observer.on_transcribed(&transcript);

    observer.on_delivering();
    let spec = delivery.clone().or_base_name(handle.base_name());
    deliver(&transcript, &spec)
}
