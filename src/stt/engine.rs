//! Transcription execution: resolve the device, fetch the cached model,
//! decode the media and run inference.

use crate::audio;
use crate::error::Result;
use crate::models::catalog::ModelTier;
use crate::source::input::LocalMediaHandle;
use crate::stt::cache::ModelCache;
use crate::stt::device::{self, ComputeHint, Device};
use crate::stt::transcriber::{Transcriber, Transcript};
use std::sync::Arc;

/// Builds a transcriber for a (tier, device) pair on a cache miss.
pub trait TranscriberLoader: Send + Sync {
    fn load(&self, tier: ModelTier, device: Device) -> Result<Arc<dyn Transcriber>>;
}

/// Loader that always hands out the same transcriber, for tests and
/// embedders that manage model loading themselves.
pub struct FixedLoader(pub Arc<dyn Transcriber>);

impl TranscriberLoader for FixedLoader {
    fn load(&self, _tier: ModelTier, _device: Device) -> Result<Arc<dyn Transcriber>> {
        Ok(Arc::clone(&self.0))
    }
}

/// One transcription request against an acquired media file.
///
/// The handle stays owned by the caller; its cleanup is the job's
/// responsibility, not this component's.
#[derive(Debug)]
pub struct TranscriptionRequest<'a> {
    pub handle: &'a LocalMediaHandle,
    pub tier: ModelTier,
    pub compute: ComputeHint,
}

/// Executes transcription requests against a shared model cache.
///
/// The cache is part of the engine, passed around explicitly; repeated
/// requests at the same (tier, device) reuse the loaded model.
pub struct TranscriptionEngine {
    cache: ModelCache,
    loader: Box<dyn TranscriberLoader>,
}

impl TranscriptionEngine {
    pub fn new(loader: Box<dyn TranscriberLoader>) -> Self {
        Self {
            cache: ModelCache::new(),
            loader,
        }
    }

    /// Run one transcription request to completion.
    ///
    /// Blocks for the duration of inference; long media runs for minutes.
    /// There is no cancellation: the call returns with a transcript or an
    /// error. A failure never evicts already-cached models.
    pub fn transcribe(&self, request: &TranscriptionRequest<'_>) -> Result<Transcript> {
        let device = device::resolve(request.compute);

        let transcriber = self
            .cache
            .get_or_load((request.tier, device), || {
                self.loader.load(request.tier, device)
            })?;

        let samples = audio::load_samples(request.handle.path(), request.handle.extension())?;
        transcriber.transcribe(&samples)
    }

    /// Whether a model is already loaded for (tier, hint-resolved device).
    pub fn is_model_loaded(&self, tier: ModelTier, compute: ComputeHint) -> bool {
        self.cache.is_loaded((tier, device::resolve(compute)))
    }
}
