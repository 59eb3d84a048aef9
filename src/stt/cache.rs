//! Keyed model cache with single-flight loading.
//!
//! Model loading takes seconds and hundreds of megabytes, so loaded models
//! are cached per (tier, device) for the lifetime of the process. The
//! cache is owned by the [`TranscriptionEngine`](crate::stt::engine), not
//! stored globally.
//!
//! Locking discipline: a short-lived outer lock guards the key map, and a
//! per-key lock serializes loading. A second caller requesting a tier that
//! is currently loading blocks on the per-key lock and then reuses the
//! loaded model; callers for other keys are unaffected. A failed load
//! leaves the slot empty, so the next caller retries.

use crate::error::{ClipscribeError, Result};
use crate::models::catalog::ModelTier;
use crate::stt::device::Device;
use crate::stt::transcriber::Transcriber;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub type ModelKey = (ModelTier, Device);

type Slot = Arc<Mutex<Option<Arc<dyn Transcriber>>>>;

#[derive(Default)]
pub struct ModelCache {
    entries: Mutex<HashMap<ModelKey, Slot>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached transcriber for `key`, loading it with `load` on a miss.
    pub fn get_or_load<F>(&self, key: ModelKey, load: F) -> Result<Arc<dyn Transcriber>>
    where
        F: FnOnce() -> Result<Arc<dyn Transcriber>>,
    {
        let slot = {
            let mut entries = self.entries.lock().map_err(poisoned)?;
            entries.entry(key).or_default().clone()
        };

        let mut guard = slot.lock().map_err(poisoned)?;
        if let Some(transcriber) = guard.as_ref() {
            return Ok(Arc::clone(transcriber));
        }

        let transcriber = load()?;
        *guard = Some(Arc::clone(&transcriber));
        Ok(transcriber)
    }

    /// Whether a model is currently loaded for `key`.
    pub fn is_loaded(&self, key: ModelKey) -> bool {
        let entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => return false,
        };
        entries
            .get(&key)
            .and_then(|slot| slot.lock().ok())
            .is_some_and(|guard| guard.is_some())
    }

    /// Number of loaded models.
    pub fn loaded_count(&self) -> usize {
        let entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => return 0,
        };
        entries
            .values()
            .filter(|slot| slot.lock().is_ok_and(|guard| guard.is_some()))
            .count()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ClipscribeError {
    ClipscribeError::Transcription {
        message: "model cache lock poisoned".to_string(),
    }
}
