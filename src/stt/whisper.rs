//! Whisper-based speech-to-text transcription.
//!
//! Implements the [`Transcriber`] trait over whisper-rs.
//!
//! # Feature Gate
//!
//! The real implementation requires the `whisper` feature (and cmake to
//! build). Without it a stub is compiled that fails at transcription time.

use crate::defaults;
use crate::error::{ClipscribeError, Result};
use crate::models::catalog::ModelTier;
use crate::models::download::model_path;
use crate::stt::device::Device;
use crate::stt::engine::TranscriberLoader;
use crate::stt::transcriber::{Segment, Transcriber, Transcript};
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "whisper")]
use std::sync::{Mutex, Once};
#[cfg(feature = "whisper")]
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, install_logging_hooks,
};

#[cfg(feature = "whisper")]
static LOGGING_HOOKS_INSTALLED: Once = Once::new();

/// Configuration for the Whisper transcriber.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Path to the ggml model file
    pub model_path: PathBuf,
    /// Language code (e.g., "en", "es"), or "auto" to detect
    pub language: String,
    /// Number of threads for inference (None = whisper.cpp default)
    pub threads: Option<usize>,
    /// Run inference on the GPU backend compiled into this build
    pub use_gpu: bool,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
            use_gpu: false,
        }
    }
}

/// Whisper-based transcriber.
///
/// The WhisperContext is wrapped in a Mutex so concurrent jobs sharing a
/// cached model serialize their inference calls.
#[cfg(feature = "whisper")]
pub struct WhisperTranscriber {
    context: Mutex<WhisperContext>,
    config: WhisperConfig,
    model_name: String,
}

#[cfg(feature = "whisper")]
impl std::fmt::Debug for WhisperTranscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperTranscriber")
            .field("config", &self.config)
            .field("model_name", &self.model_name)
            .field("context", &"<WhisperContext>")
            .finish()
    }
}

/// Whisper-based transcriber placeholder (without the `whisper` feature).
#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct WhisperTranscriber {
    config: WhisperConfig,
    model_name: String,
}

fn model_name_of(config: &WhisperConfig) -> String {
    config
        .model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(feature = "whisper")]
impl WhisperTranscriber {
    /// Load a Whisper model from disk.
    ///
    /// # Errors
    /// Returns `ModelNotFound` if the model file doesn't exist and
    /// `Transcription` if whisper.cpp fails to load it.
    pub fn new(config: WhisperConfig) -> Result<Self> {
        // Install logging hooks to suppress whisper.cpp output (only once)
        LOGGING_HOOKS_INSTALLED.call_once(|| {
            install_logging_hooks();
        });

        if !config.model_path.exists() {
            return Err(ClipscribeError::ModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }

        let model_name = model_name_of(&config);

        let mut context_params = WhisperContextParameters::default();
        context_params.use_gpu(config.use_gpu);
        // Fused attention kernels avoid the standalone softmax CUDA kernel,
        // which crashes on Blackwell GPUs (sm_120) with ggml <= 1.7.6
        context_params.flash_attn(config.use_gpu);
        let context = WhisperContext::new_with_params(
            config
                .model_path
                .to_str()
                .ok_or_else(|| ClipscribeError::Transcription {
                    message: "invalid UTF-8 in model path".to_string(),
                })?,
            context_params,
        )
        .map_err(|e| ClipscribeError::Transcription {
            message: format!("failed to load Whisper model: {e}"),
        })?;

        Ok(Self {
            context: Mutex::new(context),
            config,
            model_name,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }
}

#[cfg(not(feature = "whisper"))]
impl WhisperTranscriber {
    /// Create a stub transcriber (fails at transcription time).
    pub fn new(config: WhisperConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(ClipscribeError::ModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }
        let model_name = model_name_of(&config);
        Ok(Self { config, model_name })
    }

    /// Get the configuration
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }
}

/// Convert i16 audio samples to f32 normalized to [-1.0, 1.0].
///
/// Whisper expects audio in f32 format normalized to the range [-1.0, 1.0].
/// Input is 16-bit PCM audio where samples range from -32768 to 32767.
pub(crate) fn convert_audio(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&sample| sample as f32 / 32768.0)
        .collect()
}

#[cfg(feature = "whisper")]
impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio: &[i16]) -> Result<Transcript> {
        let audio_f32 = convert_audio(audio);

        let context = self
            .context
            .lock()
            .map_err(|e| ClipscribeError::Transcription {
                message: format!("failed to acquire context lock: {e}"),
            })?;

        let mut state = context
            .create_state()
            .map_err(|e| ClipscribeError::Transcription {
                message: format!("failed to create Whisper state: {e}"),
            })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        if self.config.language == defaults::AUTO_LANGUAGE {
            params.set_language(None);
        } else {
            params.set_language(Some(&self.config.language));
        }

        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads as i32);
        }

        // Disable printing to stdout/stderr
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &audio_f32)
            .map_err(|e| ClipscribeError::Transcription {
                message: format!("Whisper inference failed: {e}"),
            })?;

        let lang_id = state.full_lang_id_from_state();
        let language = whisper_rs::get_lang_str(lang_id).unwrap_or("").to_string();

        // Timestamps come back in centiseconds; keep full precision in seconds.
        let mut full_text = String::new();
        let mut segments = Vec::new();
        for segment in state.as_iter() {
            let text = segment.to_string();
            full_text.push_str(&text);
            segments.push(Segment {
                start: segment.start_timestamp() as f64 / 100.0,
                end: segment.end_timestamp() as f64 / 100.0,
                text: text.trim().to_string(),
            });
        }

        Ok(Transcript {
            text: full_text.trim().to_string(),
            language,
            segments,
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(not(feature = "whisper"))]
impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<Transcript> {
        Err(ClipscribeError::Transcription {
            message: concat!(
                "Whisper feature not enabled. This binary was built without speech recognition.\n",
                "To fix: cargo build --release (whisper is enabled by default)\n",
                "If the build fails with cmake errors, install: sudo apt install cmake"
            )
            .to_string(),
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        false
    }
}

/// Loader that builds [`WhisperTranscriber`]s from installed model files.
#[derive(Debug, Clone)]
pub struct WhisperLoader {
    pub language: String,
    pub threads: Option<usize>,
}

impl Default for WhisperLoader {
    fn default() -> Self {
        Self {
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl WhisperLoader {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            threads: None,
        }
    }
}

impl TranscriberLoader for WhisperLoader {
    fn load(&self, tier: ModelTier, device: Device) -> Result<Arc<dyn Transcriber>> {
        let config = WhisperConfig {
            model_path: model_path(tier),
            language: self.language.clone(),
            threads: self.threads,
            use_gpu: device.use_gpu(),
        };
        Ok(Arc::new(WhisperTranscriber::new(config)?))
    }
}
