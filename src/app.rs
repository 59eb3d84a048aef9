//! Composition root for the CLI: wires config, flags, downloader, engine
//! and delivery into one transcription run.

use crate::config::Config;
use crate::deliver::{DeliverySpec, render_segments};
use crate::error::ClipscribeError;
use crate::job::{JobOptions, ProgressObserver, run_job};
use crate::models::catalog::ModelTier;
use crate::models::download::{is_model_installed, model_path};
use crate::source::download::YtDlpDownloader;
use crate::source::input::{LocalMediaHandle, MediaInput, classify_input};
use crate::stt::device::ComputeHint;
use crate::stt::engine::TranscriptionEngine;
use crate::stt::transcriber::Transcript;
use crate::stt::whisper::WhisperLoader;
use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Flags that override the loaded configuration for a single run.
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub model: Option<String>,
    pub device: Option<String>,
    pub language: Option<String>,
    pub output: Option<PathBuf>,
    pub stdout_only: bool,
    pub timestamps: bool,
    pub no_download: bool,
    pub quiet: bool,
}

/// Progress reporting on stderr, colorized, suppressed in quiet mode.
struct ConsoleObserver {
    quiet: bool,
}

impl ProgressObserver for ConsoleObserver {
    fn on_acquiring(&self, input: &MediaInput) {
        if self.quiet {
            return;
        }
        if let MediaInput::Url(url) = input {
            eprintln!("{} {}", "Downloading".dimmed(), url);
        }
    }

    fn on_acquired(&self, handle: &LocalMediaHandle) {
        if !self.quiet {
            eprintln!(
                "{} {}.{} ({} KB)",
                "Acquired".dimmed(),
                handle.base_name(),
                handle.extension(),
                handle.len() / 1024
            );
        }
    }

    fn on_transcribing(&self, tier: ModelTier) {
        if !self.quiet {
            eprintln!("{} with the {} model...", "Transcribing".dimmed(), tier);
        }
    }

    fn on_transcribed(&self, transcript: &Transcript) {
        if !self.quiet && !transcript.language.is_empty() {
            eprintln!("{} {}", "Language:".dimmed(), transcript.language);
        }
    }
}

/// Run one transcription from the command line.
///
/// Resolution order for each knob: CLI flag, then environment override,
/// then config file, then built-in default.
pub async fn run_transcribe_command(
    config: Config,
    raw_input: &str,
    overrides: RunOverrides,
) -> Result<()> {
    let tier: ModelTier = overrides
        .model
        .as_deref()
        .unwrap_or(&config.stt.model)
        .parse()?;
    let compute: ComputeHint = overrides
        .device
        .as_deref()
        .unwrap_or(&config.stt.device)
        .parse()?;
    let language = overrides
        .language
        .clone()
        .unwrap_or_else(|| config.stt.language.clone());

    ensure_model(tier, &config, &overrides).await?;

    let mut loader = WhisperLoader::new(language);
    loader.threads = config.stt.threads;
    let engine = TranscriptionEngine::new(Box::new(loader));
    let downloader = YtDlpDownloader::with_program(&config.download.program);

    let mut delivery = DeliverySpec::new();
    if let Some(path) = &overrides.output {
        delivery = delivery.write_to(path);
    } else if !overrides.stdout_only {
        let dir = config
            .output
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        delivery = delivery.write_derived_in(dir);
    }

    let options = JobOptions { tier, compute };
    let observer = ConsoleObserver {
        quiet: overrides.quiet,
    };

    let artifact = run_job(
        &engine,
        &downloader,
        classify_input(raw_input),
        &options,
        &delivery,
        &observer,
    )?;

    if overrides.timestamps || config.output.timestamps {
        print!("{}", render_segments(&artifact.segments));
    } else {
        println!("{}", artifact.text);
    }

    if let Some(path) = &artifact.file
        && !overrides.quiet
    {
        eprintln!(
            "{} {}",
            "Transcript written to".green(),
            path.display()
        );
    }

    Ok(())
}

/// Make sure the model file for `tier` exists, downloading it when allowed.
async fn ensure_model(tier: ModelTier, config: &Config, overrides: &RunOverrides) -> Result<()> {
    if is_model_installed(tier) {
        return Ok(());
    }

    if overrides.no_download || !config.download.auto_fetch_model {
        return Err(ClipscribeError::ModelNotFound {
            path: model_path(tier).to_string_lossy().to_string(),
        }
        .into());
    }

    #[cfg(feature = "model-download")]
    {
        crate::models::download::download_model(tier, !overrides.quiet).await?;
        Ok(())
    }

    #[cfg(not(feature = "model-download"))]
    Err(ClipscribeError::ModelNotFound {
        path: model_path(tier).to_string_lossy().to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_model_is_rejected_before_any_work() {
        let result = run_transcribe_command(
            Config::default(),
            "talk.mp4",
            RunOverrides {
                model: Some("huge".to_string()),
                quiet: true,
                ..RunOverrides::default()
            },
        )
        .await;

        let err = result.unwrap_err();
        assert!(
            err.downcast_ref::<ClipscribeError>()
                .is_some_and(|e| matches!(e, ClipscribeError::InvalidConfiguration { .. }))
        );
    }

    #[tokio::test]
    async fn test_unknown_device_is_rejected() {
        let result = run_transcribe_command(
            Config::default(),
            "talk.mp4",
            RunOverrides {
                device: Some("npu".to_string()),
                quiet: true,
                ..RunOverrides::default()
            },
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_model_with_no_download_errors() {
        // Pick the least likely tier to be installed in a test environment
        if is_model_installed(ModelTier::Large) {
            return;
        }

        let result = run_transcribe_command(
            Config::default(),
            "talk.mp4",
            RunOverrides {
                model: Some("large".to_string()),
                no_download: true,
                quiet: true,
                ..RunOverrides::default()
            },
        )
        .await;

        let err = result.unwrap_err();
        assert!(
            err.downcast_ref::<ClipscribeError>()
                .is_some_and(|e| matches!(e, ClipscribeError::ModelNotFound { .. }))
        );
    }
}
