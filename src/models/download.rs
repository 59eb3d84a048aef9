//! Model download and installation management.
//!
//! Downloads ggml Whisper models from HuggingFace into the user's cache
//! directory, verifying integrity against the catalog checksums.

use crate::error::Result;
use crate::models::catalog::{ModelInfo, ModelTier, get_model};
use std::path::PathBuf;

#[cfg(feature = "model-download")]
use crate::error::ClipscribeError;

/// Get the directory where models are stored.
///
/// Uses `~/.cache/clipscribe/models/` on Linux/Unix.
pub fn models_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("clipscribe")
        .join("models")
}

/// Get the full path for a tier's model file.
///
/// The file may or may not exist on disk.
pub fn model_path(tier: ModelTier) -> PathBuf {
    models_dir().join(get_model(tier).file_name())
}

/// Check if a tier's model is installed.
pub fn is_model_installed(tier: ModelTier) -> bool {
    model_path(tier).exists()
}

/// Download a Whisper model if it is not already installed.
///
/// # Errors
///
/// Returns an error if the download fails, the SHA-1 checksum doesn't
/// match, or the file cannot be written.
#[cfg(feature = "model-download")]
pub async fn download_model(tier: ModelTier, progress: bool) -> Result<PathBuf> {
    let path = model_path(tier);

    if path.exists() {
        if progress {
            eprintln!("Model '{}' is already installed at {}", tier, path.display());
        }
        return Ok(path);
    }

    let info = get_model(tier);
    download_to_path(info, &path, progress).await?;
    Ok(path)
}

#[cfg(feature = "model-download")]
async fn download_to_path(info: &ModelInfo, output_path: &std::path::Path, progress: bool) -> Result<()> {
    use futures_util::StreamExt;
    use indicatif::{ProgressBar, ProgressStyle};
    use sha1::{Digest, Sha1};
    use std::io::Write;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if progress {
        eprintln!("Downloading {} ({} MB)...", info.tier, info.size_mb);
    }

    let client = reqwest::Client::new();
    let response = client.get(info.url()).send().await.map_err(|e| {
        ClipscribeError::Download {
            message: format!("failed to start model download: {e}"),
        }
    })?;

    if !response.status().is_success() {
        return Err(ClipscribeError::Download {
            message: format!("model download failed with status {}", response.status()),
        });
    }

    let total_size = response.content_length().unwrap_or(0);
    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let mut hasher = Sha1::new();
    let mut stream = response.bytes_stream();
    let mut file = std::fs::File::create(output_path)?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ClipscribeError::Download {
            message: format!("failed to read download chunk: {e}"),
        })?;

        file.write_all(&chunk)?;
        hasher.update(&chunk);

        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Downloaded");
    }

    let calculated = format!("{:x}", hasher.finalize());
    if calculated != info.sha1 {
        if let Err(e) = std::fs::remove_file(output_path) {
            eprintln!("clipscribe: failed to remove corrupted download: {e}");
        }
        return Err(ClipscribeError::Download {
            message: format!(
                "SHA-1 checksum mismatch for {}. Expected {}, got {calculated}",
                info.tier, info.sha1
            ),
        });
    }

    if progress {
        eprintln!("Checksum verified");
        eprintln!("Model installed to: {}", output_path.display());
    }

    Ok(())
}

/// Format model information for the `models list` output.
pub fn format_model_info(model: &ModelInfo) -> String {
    let status = if is_model_installed(model.tier) {
        "[installed]"
    } else {
        "[not installed]"
    };
    format!("{:8} {:5} MB   {}", model.tier.to_string(), model.size_mb, status)
}
