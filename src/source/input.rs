//! Media input normalization.
//!
//! Every job starts from a [`MediaInput`] — bytes already in memory, a path
//! on disk, or a video URL — and [`acquire`] turns it into a single
//! [`LocalMediaHandle`] pointing at a readable, non-empty local file.
//!
//! Temp files created here are owned by the handle and removed when it is
//! dropped, on every exit path of the job (success, error, panic unwind).

use crate::defaults::{FALLBACK_EXTENSION, SUPPORTED_EXTENSIONS};
use crate::error::{ClipscribeError, Result};
use crate::source::download::MediaDownloader;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, TempPath};

/// A single media input for one transcription job.
///
/// Consumed exactly once by [`acquire`].
#[derive(Debug)]
pub enum MediaInput {
    /// An uploaded payload with its declared file name (e.g. "talk.mp4").
    Bytes {
        content: Vec<u8>,
        name: Option<String>,
    },
    /// A file already on the local filesystem.
    Path(PathBuf),
    /// A video-sharing-site URL to fetch audio from.
    Url(String),
}

/// What the handle owns on disk, if anything.
///
/// Local-path inputs are referenced in place and never deleted.
#[derive(Debug)]
enum TempOwnership {
    /// Caller-owned file, left alone on drop.
    Borrowed,
    /// A temp file we created; deleted when dropped.
    File(#[allow(dead_code)] TempPath),
    /// A temp directory holding a downloaded file; removed when dropped.
    Dir(#[allow(dead_code)] TempDir),
}

/// An owned, readable, non-empty local media file.
///
/// The file exists for the handle's entire lifetime. Temp artifacts are
/// deleted exactly once, when the handle drops.
#[derive(Debug)]
pub struct LocalMediaHandle {
    path: PathBuf,
    extension: String,
    base_name: String,
    len: u64,
    ownership: TempOwnership,
}

impl LocalMediaHandle {
    /// Path to the local media file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File extension, lowercased. `bin` when the origin had none recognized.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Base name of the original media, used to derive transcript file names.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Size of the media file in bytes. Always greater than zero.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Never true — empty inputs are rejected at acquisition.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether dropping this handle deletes the underlying file.
    pub fn owns_temp_file(&self) -> bool {
        !matches!(self.ownership, TempOwnership::Borrowed)
    }

    fn from_bytes(content: &[u8], name: Option<&str>) -> Result<Self> {
        if content.is_empty() {
            return Err(ClipscribeError::InvalidInput {
                message: "uploaded payload is empty".to_string(),
            });
        }

        let extension = recognized_extension(name).unwrap_or(FALLBACK_EXTENSION);
        let base_name = base_name_of(name.unwrap_or("upload"));

        let mut file = tempfile::Builder::new()
            .prefix("clipscribe-")
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        file.write_all(content)?;
        file.flush()?;

        Ok(Self {
            path: file.path().to_path_buf(),
            extension: extension.to_string(),
            base_name,
            len: content.len() as u64,
            ownership: TempOwnership::File(file.into_temp_path()),
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|_| ClipscribeError::NotFound {
            message: format!("no such file: {}", path.display()),
        })?;
        if !metadata.is_file() {
            return Err(ClipscribeError::InvalidInput {
                message: format!("not a regular file: {}", path.display()),
            });
        }
        if metadata.len() == 0 {
            return Err(ClipscribeError::InvalidInput {
                message: format!("file is empty: {}", path.display()),
            });
        }

        let name = path.file_name().and_then(|n| n.to_str());
        let extension = recognized_extension(name).unwrap_or(FALLBACK_EXTENSION);

        Ok(Self {
            path: path.to_path_buf(),
            extension: extension.to_string(),
            base_name: base_name_of(name.unwrap_or("media")),
            len: metadata.len(),
            ownership: TempOwnership::Borrowed,
        })
    }

    fn from_url(url: &str, downloader: &dyn MediaDownloader) -> Result<Self> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClipscribeError::UnsupportedSource {
                message: format!("unsupported URL scheme: {url}"),
            });
        }

        let dir = tempfile::Builder::new().prefix("clipscribe-").tempdir()?;
        let downloaded = downloader.fetch_audio(url, dir.path())?;

        let metadata = fs::metadata(&downloaded).map_err(|_| ClipscribeError::Download {
            message: format!(
                "downloader reported {} but the file does not exist",
                downloaded.display()
            ),
        })?;
        if metadata.len() == 0 {
            return Err(ClipscribeError::Download {
                message: format!("downloaded file is empty: {}", downloaded.display()),
            });
        }

        let name = downloaded.file_name().and_then(|n| n.to_str());
        let extension = recognized_extension(name).unwrap_or(FALLBACK_EXTENSION);

        Ok(Self {
            path: downloaded.clone(),
            extension: extension.to_string(),
            base_name: base_name_of(name.unwrap_or("download")),
            len: metadata.len(),
            ownership: TempOwnership::Dir(dir),
        })
    }
}

/// Normalize a [`MediaInput`] into a [`LocalMediaHandle`].
///
/// # Errors
///
/// - `InvalidInput` for empty payloads and non-regular files
/// - `NotFound` for missing local paths
/// - `UnsupportedSource`, `NotFound` or `Download` for URL inputs,
///   depending on what the downloader reports
pub fn acquire(input: MediaInput, downloader: &dyn MediaDownloader) -> Result<LocalMediaHandle> {
    match input {
        MediaInput::Bytes { content, name } => {
            LocalMediaHandle::from_bytes(&content, name.as_deref())
        }
        MediaInput::Path(path) => LocalMediaHandle::from_path(&path),
        MediaInput::Url(url) => LocalMediaHandle::from_url(&url, downloader),
    }
}

/// Classify a raw command-line argument as a URL or a local path.
pub fn classify_input(raw: &str) -> MediaInput {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        MediaInput::Url(raw.to_string())
    } else {
        MediaInput::Path(PathBuf::from(raw))
    }
}

/// Extract a lowercased extension from a declared name, if it is one of the
/// supported media extensions.
fn recognized_extension(name: Option<&str>) -> Option<&'static str> {
    let ext = Path::new(name?).extension()?.to_str()?.to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .find(|&&supported| supported == ext)
        .copied()
}

/// File stem of a declared name, for transcript naming.
fn base_name_of(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("media")
        .to_string()
}
