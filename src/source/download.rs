//! Remote media fetching via an external downloader.
//!
//! Video-hosting providers change constantly, so provider support is
//! delegated entirely to `yt-dlp`. We run it as a subprocess, ask for an
//! audio-only extraction, and map its failure modes onto the error
//! taxonomy. The [`MediaDownloader`] trait keeps the seam mockable.

use crate::error::{ClipscribeError, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Fetches the audio stream behind a URL to local storage.
pub trait MediaDownloader: Send + Sync {
    /// Download the audio of `url` into `dest_dir`.
    ///
    /// Returns the path of the downloaded audio file, named with an audio
    /// extension (the container is normalized to mp3 by the extraction).
    fn fetch_audio(&self, url: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Downloader backed by the `yt-dlp` command-line tool.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    program: String,
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
        }
    }
}

impl YtDlpDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable name or path (e.g. a vendored binary).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MediaDownloader for YtDlpDownloader {
    fn fetch_audio(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let template = dest_dir.join("%(id)s.%(ext)s");

        let output = Command::new(&self.program)
            .arg("--no-playlist")
            .arg("--no-progress")
            .args(["-f", "bestaudio/best"])
            .arg("-x")
            .args(["--audio-format", "mp3"])
            .arg("-o")
            .arg(&template)
            .args(["--print", "after_move:filepath", "--no-simulate"])
            .arg(url)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ClipscribeError::Download {
                    message: format!(
                        "'{}' not found on PATH. Install it from https://github.com/yt-dlp/yt-dlp",
                        self.program
                    ),
                },
                _ => ClipscribeError::Download {
                    message: format!("failed to run {}: {e}", self.program),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(stderr.trim()));
        }

        // yt-dlp prints the final file path after post-processing
        let stdout = String::from_utf8_lossy(&output.stdout);
        if let Some(line) = stdout.lines().rev().find(|l| !l.trim().is_empty()) {
            let path = PathBuf::from(line.trim());
            if path.exists() {
                return Ok(path);
            }
        }

        // Older yt-dlp versions don't support --print after_move; fall back
        // to scanning the destination directory.
        first_file_in(dest_dir).ok_or_else(|| ClipscribeError::Download {
            message: "downloader completed but produced no file".to_string(),
        })
    }
}

/// Map a yt-dlp failure message onto the error taxonomy.
fn classify_failure(stderr: &str) -> ClipscribeError {
    let last_line = stderr.lines().last().unwrap_or(stderr).to_string();

    if stderr.contains("Unsupported URL") || stderr.contains("is not a valid URL") {
        return ClipscribeError::UnsupportedSource { message: last_line };
    }
    if stderr.contains("Requested format is not available")
        || stderr.contains("No video formats found")
        || stderr.contains("Video unavailable")
        || stderr.contains("HTTP Error 404")
    {
        return ClipscribeError::NotFound { message: last_line };
    }
    ClipscribeError::Download { message: last_line }
}

fn first_file_in(dir: &Path) -> Option<PathBuf> {
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| path.is_file())
}

/// Mock downloader for tests.
#[derive(Debug)]
pub struct MockDownloader {
    outcome: MockOutcome,
}

#[derive(Debug)]
enum MockOutcome {
    Audio { file_name: String, content: Vec<u8> },
    NotFound(String),
    UnsupportedSource(String),
    Download(String),
}

impl MockDownloader {
    /// Mock that "downloads" `content` to a file named `file_name`.
    pub fn with_audio(file_name: &str, content: &[u8]) -> Self {
        Self {
            outcome: MockOutcome::Audio {
                file_name: file_name.to_string(),
                content: content.to_vec(),
            },
        }
    }

    /// Mock that fails with the given error on every fetch.
    pub fn failing_with(error: ClipscribeError) -> Self {
        let outcome = match error {
            ClipscribeError::NotFound { message } => MockOutcome::NotFound(message),
            ClipscribeError::UnsupportedSource { message } => {
                MockOutcome::UnsupportedSource(message)
            }
            other => MockOutcome::Download(other.to_string()),
        };
        Self { outcome }
    }
}

impl MediaDownloader for MockDownloader {
    fn fetch_audio(&self, _url: &str, dest_dir: &Path) -> Result<PathBuf> {
        match &self.outcome {
            MockOutcome::Audio { file_name, content } => {
                let path = dest_dir.join(file_name);
                std::fs::write(&path, content)?;
                Ok(path)
            }
            MockOutcome::NotFound(message) => Err(ClipscribeError::NotFound {
                message: message.clone(),
            }),
            MockOutcome::UnsupportedSource(message) => Err(ClipscribeError::UnsupportedSource {
                message: message.clone(),
            }),
            MockOutcome::Download(message) => Err(ClipscribeError::Download {
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unsupported_url() {
        let err = classify_failure("ERROR: Unsupported URL: https://example.com/page");
        assert!(matches!(err, ClipscribeError::UnsupportedSource { .. }));
    }

    #[test]
    fn test_classify_invalid_url() {
        let err = classify_failure("ERROR: 'watch' is not a valid URL.");
        assert!(matches!(err, ClipscribeError::UnsupportedSource { .. }));
    }

    #[test]
    fn test_classify_no_formats_as_not_found() {
        let err = classify_failure("ERROR: [generic] abc123: No video formats found!");
        assert!(matches!(err, ClipscribeError::NotFound { .. }));
    }

    #[test]
    fn test_classify_video_unavailable_as_not_found() {
        let err = classify_failure("ERROR: [youtube] abc123: Video unavailable");
        assert!(matches!(err, ClipscribeError::NotFound { .. }));
    }

    #[test]
    fn test_classify_network_failure_as_download() {
        let err = classify_failure("ERROR: Unable to download webpage: <urlopen error timed out>");
        assert!(matches!(err, ClipscribeError::Download { .. }));
    }

    #[test]
    fn test_classify_keeps_last_line_as_message() {
        let err = classify_failure("WARNING: something\nERROR: Unsupported URL: x");
        match err {
            ClipscribeError::UnsupportedSource { message } => {
                assert_eq!(message, "ERROR: Unsupported URL: x");
            }
            other => panic!("expected UnsupportedSource, got {other:?}"),
        }
    }

    #[test]
    fn test_mock_downloader_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockDownloader::with_audio("vid42.mp3", b"audio bytes");

        let path = mock
            .fetch_audio("https://video.example/watch?id=vid42", dir.path())
            .unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"audio bytes");
    }

    #[test]
    fn test_mock_downloader_failure_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let mock = MockDownloader::failing_with(ClipscribeError::NotFound {
            message: "no audio stream".to_string(),
        });
        let result = mock.fetch_audio("https://video.example/x", dir.path());
        assert!(matches!(result, Err(ClipscribeError::NotFound { .. })));
    }

    #[test]
    fn test_ytdlp_missing_binary_maps_to_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = YtDlpDownloader::with_program("definitely-not-a-real-binary-xyz");
        let result = downloader.fetch_audio("https://video.example/x", dir.path());
        match result {
            Err(ClipscribeError::Download { message }) => {
                assert!(message.contains("not found on PATH"), "got: {message}");
            }
            other => panic!("expected Download error, got {other:?}"),
        }
    }

    #[test]
    fn test_first_file_in_finds_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        assert!(first_file_in(dir.path()).is_none());

        std::fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        let found = first_file_in(dir.path()).unwrap();
        assert!(found.is_file());
    }
}
