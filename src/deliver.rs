//! Result delivery: persist and expose transcripts.
//!
//! A [`DeliverySpec`] selects any combination of return-as-string (always
//! available on the artifact), a file on disk, and an in-memory
//! downloadable stream. File writes overwrite rather than append, so
//! delivering the same result twice produces identical bytes.

use crate::defaults::{DEFAULT_TRANSCRIPT_NAME, TRANSCRIPT_CONTENT_TYPE, TRANSCRIPT_SUFFIX};
use crate::error::{ClipscribeError, Result};
use crate::stt::transcriber::{Segment, Transcript};
use std::path::PathBuf;

/// Where a transcript should go.
#[derive(Debug, Clone, Default)]
pub struct DeliverySpec {
    base_name: Option<String>,
    file: Option<PathBuf>,
    derived_dir: Option<PathBuf>,
    stream: bool,
}

impl DeliverySpec {
    /// Return-as-string only: the artifact carries the text, nothing is
    /// written anywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Base name of the original media; drives derived file and stream names.
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = Some(base_name.into());
        self
    }

    /// Write the transcript to a caller-specified path.
    pub fn write_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Write the transcript to `<base>_transcript.txt` inside `dir`
    /// (`transcript.txt` when no base name is known).
    pub fn write_derived_in(mut self, dir: impl Into<PathBuf>) -> Self {
        self.derived_dir = Some(dir.into());
        self
    }

    /// Fill in the base name only when the caller has not set one.
    pub fn or_base_name(mut self, base_name: impl Into<String>) -> Self {
        if self.base_name.is_none() {
            self.base_name = Some(base_name.into());
        }
        self
    }

    /// Also produce an in-memory `text/plain` stream for download.
    pub fn with_stream(mut self) -> Self {
        self.stream = true;
        self
    }

    fn file_target(&self) -> Option<PathBuf> {
        if let Some(path) = &self.file {
            return Some(path.clone());
        }
        self.derived_dir
            .as_ref()
            .map(|dir| dir.join(derive_transcript_name(self.base_name.as_deref())))
    }
}

/// An in-memory transcript offered for download.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptStream {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: String,
}

/// The delivered output of a successful job. Immutable once created.
#[derive(Debug, Clone)]
pub struct TranscriptArtifact {
    /// The full transcript text.
    pub text: String,
    /// Detected or requested language code.
    pub language: String,
    /// Timestamped segments, for read-only projections.
    pub segments: Vec<Segment>,
    /// Path written to, when the spec asked for a file.
    pub file: Option<PathBuf>,
    /// Downloadable stream, when the spec asked for one.
    pub stream: Option<TranscriptStream>,
}

/// Derive a transcript file name from the original media's base name.
pub fn derive_transcript_name(base_name: Option<&str>) -> String {
    match base_name {
        Some(base) if !base.is_empty() => format!("{base}{TRANSCRIPT_SUFFIX}"),
        _ => DEFAULT_TRANSCRIPT_NAME.to_string(),
    }
}

/// Persist and expose a transcription result per `spec`.
///
/// # Errors
/// Returns `OutputWrite` when the destination file cannot be written.
pub fn deliver(transcript: &Transcript, spec: &DeliverySpec) -> Result<TranscriptArtifact> {
    let text = transcript.text.clone();

    let file = match spec.file_target() {
        Some(path) => {
            // Overwrite, never append: delivery is idempotent
            std::fs::write(&path, text.as_bytes()).map_err(|e| {
                ClipscribeError::OutputWrite {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            Some(path)
        }
        None => None,
    };

    let stream = spec.stream.then(|| TranscriptStream {
        bytes: text.clone().into_bytes(),
        content_type: TRANSCRIPT_CONTENT_TYPE,
        file_name: derive_transcript_name(spec.base_name.as_deref()),
    });

    Ok(TranscriptArtifact {
        text,
        language: transcript.language.clone(),
        segments: transcript.segments.clone(),
        file,
        stream,
    })
}

/// Render timestamped segments as display lines.
///
/// A read-only projection over the segments; the transcript itself is
/// untouched. Returns one `[start -> end] text` line per segment.
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(&format!(
            "[{} -> {}] {}\n",
            format_offset(segment.start),
            format_offset(segment.end),
            segment.text
        ));
    }
    out
}

/// Format a second offset as `h:mm:ss.mmm`.
fn format_offset(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let m = (total_secs / 60) % 60;
    let h = total_secs / 3600;
    format!("{h}:{m:02}:{s:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(text: &str) -> Transcript {
        Transcript {
            text: text.to_string(),
            language: "en".to_string(),
            segments: Vec::new(),
        }
    }

    #[test]
    fn test_deliver_return_as_string_only() {
        let artifact = deliver(&transcript("hello"), &DeliverySpec::new()).unwrap();
        assert_eq!(artifact.text, "hello");
        assert!(artifact.file.is_none());
        assert!(artifact.stream.is_none());
    }

    #[test]
    fn test_deliver_writes_named_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let text = "Unicode: héllo wörld 你好 🎬";

        let spec = DeliverySpec::new().write_to(&path);
        let artifact = deliver(&transcript(text), &spec).unwrap();

        assert_eq!(artifact.file.as_deref(), Some(path.as_path()));
        let read_back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(read_back, text, "read-back must yield exactly the text");
    }

    #[test]
    fn test_deliver_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let spec = DeliverySpec::new().write_to(&path);
        let t = transcript("same content");

        deliver(&t, &spec).unwrap();
        let first = std::fs::read(&path).unwrap();
        deliver(&t, &spec).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second, "repeated delivery must be byte-identical");
    }

    #[test]
    fn test_deliver_overwrites_not_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old much longer content here").unwrap();

        let spec = DeliverySpec::new().write_to(&path);
        deliver(&transcript("new"), &spec).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_deliver_derived_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let spec = DeliverySpec::new()
            .with_base_name("lecture")
            .write_derived_in(dir.path());

        let artifact = deliver(&transcript("x"), &spec).unwrap();
        assert_eq!(
            artifact.file.unwrap(),
            dir.path().join("lecture_transcript.txt")
        );
    }

    #[test]
    fn test_deliver_derived_without_base_name_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let spec = DeliverySpec::new().write_derived_in(dir.path());
        let artifact = deliver(&transcript("x"), &spec).unwrap();
        assert_eq!(artifact.file.unwrap(), dir.path().join("transcript.txt"));
    }

    #[test]
    fn test_deliver_unwritable_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.txt");
        let spec = DeliverySpec::new().write_to(path);

        let result = deliver(&transcript("x"), &spec);
        assert!(matches!(
            result,
            Err(ClipscribeError::OutputWrite { .. })
        ));
    }

    #[test]
    fn test_deliver_stream_carries_text_and_mime() {
        let spec = DeliverySpec::new().with_base_name("talk").with_stream();
        let artifact = deliver(&transcript("spoken words"), &spec).unwrap();

        let stream = artifact.stream.unwrap();
        assert_eq!(stream.bytes, b"spoken words");
        assert_eq!(stream.content_type, "text/plain");
        assert_eq!(stream.file_name, "talk_transcript.txt");
    }

    #[test]
    fn test_derive_transcript_name() {
        assert_eq!(derive_transcript_name(Some("clip")), "clip_transcript.txt");
        assert_eq!(derive_transcript_name(Some("")), "transcript.txt");
        assert_eq!(derive_transcript_name(None), "transcript.txt");
    }

    #[test]
    fn test_render_segments_projection() {
        let t = Transcript {
            text: "Hello world".to_string(),
            language: "en".to_string(),
            segments: vec![
                Segment {
                    start: 0.0,
                    end: 1.5,
                    text: "Hello".to_string(),
                },
                Segment {
                    start: 1.5,
                    end: 3661.25,
                    text: "world".to_string(),
                },
            ],
        };

        let rendered = render_segments(&t.segments);
        assert!(rendered.contains("[0:00:00.000 -> 0:00:01.500] Hello"));
        assert!(rendered.contains("[0:00:01.500 -> 1:01:01.250] world"));
        // Projection never mutates the transcript
        assert_eq!(t.text, "Hello world");
    }

    #[test]
    fn test_render_segments_empty() {
        assert!(render_segments(&[]).is_empty());
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0.0), "0:00:00.000");
        assert_eq!(format_offset(61.5), "0:01:01.500");
        assert_eq!(format_offset(3600.0), "1:00:00.000");
    }
}
