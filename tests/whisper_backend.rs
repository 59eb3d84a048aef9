//! Tests against a real Whisper model, skipped when none is installed.
//!
//! Install one first:
//!   cargo run -- models install tiny

#![cfg(feature = "whisper")]

use clipscribe::models::catalog::ModelTier;
use clipscribe::models::download::{is_model_installed, model_path};
use clipscribe::stt::transcriber::Transcriber;
use clipscribe::stt::whisper::{WhisperConfig, WhisperTranscriber};

fn installed_tier() -> Option<ModelTier> {
    let tier = ModelTier::ALL
        .iter()
        .copied()
        .find(|&tier| is_model_installed(tier));
    if tier.is_none() {
        eprintln!("\nNo Whisper model found - skipping backend tests.");
        eprintln!("Install one with: cargo run -- models install tiny\n");
    }
    tier
}

fn load_transcriber(tier: ModelTier) -> WhisperTranscriber {
    WhisperTranscriber::new(WhisperConfig {
        model_path: model_path(tier),
        ..WhisperConfig::default()
    })
    .expect("installed model should load")
}

#[test]
fn silent_audio_yields_empty_or_near_empty_transcript() {
    let Some(tier) = installed_tier() else {
        return;
    };
    let transcriber = load_transcriber(tier);

    // 10 seconds of silence at 16kHz
    let silence = vec![0i16; 16_000 * 10];
    let transcript = transcriber
        .transcribe(&silence)
        .expect("silence must transcribe without error");

    // Whisper sometimes hallucinates a token or two on silence; anything
    // substantial means decoding went wrong.
    assert!(
        transcript.text.len() < 80,
        "expected near-empty transcript for silence, got: {:?}",
        transcript.text
    );

    for pair in transcript.segments.windows(2) {
        assert!(pair[0].start <= pair[1].start, "segments must be ordered");
    }
    for segment in &transcript.segments {
        assert!(segment.end >= segment.start);
        assert!(segment.start >= 0.0);
    }
}

#[test]
fn transcriber_reports_model_name_and_readiness() {
    let Some(tier) = installed_tier() else {
        return;
    };
    let transcriber = load_transcriber(tier);

    assert!(transcriber.is_ready());
    assert!(transcriber.model_name().starts_with("ggml-"));
}
