//! Audio decoding: turn an acquired media file into 16kHz mono PCM.
//!
//! WAV goes through `hound`; every other container (mp3, m4a, mp4, mkv,
//! webm, flac) goes through `symphonia`. Decode failures surface as
//! `Transcription` errors, since they mean the media is corrupt or uses a
//! codec we cannot read.

pub mod decode;
pub mod wav;

use crate::defaults::SAMPLE_RATE;
use crate::error::Result;
use std::path::Path;

/// Decode a media file into 16-bit PCM at 16kHz mono, ready for Whisper.
///
/// `extension` is the handle's extension and picks the decode path; the
/// `bin` fallback extension goes through content probing.
pub fn load_samples(path: &Path, extension: &str) -> Result<Vec<i16>> {
    match extension {
        "wav" => wav::decode_wav_file(path),
        _ => decode::decode_media_file(path, extension),
    }
}

/// Downmix interleaved samples to mono by averaging channels.
pub(crate) fn downmix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let channels = channels as usize;
    samples
        .chunks_exact(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

/// Simple linear interpolation resampling to [`SAMPLE_RATE`].
pub(crate) fn resample(samples: &[i16], from_rate: u32) -> Vec<i16> {
    if from_rate == SAMPLE_RATE || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / SAMPLE_RATE as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let src_pos = i as f64 * ratio;
            let idx = src_pos as usize;
            let frac = src_pos - idx as f64;

            if idx + 1 < samples.len() {
                let a = samples[idx] as f64;
                let b = samples[idx + 1] as f64;
                (a + (b - a) * frac) as i16
            } else {
                samples[samples.len() - 1]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_mono_is_identity() {
        let samples = vec![1i16, 2, 3];
        assert_eq!(downmix_to_mono(&samples, 1), samples);
    }

    #[test]
    fn test_downmix_stereo_averages_channels() {
        let samples = vec![100i16, 200, -100, 100];
        assert_eq!(downmix_to_mono(&samples, 2), vec![150, 0]);
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let samples = vec![1i16, 2, 3, 4];
        assert_eq!(resample(&samples, SAMPLE_RATE), samples);
    }

    #[test]
    fn test_resample_halves_sample_count() {
        let samples: Vec<i16> = (0..3200).map(|i| (i % 100) as i16).collect();
        let out = resample(&samples, 32000);
        assert_eq!(out.len(), 1600);
    }

    #[test]
    fn test_resample_upsamples() {
        let samples = vec![0i16; 8000];
        let out = resample(&samples, 8000);
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn test_resample_empty() {
        let out = resample(&[], 44100);
        assert!(out.is_empty());
    }
}
