//! WAV decoding via hound.

use crate::audio::{downmix_to_mono, resample};
use crate::error::{ClipscribeError, Result};
use std::io::Read;
use std::path::Path;

/// Decode a WAV file into 16kHz mono 16-bit PCM.
pub fn decode_wav_file(path: &Path) -> Result<Vec<i16>> {
    let file = std::fs::File::open(path)?;
    decode_wav(Box::new(std::io::BufReader::new(file)))
}

/// Decode WAV data from any reader.
/// Supports arbitrary sample rates and channel counts.
pub fn decode_wav(reader: Box<dyn Read + Send>) -> Result<Vec<i16>> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| {
        ClipscribeError::Transcription {
            message: format!("failed to parse WAV file: {e}"),
        }
    })?;

    let spec = wav_reader.spec();

    let raw_samples: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Int => wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ClipscribeError::Transcription {
                message: format!("failed to read WAV samples: {e}"),
            })?,
        hound::SampleFormat::Float => wav_reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ClipscribeError::Transcription {
                message: format!("failed to read WAV samples: {e}"),
            })?,
    };

    let mono = downmix_to_mono(&raw_samples, spec.channels);
    Ok(resample(&mono, spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SAMPLE_RATE;
    use std::io::Cursor;

    fn wav_bytes(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_wav_16k_mono_passthrough() {
        let samples = vec![0i16, 100, -100, 32767];
        let bytes = wav_bytes(SAMPLE_RATE, 1, &samples);

        let decoded = decode_wav(Box::new(Cursor::new(bytes))).unwrap();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_decode_wav_stereo_downmixes() {
        let samples = vec![100i16, 200, -100, 100];
        let bytes = wav_bytes(SAMPLE_RATE, 2, &samples);

        let decoded = decode_wav(Box::new(Cursor::new(bytes))).unwrap();
        assert_eq!(decoded, vec![150, 0]);
    }

    #[test]
    fn test_decode_wav_resamples_44100() {
        let samples = vec![0i16; 44100];
        let bytes = wav_bytes(44100, 1, &samples);

        let decoded = decode_wav(Box::new(Cursor::new(bytes))).unwrap();
        assert_eq!(decoded.len(), SAMPLE_RATE as usize);
    }

    #[test]
    fn test_decode_invalid_wav_fails_transcription() {
        let result = decode_wav(Box::new(Cursor::new(b"not a wav".to_vec())));
        assert!(matches!(
            result,
            Err(ClipscribeError::Transcription { .. })
        ));
    }

    #[test]
    fn test_decode_wav_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        std::fs::write(&path, wav_bytes(SAMPLE_RATE, 1, &[1, 2, 3])).unwrap();

        let decoded = decode_wav_file(&path).unwrap();
        assert_eq!(decoded, vec![1, 2, 3]);
    }
}
