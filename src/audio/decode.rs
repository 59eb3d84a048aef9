//! Compressed/container audio decoding via symphonia.
//!
//! Handles everything that isn't plain WAV: mp3, m4a, flac and the audio
//! tracks of mp4/mkv/webm containers.

use crate::audio::resample;
use crate::error::{ClipscribeError, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

fn decode_error(stage: &str, e: impl std::fmt::Display) -> ClipscribeError {
    ClipscribeError::Transcription {
        message: format!("failed to decode audio ({stage}): {e}"),
    }
}

/// Decode the default audio track of a media file into 16kHz mono 16-bit PCM.
///
/// `extension` is passed to the probe as a hint; the `bin` fallback
/// extension effectively means "probe by content".
pub fn decode_media_file(path: &Path, extension: &str) -> Result<Vec<i16>> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if extension != crate::defaults::FALLBACK_EXTENSION {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_error("probe", e))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| decode_error("probe", "no audio track found"))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let source_rate = codec_params
        .sample_rate
        .ok_or_else(|| decode_error("probe", "unknown sample rate"))?;
    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| decode_error("codec", e))?;

    let mut mono: Vec<i16> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_error("packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            // Corrupt frames are skipped; a fully corrupt stream still
            // fails below with "no audio samples decoded".
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(decode_error("decode", e)),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();
        if num_frames == 0 {
            continue;
        }

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let samples = sample_buf.samples();

        if channels > 1 {
            for frame in samples.chunks(channels) {
                let avg: f32 = frame.iter().sum::<f32>() / channels as f32;
                mono.push(f32_to_i16(avg));
            }
        } else {
            mono.extend(samples.iter().map(|&s| f32_to_i16(s)));
        }
    }

    if mono.is_empty() {
        return Err(decode_error("decode", "no audio samples decoded"));
    }

    Ok(resample(&mono, source_rate))
}

fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
