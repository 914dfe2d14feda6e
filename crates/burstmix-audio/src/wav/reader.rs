//! WAV loading with strict format validation.

use std::io::Read;
use std::path::Path;

use super::format::{REQUIRED_BITS_PER_SAMPLE, REQUIRED_CHANNELS};
use crate::buffer::PcmBuffer;
use crate::error::{MixError, MixResult};

/// Loads a mono 16-bit integer PCM WAV file.
///
/// Stereo, 8/24/32-bit and float files are rejected with
/// [`MixError::Format`]; nothing is resampled or downmixed.
pub fn load(path: &Path) -> MixResult<PcmBuffer> {
    let reader = hound::WavReader::open(path).map_err(|e| map_hound_error(path, e))?;
    read_validated(path, reader)
}

/// Loads a WAV file from an in-memory byte slice.
///
/// `label` is only used in error messages.
pub fn load_from_bytes(label: &Path, bytes: &[u8]) -> MixResult<PcmBuffer> {
    let reader =
        hound::WavReader::new(std::io::Cursor::new(bytes)).map_err(|e| map_hound_error(label, e))?;
    read_validated(label, reader)
}

fn read_validated<R: Read>(path: &Path, mut reader: hound::WavReader<R>) -> MixResult<PcmBuffer> {
    let spec = reader.spec();

    if spec.channels != REQUIRED_CHANNELS {
        return Err(MixError::format(
            path,
            format!("expected mono, found {} channels", spec.channels),
        ));
    }
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(MixError::format(
            path,
            format!(
                "only integer PCM is supported, got {:?}",
                spec.sample_format
            ),
        ));
    }
    if spec.bits_per_sample != REQUIRED_BITS_PER_SAMPLE {
        return Err(MixError::format(
            path,
            format!(
                "expected 16-bit samples, found {}-bit",
                spec.bits_per_sample
            ),
        ));
    }

    let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
    let samples = samples.map_err(|e| map_hound_error(path, e))?;

    Ok(PcmBuffer::new(samples, spec.sample_rate))
}

fn map_hound_error(path: &Path, err: hound::Error) -> MixError {
    match err {
        hound::Error::IoError(e) => MixError::Io(e),
        other => MixError::format(path, other.to_string()),
    }
}
