//! Silent fixture generation.

use crate::buffer::PcmBuffer;
use crate::error::{MixError, MixResult};

/// Default sample rate for generated silence.
pub const DEFAULT_SAMPLE_RATE: u32 = 8000;

/// Creates `duration_ms` of digital silence.
///
/// The sample count is `sample_rate * duration_ms / 1000`, truncated.
pub fn generate(duration_ms: u32, sample_rate: u32) -> MixResult<PcmBuffer> {
    if duration_ms == 0 || sample_rate == 0 {
        return Err(MixError::config(format!(
            "duration ({} ms) and sample rate ({} Hz) must both be positive",
            duration_ms, sample_rate
        )));
    }

    let num_samples = (sample_rate as u64 * duration_ms as u64 / 1000) as usize;
    if num_samples == 0 {
        return Err(MixError::config(format!(
            "{} ms at {} Hz yields no samples",
            duration_ms, sample_rate
        )));
    }

    Ok(PcmBuffer::silent(num_samples, sample_rate))
}
