//! WAV file format parameters.

/// Channel count every fixture must have.
pub const REQUIRED_CHANNELS: u16 = 1;

/// Sample width every fixture must have.
pub const REQUIRED_BITS_PER_SAMPLE: u16 = 16;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates the mono 16-bit format used for every fixture.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: REQUIRED_CHANNELS,
            sample_rate,
            bits_per_sample: REQUIRED_BITS_PER_SAMPLE,
        }
    }

    /// Calculates bytes per sample (per channel).
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Calculates byte rate (bytes per second).
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}
