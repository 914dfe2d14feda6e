//! SNR calibration and mixing.
//!
//! The noise track is scaled so that its RMS sits `target_snr_db` below the
//! RMS of the base recording, added sample by sample, and quantized back to
//! 16-bit range.

use serde::Serialize;

/// Stand-in RMS for a fully silent buffer.
pub const SILENCE_EPSILON: f64 = 1e-6;

/// Non-fatal conditions detected while mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MixWarning {
    /// The base recording has zero RMS.
    SilentBase,
    /// The noise track has zero RMS.
    SilentNoise,
}

impl MixWarning {
    /// Stable warning code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            MixWarning::SilentBase => "MIX_W001",
            MixWarning::SilentNoise => "MIX_W002",
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> &'static str {
        match self {
            MixWarning::SilentBase => "base is silent; using epsilon to continue",
            MixWarning::SilentNoise => "noise track is silent; using epsilon to continue",
        }
    }
}

impl std::fmt::Display for MixWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of mixing a noise track onto a base recording.
#[derive(Debug, Clone)]
pub struct MixOutcome {
    /// Mixed samples, same length as the base.
    pub samples: Vec<i16>,
    /// RMS of the base as used for calibration (after epsilon substitution).
    pub base_rms: f64,
    /// RMS of the noise track as used for calibration.
    pub noise_rms: f64,
    /// Linear gain applied to the noise track.
    pub scale: f64,
    /// Silence warnings raised during calibration.
    pub warnings: Vec<MixWarning>,
}

/// Saturating conversion of a real sample value to 16-bit PCM.
#[inline]
pub fn clamp_i16(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Root-mean-square of a buffer. Empty buffers have zero RMS.
pub fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let acc: f64 = samples
        .iter()
        .map(|&s| {
            let v = s as f64;
            v * v
        })
        .sum();
    (acc / samples.len() as f64).sqrt()
}

/// Converts a dB ratio to a linear amplitude ratio.
#[inline]
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Gain that brings noise of `noise_rms` to `target_snr_db` below `base_rms`.
pub fn snr_scale(base_rms: f64, noise_rms: f64, target_snr_db: f64) -> f64 {
    let target_noise_rms = base_rms / db_to_amplitude(target_snr_db);
    target_noise_rms / noise_rms
}

/// Mixes `noise` onto `base` at `target_snr_db`.
///
/// `noise` must be the same length as `base`; samples past the shorter of
/// the two are treated as silent noise.
pub fn mix(base: &[i16], noise: &[i16], target_snr_db: f64) -> MixOutcome {
    let mut warnings = Vec::new();

    let mut base_rms = rms(base);
    if base_rms == 0.0 {
        base_rms = SILENCE_EPSILON;
        warnings.push(MixWarning::SilentBase);
    }
    let mut noise_rms = rms(noise);
    if noise_rms == 0.0 {
        noise_rms = SILENCE_EPSILON;
        warnings.push(MixWarning::SilentNoise);
    }

    let scale = snr_scale(base_rms, noise_rms, target_snr_db);

    let samples = base
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let n = noise.get(i).copied().unwrap_or(0) as f64;
            clamp_i16(b as f64 + n * scale)
        })
        .collect();

    MixOutcome {
        samples,
        base_rms,
        noise_rms,
        scale,
        warnings,
    }
}
