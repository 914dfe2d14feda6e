//! Fixture generation entry points.
//!
//! Load the base (and noise source), synthesize a bursty noise track, mix it
//! at the requested SNR, and store the result. Output is written only once
//! the mixed buffer is complete.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::PcmBuffer;
use crate::error::{MixError, MixResult};
use crate::mixer::{mix, MixWarning};
use crate::noise::{synthesize, Burst, NoiseSource, SourceCursor};
use crate::wav;

/// Which kind of noise fills the bursts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// Gaussian white noise.
    Synthetic,
    /// Samples from a recorded noise file.
    Recorded,
}

impl NoiseMode {
    /// Short name used in fixture filenames and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseMode::Synthetic => "white",
            NoiseMode::Recorded => "recorded",
        }
    }
}

/// Mix configuration for one fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRequest {
    /// Target SNR in dB. Negative means noise louder than the base.
    pub target_snr_db: f64,
    /// Noise kind.
    pub mode: NoiseMode,
    /// Recorded noise file; required for [`NoiseMode::Recorded`] only.
    pub noise_source: Option<PathBuf>,
    /// Read position policy for recorded sources.
    pub cursor: SourceCursor,
}

impl FixtureRequest {
    /// Synthetic white-noise bursts at `target_snr_db`.
    pub fn synthetic(target_snr_db: f64) -> Self {
        Self {
            target_snr_db,
            mode: NoiseMode::Synthetic,
            noise_source: None,
            cursor: SourceCursor::Restart,
        }
    }

    /// Bursts cut from the recording at `noise_source`.
    pub fn recorded(target_snr_db: f64, noise_source: impl Into<PathBuf>) -> Self {
        Self {
            target_snr_db,
            mode: NoiseMode::Recorded,
            noise_source: Some(noise_source.into()),
            cursor: SourceCursor::Restart,
        }
    }

    /// Sets the recorded-source cursor policy.
    pub fn with_cursor(mut self, cursor: SourceCursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Checks the request before any file is read.
    pub fn validate(&self) -> MixResult<()> {
        check_snr(self.target_snr_db)?;
        match (self.mode, &self.noise_source) {
            (NoiseMode::Recorded, None) => Err(MixError::config(
                "recorded noise mode requires a noise source path",
            )),
            (NoiseMode::Synthetic, Some(path)) => Err(MixError::config(format!(
                "noise source '{}' given but noise mode is synthetic",
                path.display()
            ))),
            _ => Ok(()),
        }
    }
}

/// In-memory result of overlaying bursty noise on a base recording.
#[derive(Debug, Clone)]
pub struct Overlay {
    /// Mixed output, same length and rate as the base.
    pub output: PcmBuffer,
    /// Bursts placed on the noise track.
    pub bursts: Vec<Burst>,
    /// Bursts drawn, including skipped ones.
    pub requested_bursts: u32,
    /// Calibration RMS of the base.
    pub base_rms: f64,
    /// Calibration RMS of the noise track.
    pub noise_rms: f64,
    /// Gain applied to the noise track.
    pub scale: f64,
    /// Silence warnings.
    pub warnings: Vec<MixWarning>,
}

/// Summary of a stored fixture.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureReport {
    /// Where the fixture was written.
    pub output_path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples written.
    pub num_samples: usize,
    /// Requested SNR in dB.
    pub target_snr_db: f64,
    /// Noise kind.
    pub mode: NoiseMode,
    /// Bursts placed on the noise track.
    pub bursts: Vec<Burst>,
    /// Bursts drawn, including skipped ones.
    pub requested_bursts: u32,
    /// Calibration RMS of the base.
    pub base_rms: f64,
    /// Calibration RMS of the noise track.
    pub noise_rms: f64,
    /// Gain applied to the noise track.
    pub scale: f64,
    /// Silence warnings.
    pub warnings: Vec<MixWarning>,
    /// BLAKE3 hash of the output PCM data.
    pub pcm_hash: String,
}

/// `+inf` is accepted and leaves the base untouched (scale 0). NaN and
/// `-inf` have no meaningful scale.
fn check_snr(target_snr_db: f64) -> MixResult<()> {
    if target_snr_db.is_nan() || target_snr_db == f64::NEG_INFINITY {
        return Err(MixError::config(format!(
            "target SNR must be a number or +inf, got {}",
            target_snr_db
        )));
    }
    Ok(())
}

/// Overlays bursty noise on `base` without touching the filesystem.
///
/// `source` must be present for [`NoiseMode::Recorded`] and share the base's
/// sample rate; both checks happen before any random draw.
pub fn overlay<R: Rng + ?Sized>(
    base: &PcmBuffer,
    source: Option<&PcmBuffer>,
    request: &FixtureRequest,
    rng: &mut R,
) -> MixResult<Overlay> {
    check_snr(request.target_snr_db)?;

    let noise_source = match request.mode {
        NoiseMode::Synthetic => NoiseSource::Synthetic,
        NoiseMode::Recorded => {
            let source = source.ok_or_else(|| {
                MixError::config("recorded noise mode requires a noise source buffer")
            })?;
            if source.sample_rate != base.sample_rate {
                return Err(MixError::config(format!(
                    "sample rate mismatch: base={}Hz noise={}Hz",
                    base.sample_rate, source.sample_rate
                )));
            }
            NoiseSource::Recorded {
                samples: &source.samples,
                cursor: request.cursor,
            }
        }
    };

    let track = synthesize(base.len(), base.sample_rate, &noise_source, rng);
    let outcome = mix(&base.samples, &track.samples, request.target_snr_db);

    Ok(Overlay {
        output: PcmBuffer::new(outcome.samples, base.sample_rate),
        bursts: track.bursts,
        requested_bursts: track.requested_bursts,
        base_rms: outcome.base_rms,
        noise_rms: outcome.noise_rms,
        scale: outcome.scale,
        warnings: outcome.warnings,
    })
}

/// Generates a noisy fixture from `base_path` and stores it at `out_path`.
///
/// Format problems surface as [`MixError::Format`], configuration problems
/// (missing source path, sample-rate mismatch) as [`MixError::Configuration`]
/// before synthesis starts. Nothing is written to `out_path` on failure.
pub fn generate_fixture<R: Rng + ?Sized>(
    base_path: &Path,
    out_path: &Path,
    request: &FixtureRequest,
    rng: &mut R,
) -> MixResult<FixtureReport> {
    request.validate()?;

    let base = wav::load(base_path)?;
    let source = match (request.mode, &request.noise_source) {
        (NoiseMode::Recorded, Some(path)) => Some(wav::load(path)?),
        _ => None,
    };

    let mixed = overlay(&base, source.as_ref(), request, rng)?;
    wav::store(out_path, &mixed.output)?;

    Ok(FixtureReport {
        output_path: out_path.to_path_buf(),
        sample_rate: mixed.output.sample_rate,
        num_samples: mixed.output.len(),
        target_snr_db: request.target_snr_db,
        mode: request.mode,
        pcm_hash: wav::pcm_hash(&mixed.output.samples),
        bursts: mixed.bursts,
        requested_bursts: mixed.requested_bursts,
        base_rms: mixed.base_rms,
        noise_rms: mixed.noise_rms,
        scale: mixed.scale,
        warnings: mixed.warnings,
    })
}
