//! Noise track synthesis.
//!
//! A noise track has the same length as the recording it will be mixed onto
//! and is silent except for a handful of randomly placed bursts. Each burst
//! is filled either with Gaussian white noise or with samples tiled from a
//! recorded noise source.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::mixer::clamp_i16;

/// Fewest bursts placed on a track.
pub const MIN_BURSTS: u32 = 2;
/// Most bursts placed on a track.
pub const MAX_BURSTS: u32 = 4;
/// Shortest burst in milliseconds.
pub const MIN_BURST_MS: u32 = 200;
/// Longest burst in milliseconds.
pub const MAX_BURST_MS: u32 = 400;
/// Standard deviation of synthetic burst samples.
pub const WHITE_NOISE_STD_DEV: f64 = 0.35 * 32767.0;

/// Where a recorded source is read from when a new burst begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCursor {
    /// Every burst starts again at source index 0.
    #[default]
    Restart,
    /// Each burst picks up where the previous burst stopped reading.
    Continuous,
}

/// What fills the bursts.
#[derive(Debug, Clone, Copy)]
pub enum NoiseSource<'a> {
    /// Zero-mean Gaussian noise with [`WHITE_NOISE_STD_DEV`].
    Synthetic,
    /// Samples from a recorded noise file, tiled cyclically.
    Recorded {
        /// Source samples. An empty source leaves bursts silent.
        samples: &'a [i16],
        /// Read position policy across bursts.
        cursor: SourceCursor,
    },
}

/// A half-open window `[start, end)` of the noise track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Burst {
    /// First sample index.
    pub start: usize,
    /// One past the last sample index.
    pub end: usize,
    /// Duration that was drawn for this burst.
    pub duration_ms: u32,
}

impl Burst {
    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false for a placed burst.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// A synthesized noise track plus the bursts that were placed on it.
#[derive(Debug, Clone)]
pub struct NoiseTrack {
    /// Track samples, same length as the base recording.
    pub samples: Vec<i16>,
    /// Bursts in placement order. Later bursts overwrite earlier ones.
    pub bursts: Vec<Burst>,
    /// How many bursts were drawn, including those that did not fit.
    pub requested_bursts: u32,
}

/// Converts a burst duration to a sample count, rounding to nearest.
pub fn burst_samples(sample_rate: u32, duration_ms: u32) -> usize {
    (sample_rate as f64 * duration_ms as f64 / 1000.0).round() as usize
}

/// Draws one burst for a track of `length` samples.
///
/// Returns `None` when the drawn duration is empty or does not fit strictly
/// inside the track.
pub fn plan_burst<R: Rng + ?Sized>(length: usize, sample_rate: u32, rng: &mut R) -> Option<Burst> {
    let duration_ms = rng.gen_range(MIN_BURST_MS..=MAX_BURST_MS);
    let duration = burst_samples(sample_rate, duration_ms);
    if duration == 0 || duration >= length {
        return None;
    }

    let start = rng.gen_range(0..=length - duration);
    Some(Burst {
        start,
        end: start + duration,
        duration_ms,
    })
}

/// Synthesizes a noise track of exactly `length` samples.
pub fn synthesize<R: Rng + ?Sized>(
    length: usize,
    sample_rate: u32,
    source: &NoiseSource<'_>,
    rng: &mut R,
) -> NoiseTrack {
    let mut samples = vec![0i16; length];
    let mut bursts = Vec::new();
    let mut source_offset = 0usize;

    let requested_bursts = rng.gen_range(MIN_BURSTS..=MAX_BURSTS);
    for _ in 0..requested_bursts {
        let Some(burst) = plan_burst(length, sample_rate, rng) else {
            continue;
        };
        let window = &mut samples[burst.start..burst.end];

        match *source {
            NoiseSource::Synthetic => fill_white(window, rng),
            NoiseSource::Recorded {
                samples: src,
                cursor,
            } => {
                let offset = match cursor {
                    SourceCursor::Restart => 0,
                    SourceCursor::Continuous => source_offset,
                };
                fill_recorded(window, src, offset);
                if !src.is_empty() {
                    source_offset = (offset + window.len()) % src.len();
                }
            }
        }

        bursts.push(burst);
    }

    NoiseTrack {
        samples,
        bursts,
        requested_bursts,
    }
}

/// Draws a standard normal value with the Box-Muller transform.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // (0, 1] keeps ln() finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn fill_white<R: Rng + ?Sized>(window: &mut [i16], rng: &mut R) {
    for sample in window.iter_mut() {
        *sample = clamp_i16(gaussian(rng) * WHITE_NOISE_STD_DEV);
    }
}

fn fill_recorded(window: &mut [i16], source: &[i16], offset: usize) {
    if source.is_empty() {
        return;
    }
    for (idx, sample) in window.iter_mut().enumerate() {
        *sample = source[(offset + idx) % source.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_burst_samples_rounds() {
        assert_eq!(burst_samples(8000, 200), 1600);
        assert_eq!(burst_samples(44100, 250), 11025);
        // 11025 * 0.201 = 2216.025
        assert_eq!(burst_samples(11025, 201), 2216);
        // 22050 * 0.203 = 4476.15
        assert_eq!(burst_samples(22050, 203), 4476);
        assert_eq!(burst_samples(0, 300), 0);
    }

    #[test]
    fn test_track_length_matches_request() {
        let mut rng = create_rng(1);
        for &len in &[0usize, 1, 100, 8000, 24000] {
            let track = synthesize(len, 8000, &NoiseSource::Synthetic, &mut rng);
            assert_eq!(track.samples.len(), len);
        }
    }

    #[test]
    fn test_burst_bounds_across_seeds() {
        for seed in 0..200 {
            let mut rng = create_rng(seed);
            let track = synthesize(16000, 8000, &NoiseSource::Synthetic, &mut rng);

            assert!((MIN_BURSTS..=MAX_BURSTS).contains(&track.requested_bursts));
            assert_eq!(track.bursts.len() as u32, track.requested_bursts);
            for burst in &track.bursts {
                assert!((MIN_BURST_MS..=MAX_BURST_MS).contains(&burst.duration_ms));
                assert!(burst.start < burst.end);
                assert!(burst.end <= 16000);
                assert_eq!(burst.len(), burst_samples(8000, burst.duration_ms));
            }
        }
    }

    #[test]
    fn test_silent_outside_bursts() {
        let mut rng = create_rng(99);
        let track = synthesize(40000, 8000, &NoiseSource::Synthetic, &mut rng);

        for (i, &s) in track.samples.iter().enumerate() {
            let covered = track.bursts.iter().any(|b| (b.start..b.end).contains(&i));
            if !covered {
                assert_eq!(s, 0, "sample {} outside every burst", i);
            }
        }
        assert!(track.samples.iter().any(|&s| s != 0));
    }

    #[test]
    fn test_short_track_skips_every_burst() {
        // 1000 samples at 8 kHz is 125 ms, shorter than any burst
        let mut rng = create_rng(5);
        let track = synthesize(1000, 8000, &NoiseSource::Synthetic, &mut rng);
        assert!(track.bursts.is_empty());
        assert!(track.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_burst_equal_to_track_is_skipped() {
        // Every duration is >= 1600 samples and must be strictly shorter
        // than the track.
        let mut rng = create_rng(11);
        let track = synthesize(1600, 8000, &NoiseSource::Synthetic, &mut rng);
        assert!(track.bursts.is_empty());
    }

    #[test]
    fn test_synthetic_noise_spread() {
        let mut rng = create_rng(2024);
        let n = 20000;
        let values: Vec<f64> = (0..n).map(|_| gaussian(&mut rng)).collect();
        let mean = values.iter().sum::<f64>() / n as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((var.sqrt() - 1.0).abs() < 0.05, "std {}", var.sqrt());
    }

    #[test]
    fn test_recorded_restarts_each_burst() {
        let source: Vec<i16> = (1..=7).collect();
        let noise = NoiseSource::Recorded {
            samples: &source,
            cursor: SourceCursor::Restart,
        };
        for seed in 0..20 {
            let mut rng = create_rng(seed);
            let track = synthesize(24000, 8000, &noise, &mut rng);

            // The last burst is never overwritten.
            let last = track.bursts.last().expect("24000 samples fits every burst");
            for (k, i) in (last.start..last.end).enumerate() {
                assert_eq!(track.samples[i], source[k % source.len()]);
            }
        }
    }

    #[test]
    fn test_recorded_continuous_cursor() {
        let source: Vec<i16> = (1..=7).collect();
        let noise = NoiseSource::Recorded {
            samples: &source,
            cursor: SourceCursor::Continuous,
        };
        let mut rng = create_rng(3);
        let track = synthesize(24000, 8000, &noise, &mut rng);

        let consumed: usize = track.bursts[..track.bursts.len() - 1]
            .iter()
            .map(Burst::len)
            .sum();
        let last = track.bursts.last().unwrap();
        for (k, i) in (last.start..last.end).enumerate() {
            assert_eq!(track.samples[i], source[(consumed + k) % source.len()]);
        }
    }

    #[test]
    fn test_empty_recorded_source_is_silent() {
        let noise = NoiseSource::Recorded {
            samples: &[],
            cursor: SourceCursor::Restart,
        };
        let mut rng = create_rng(8);
        let track = synthesize(24000, 8000, &noise, &mut rng);
        assert!(!track.bursts.is_empty());
        assert!(track.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_same_seed_same_track() {
        let a = synthesize(16000, 8000, &NoiseSource::Synthetic, &mut create_rng(77));
        let b = synthesize(16000, 8000, &NoiseSource::Synthetic, &mut create_rng(77));
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.bursts, b.bursts);
    }

    #[test]
    fn test_source_cursor_serde_names() {
        let c: SourceCursor = serde_json::from_str("\"continuous\"").unwrap();
        assert_eq!(c, SourceCursor::Continuous);
        assert_eq!(SourceCursor::default(), SourceCursor::Restart);
    }
}
