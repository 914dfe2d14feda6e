//! burstmix audio library
//!
//! Builds noisy DTMF decoder fixtures by overlaying a few random bursts of
//! noise on a clean recording at a calibrated signal-to-noise ratio.
//!
//! # Overview
//!
//! 1. [`wav::load`] reads a mono 16-bit PCM base recording (and, in recorded
//!    mode, a noise source at the same sample rate).
//! 2. [`noise::synthesize`] builds a same-length track that is silent except
//!    for 2-4 bursts of 200-400 ms, filled with Gaussian white noise or tiled
//!    from the recorded source.
//! 3. [`mixer::mix`] scales the track so its RMS sits `target_snr_db` below
//!    the base RMS, adds it, and saturates back to 16-bit range.
//! 4. [`wav::store`] writes the fixture atomically.
//!
//! # Determinism
//!
//! All randomness is passed in as a `rand::Rng`. The [`rng`] module builds
//! PCG32 generators from 32-bit seeds, so a fixture is byte-identical across
//! runs given the same inputs and seed.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use burstmix_audio::{generate_fixture, rng, FixtureRequest};
//!
//! let mut rng = rng::create_rng(42);
//! let report = generate_fixture(
//!     Path::new("clean/code_123.wav"),
//!     Path::new("tests/noisy__code_123__snr_10__noise_white.wav"),
//!     &FixtureRequest::synthetic(10.0),
//!     &mut rng,
//! )?;
//! for warning in &report.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! # Ok::<(), burstmix_audio::MixError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`generate_fixture()`] / [`overlay()`] - Fixture generation entry points
//! - [`wav`] - WAV loading and deterministic writing
//! - [`noise`] - Bursty noise track synthesis
//! - [`mixer`] - RMS, SNR calibration and mixing
//! - [`rng`] - Seeded PCG32 construction
//! - [`fixture`] - Ground-truth filename convention
//! - [`plan`] - JSON batch plans
//! - [`silence`], [`concat`] - Small fixture utilities

pub mod buffer;
pub mod concat;
pub mod error;
pub mod fixture;
pub mod generate;
pub mod mixer;
pub mod noise;
pub mod plan;
pub mod rng;
pub mod silence;
pub mod wav;

// Re-export main types at crate root
pub use buffer::PcmBuffer;
pub use error::{MixError, MixResult};
pub use generate::{generate_fixture, overlay, FixtureReport, FixtureRequest, NoiseMode, Overlay};
pub use mixer::{MixOutcome, MixWarning};
pub use noise::{Burst, NoiseSource, NoiseTrack, SourceCursor};
