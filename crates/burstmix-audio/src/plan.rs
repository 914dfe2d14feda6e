//! Batch plans.
//!
//! A plan is a JSON file listing many fixtures to generate in one run:
//!
//! ```json
//! {
//!   "seed": 42,
//!   "out_dir": "artifacts/wav/tests",
//!   "fixtures": [
//!     { "base": "clean/code_123.wav", "out": "noisy__code_123__snr_10.wav",
//!       "snr_db": 10.0, "noise": "white" },
//!     { "base": "clean/code_4.wav", "out": "atc__code_4.wav", "snr_db": 0.0,
//!       "noise": { "wav": "noise/atc.wav" }, "cursor": "continuous", "seed": 7 }
//!   ]
//! }
//! ```
//!
//! Relative paths resolve against the plan's directory; `out` resolves
//! against `out_dir` when one is given. Fixtures without an explicit seed get
//! one derived from the plan seed and their `out` entry.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MixError, MixResult};
use crate::generate::{generate_fixture, FixtureReport, FixtureRequest};
use crate::noise::SourceCursor;
use crate::rng::{create_rng, derive_fixture_seed};

/// Plan seed used when the plan does not name one.
pub const DEFAULT_PLAN_SEED: u32 = 0;

/// Noise selection for one plan entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanNoise {
    /// Synthetic white-noise bursts.
    White,
    /// Bursts cut from a recorded WAV file.
    Wav(PathBuf),
}

/// One fixture in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Clean base recording.
    pub base: PathBuf,
    /// Output path.
    pub out: PathBuf,
    /// Target SNR in dB.
    pub snr_db: f64,
    /// Noise selection.
    pub noise: PlanNoise,
    /// Recorded-source cursor policy.
    #[serde(default)]
    pub cursor: SourceCursor,
    /// Explicit seed, overriding derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

/// A batch plan as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchPlan {
    /// Seed that per-fixture seeds derive from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Directory outputs are placed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// Fixtures to generate.
    pub fixtures: Vec<PlanEntry>,
}

/// A plan entry with resolved paths and seed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFixture {
    /// Resolved base path.
    pub base: PathBuf,
    /// Resolved output path.
    pub out: PathBuf,
    /// Mix configuration.
    pub request: FixtureRequest,
    /// Seed for this fixture's RNG.
    pub seed: u32,
}

/// Outcome of one batch entry.
#[derive(Debug)]
pub struct BatchItem {
    /// The fixture that was attempted.
    pub fixture: PlannedFixture,
    /// Report on success, error otherwise.
    pub result: MixResult<FixtureReport>,
}

impl BatchPlan {
    /// Parses a plan from JSON text.
    pub fn from_json(json: &str) -> MixResult<Self> {
        serde_json::from_str(json).map_err(|e| MixError::config(format!("invalid plan: {}", e)))
    }

    /// Reads and parses a plan file.
    pub fn load(path: &Path) -> MixResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the plan as pretty JSON.
    pub fn to_json(&self) -> MixResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MixError::config(format!("cannot serialize plan: {}", e)))
    }

    /// Validates the plan and resolves every entry against `plan_dir`.
    pub fn resolve(&self, plan_dir: &Path) -> MixResult<Vec<PlannedFixture>> {
        if self.fixtures.is_empty() {
            return Err(MixError::config("plan contains no fixtures"));
        }

        let plan_seed = self.seed.unwrap_or(DEFAULT_PLAN_SEED);
        let out_root = self
            .out_dir
            .as_ref()
            .map(|dir| join_relative(plan_dir, dir))
            .unwrap_or_else(|| plan_dir.to_path_buf());

        let mut seen = HashSet::new();
        let mut planned = Vec::with_capacity(self.fixtures.len());
        for (idx, entry) in self.fixtures.iter().enumerate() {
            let request = match &entry.noise {
                PlanNoise::White => FixtureRequest::synthetic(entry.snr_db),
                PlanNoise::Wav(path) => {
                    FixtureRequest::recorded(entry.snr_db, join_relative(plan_dir, path))
                }
            }
            .with_cursor(entry.cursor);
            request.validate().map_err(|e| {
                MixError::config(format!("fixture {} ({}): {}", idx, entry.out.display(), e))
            })?;

            let out = join_relative(&out_root, &entry.out);
            if !seen.insert(out.clone()) {
                return Err(MixError::config(format!(
                    "fixture {} writes '{}' which an earlier fixture already writes",
                    idx,
                    out.display()
                )));
            }

            let seed = entry
                .seed
                .unwrap_or_else(|| derive_fixture_seed(plan_seed, &entry.out.to_string_lossy()));

            planned.push(PlannedFixture {
                base: join_relative(plan_dir, &entry.base),
                out,
                request,
                seed,
            });
        }

        Ok(planned)
    }
}

/// Generates every planned fixture in order.
///
/// A failing fixture does not stop the batch; its error is kept in the
/// returned item.
pub fn execute(fixtures: Vec<PlannedFixture>) -> Vec<BatchItem> {
    fixtures
        .into_iter()
        .map(|fixture| {
            let mut rng = create_rng(fixture.seed);
            let result = generate_fixture(&fixture.base, &fixture.out, &fixture.request, &mut rng);
            BatchItem { fixture, result }
        })
        .collect()
}

fn join_relative(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
