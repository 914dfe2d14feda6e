//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; the structures here are what it prints.
//! Library errors keep their own stable `MIX_XXX` codes, CLI-level problems
//! use `CLI_XXX`.

use std::path::Path;

use burstmix_audio::{FixtureReport, MixError, MixWarning, PcmBuffer};
use serde::Serialize;

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Output location could not be determined
    pub const OUTPUT_PATH: &str = "CLI_001";
    /// Batch plan could not be loaded or resolved
    pub const PLAN: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "MIX_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&MixError> for JsonError {
    fn from(err: &MixError) -> Self {
        let error = JsonError::new(err.code(), err.to_string());
        match err {
            MixError::Format { path, .. } => error.with_file(path.display().to_string()),
            _ => error,
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "MIX_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
}

impl From<&MixWarning> for JsonWarning {
    fn from(warning: &MixWarning) -> Self {
        Self {
            code: warning.code().to_string(),
            message: warning.message().to_string(),
        }
    }
}

/// Converts mix warnings for output.
pub fn warnings_to_json(warnings: &[MixWarning]) -> Vec<JsonWarning> {
    warnings.iter().map(JsonWarning::from).collect()
}

/// Output of `burstmix overlay --json`.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayOutput {
    /// Whether the fixture was written
    pub success: bool,
    /// Seed the generator was built from
    pub seed: u32,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Non-fatal warnings
    pub warnings: Vec<JsonWarning>,
    /// Fixture report (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<FixtureReport>,
}

impl OverlayOutput {
    /// Creates a successful overlay output.
    pub fn success(seed: u32, report: FixtureReport) -> Self {
        Self {
            success: true,
            seed,
            errors: Vec::new(),
            warnings: warnings_to_json(&report.warnings),
            result: Some(report),
        }
    }

    /// Creates a failed overlay output.
    pub fn failure(seed: u32, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            seed,
            errors,
            warnings: Vec::new(),
            result: None,
        }
    }
}

/// One fixture in `burstmix batch --json` output.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFixtureResult {
    /// Resolved output path
    pub out: String,
    /// Seed used for this fixture
    pub seed: u32,
    /// Whether this fixture was written
    pub success: bool,
    /// Error (on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
    /// Fixture report (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<FixtureReport>,
}

/// Output of `burstmix batch --json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    /// True when every fixture succeeded
    pub success: bool,
    /// Plan-level errors (the plan could not be run at all)
    pub errors: Vec<JsonError>,
    /// Number of fixtures in the plan
    pub total: usize,
    /// Number written
    pub successful: usize,
    /// Number that failed
    pub failed: usize,
    /// Per-fixture results in plan order
    pub fixtures: Vec<BatchFixtureResult>,
}

impl BatchOutput {
    /// Creates an output for a plan that could not be run.
    pub fn plan_failure(error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            total: 0,
            successful: 0,
            failed: 0,
            fixtures: Vec::new(),
        }
    }

    /// Summarizes per-fixture results.
    pub fn from_results(fixtures: Vec<BatchFixtureResult>) -> Self {
        let successful = fixtures.iter().filter(|f| f.success).count();
        let failed = fixtures.len() - successful;
        Self {
            success: failed == 0,
            errors: Vec::new(),
            total: fixtures.len(),
            successful,
            failed,
            fixtures,
        }
    }
}

/// Summary of a written WAV file.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WavSummary {
    /// Output path
    pub path: String,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of samples
    pub num_samples: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
}

impl WavSummary {
    /// Summarizes `buffer` as stored at `path`.
    pub fn new(path: &Path, buffer: &PcmBuffer) -> Self {
        Self {
            path: path.display().to_string(),
            sample_rate: buffer.sample_rate,
            num_samples: buffer.len(),
            duration_seconds: buffer.duration_seconds(),
            pcm_hash: burstmix_audio::wav::pcm_hash(&buffer.samples),
        }
    }
}

/// Output of the `silence` and `concat` utilities with `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct UtilityOutput {
    /// Whether the file was written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Written file (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<WavSummary>,
}

impl UtilityOutput {
    /// Creates a successful output.
    pub fn success(result: WavSummary) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}
