//! Concat command implementation
//!
//! Joins several recordings end to end into one fixture.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use burstmix_audio::concat::concat_files;

use super::json_output::{JsonError, UtilityOutput, WavSummary};

/// Run the concat command
///
/// # Arguments
/// * `output` - Where to write the joined WAV
/// * `inputs` - Input WAVs, in order
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(output: &Path, inputs: &[PathBuf], json_output: bool) -> Result<ExitCode> {
    if json_output {
        let (out, code) = match concat_files(inputs, output) {
            Ok(buffer) => (
                UtilityOutput::success(WavSummary::new(output, &buffer)),
                ExitCode::SUCCESS,
            ),
            Err(e) => (
                UtilityOutput::failure(vec![JsonError::from(&e)]),
                ExitCode::from(1),
            ),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(code);
    }

    println!("{}", "Joining:".cyan().bold());
    for input in inputs {
        println!("  {}", input.display());
    }

    let joined = concat_files(inputs, output)
        .with_context(|| format!("Failed to join inputs into {}", output.display()))?;
    println!(
        "{} {} ({:.3}s, {} samples @ {} Hz)",
        "Wrote".green().bold(),
        output.display(),
        joined.duration_seconds(),
        joined.len(),
        joined.sample_rate
    );
    Ok(ExitCode::SUCCESS)
}
