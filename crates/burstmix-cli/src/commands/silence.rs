//! Silence command implementation
//!
//! Writes an all-zero recording, used for no-code fixtures.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use burstmix_audio::{silence, wav, MixResult, PcmBuffer};

use super::json_output::{JsonError, UtilityOutput, WavSummary};

/// Run the silence command
///
/// # Arguments
/// * `output` - Where to write the WAV
/// * `duration_ms` - Length in milliseconds
/// * `sample_rate` - Sample rate in Hz
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    output: &Path,
    duration_ms: u32,
    sample_rate: u32,
    json_output: bool,
) -> Result<ExitCode> {
    let result = write_silence(output, duration_ms, sample_rate);

    if json_output {
        let (out, code) = match result {
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

    let buffer =
        result.with_context(|| format!("Failed to write silence to {}", output.display()))?;
    println!(
        "{} {} ({} ms, {} samples @ {} Hz)",
        "Wrote".green().bold(),
        output.display(),
        duration_ms,
        buffer.len(),
        buffer.sample_rate
    );
    Ok(ExitCode::SUCCESS)
}

fn write_silence(output: &Path, duration_ms: u32, sample_rate: u32) -> MixResult<PcmBuffer> {
    let buffer = silence::generate(duration_ms, sample_rate)?;
    wav::store(output, &buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_requested_length() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("silence_500ms.wav");
        run(&out, 500, 8000, false).unwrap();

        let buffer = wav::load(&out).unwrap();
        assert_eq!(buffer.len(), 4000);
        assert!(buffer.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_zero_duration_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("silence.wav");
        assert!(run(&out, 0, 8000, false).is_err());
        assert!(!out.exists());
    }
}
