//! Overlay command implementation
//!
//! Mixes bursty noise onto one clean recording and writes the fixture.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use burstmix_audio::fixture::FixtureName;
use burstmix_audio::rng::create_rng;
use burstmix_audio::{generate_fixture, FixtureReport, FixtureRequest, SourceCursor};

use super::json_output::{error_codes, JsonError, OverlayOutput};
use super::print_warnings;

/// Noise kind recorded in generated names for synthetic noise.
const WHITE_NOISE_LABEL: &str = "white";

/// Options for a single overlay run.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    /// Clean base recording.
    pub base: PathBuf,
    /// Explicit output path.
    pub out: Option<PathBuf>,
    /// Directory for a conventionally named output.
    pub out_dir: Option<PathBuf>,
    /// Condition token for generated names.
    pub condition: String,
    /// Expected DTMF code for generated names.
    pub code: Option<String>,
    /// Target SNR in dB.
    pub snr_db: f64,
    /// Recorded noise source; synthetic noise when absent.
    pub noise_wav: Option<PathBuf>,
    /// Recorded-source cursor policy.
    pub cursor: SourceCursor,
    /// RNG seed; drawn at random when absent.
    pub seed: Option<u32>,
}

impl OverlayOptions {
    /// Builds the library request for these options.
    pub fn request(&self) -> FixtureRequest {
        match &self.noise_wav {
            Some(path) => FixtureRequest::recorded(self.snr_db, path),
            None => FixtureRequest::synthetic(self.snr_db),
        }
        .with_cursor(self.cursor)
    }

    /// Noise kind token: `white`, or the stem of the recorded source.
    pub fn noise_label(&self) -> String {
        match &self.noise_wav {
            Some(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "recorded".to_string()),
            None => WHITE_NOISE_LABEL.to_string(),
        }
    }

    /// Resolves where the fixture is written.
    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(out) = &self.out {
            return Ok(out.clone());
        }
        let dir = self
            .out_dir
            .as_ref()
            .context("Either --out or --out-dir must be provided")?;

        let mut name = FixtureName::new(&self.condition);
        if let Some(code) = &self.code {
            name = name.code(code);
        }
        let file_name = name
            .snr_db(self.snr_db)
            .noise(self.noise_label())
            .file_name()
            .context("Failed to build fixture name")?;
        Ok(dir.join(file_name))
    }
}

/// Run the overlay command
///
/// # Arguments
/// * `options` - Inputs, output naming and mix settings
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &OverlayOptions, json_output: bool) -> Result<ExitCode> {
    let seed = options.seed.unwrap_or_else(rand::random);
    if json_output {
        run_json(options, seed)
    } else {
        run_human(options, seed)
    }
}

fn run_human(options: &OverlayOptions, seed: u32) -> Result<ExitCode> {
    let out = options.output_path()?;

    println!("{} {}", "Base:".cyan().bold(), options.base.display());
    match &options.noise_wav {
        Some(path) => println!(
            "{} {} ({})",
            "Noise:".cyan().bold(),
            path.display(),
            cursor_label(options.cursor).dimmed()
        ),
        None => println!("{} {}", "Noise:".cyan().bold(), WHITE_NOISE_LABEL),
    }
    println!("{} {} dB", "Target SNR:".cyan().bold(), options.snr_db);
    println!("{} {}", "Seed:".cyan().bold(), seed);

    let report = generate(options, &out, seed)?;

    print_warnings(&report.warnings);
    print_report(&report);
    Ok(ExitCode::SUCCESS)
}

fn run_json(options: &OverlayOptions, seed: u32) -> Result<ExitCode> {
    let out = match options.output_path() {
        Ok(out) => out,
        Err(e) => {
            let error = JsonError::new(error_codes::OUTPUT_PATH, format!("{:#}", e));
            let output = OverlayOutput::failure(seed, vec![error]);
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
    };

    let mut rng = create_rng(seed);
    let (output, code) = match generate_fixture(&options.base, &out, &options.request(), &mut rng)
    {
        Ok(report) => (OverlayOutput::success(seed, report), ExitCode::SUCCESS),
        Err(e) => (
            OverlayOutput::failure(seed, vec![JsonError::from(&e)]),
            ExitCode::from(1),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

fn generate(options: &OverlayOptions, out: &Path, seed: u32) -> Result<FixtureReport> {
    let mut rng = create_rng(seed);
    generate_fixture(&options.base, out, &options.request(), &mut rng)
        .with_context(|| format!("Failed to generate fixture from {}", options.base.display()))
}

fn cursor_label(cursor: SourceCursor) -> &'static str {
    match cursor {
        SourceCursor::Restart => "restart cursor",
        SourceCursor::Continuous => "continuous cursor",
    }
}

fn print_report(report: &FixtureReport) {
    println!(
        "{} {} of {} bursts placed",
        "Bursts:".dimmed(),
        report.bursts.len(),
        report.requested_bursts
    );
    for burst in &report.bursts {
        println!("  {}..{} ({} ms)", burst.start, burst.end, burst.duration_ms);
    }
    println!(
        "{} base {:.1}, noise {:.1}, scale {:.4}",
        "RMS:".dimmed(),
        report.base_rms,
        report.noise_rms,
        report.scale
    );
    println!("{} {}", "PCM hash:".dimmed(), &report.pcm_hash[..16]);
    println!(
        "\n{} {} ({} samples @ {} Hz)",
        "Wrote".green().bold(),
        report.output_path.display(),
        report.num_samples,
        report.sample_rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use burstmix_audio::{wav, NoiseMode, PcmBuffer};
    use pretty_assertions::assert_eq;

    fn options() -> OverlayOptions {
        OverlayOptions {
            base: PathBuf::from("clean/code_123.wav"),
            out: None,
            out_dir: Some(PathBuf::from("tests")),
            condition: "noisy".to_string(),
            code: Some("123".to_string()),
            snr_db: 10.0,
            noise_wav: None,
            cursor: SourceCursor::Restart,
            seed: Some(1),
        }
    }

    #[test]
    fn test_synthetic_request() {
        let request = options().request();
        assert_eq!(request, FixtureRequest::synthetic(10.0));
    }

    #[test]
    fn test_recorded_request_keeps_cursor() {
        let opts = OverlayOptions {
            noise_wav: Some(PathBuf::from("noise/atc.wav")),
            cursor: SourceCursor::Continuous,
            ..options()
        };
        let request = opts.request();
        assert_eq!(request.mode, NoiseMode::Recorded);
        assert_eq!(request.noise_source, Some(PathBuf::from("noise/atc.wav")));
        assert_eq!(request.cursor, SourceCursor::Continuous);
        assert_eq!(opts.noise_label(), "atc");
    }

    #[test]
    fn test_output_path_prefers_explicit_out() {
        let opts = OverlayOptions {
            out: Some(PathBuf::from("x.wav")),
            ..options()
        };
        assert_eq!(opts.output_path().unwrap(), PathBuf::from("x.wav"));
    }

    #[test]
    fn test_output_path_follows_naming_convention() {
        let path = options().output_path().unwrap();
        let expected = FixtureName::new("noisy")
            .code("123")
            .snr_db(10.0)
            .noise("white")
            .file_name()
            .unwrap();
        assert_eq!(path, Path::new("tests").join(expected));
    }

    #[test]
    fn test_output_path_requires_a_destination() {
        let opts = OverlayOptions {
            out_dir: None,
            ..options()
        };
        assert!(opts.output_path().is_err());
    }

    #[test]
    fn test_run_writes_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.wav");
        let samples = (0..8000).map(|i| ((i % 40) * 200 - 4000) as i16).collect();
        wav::store(&base, &PcmBuffer::new(samples, 8000)).unwrap();

        let opts = OverlayOptions {
            base,
            out: None,
            out_dir: Some(dir.path().join("out")),
            ..options()
        };
        run(&opts, true).unwrap();

        let written = wav::load(&opts.output_path().unwrap()).unwrap();
        assert_eq!(written.len(), 8000);
    }

    #[test]
    fn test_run_human_propagates_missing_base() {
        let dir = tempfile::tempdir().unwrap();
        let opts = OverlayOptions {
            base: dir.path().join("missing.wav"),
            out: Some(dir.path().join("out.wav")),
            ..options()
        };
        assert!(run(&opts, false).is_err());
        assert!(!dir.path().join("out.wav").exists());
    }
}
