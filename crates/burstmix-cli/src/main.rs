//! burstmix CLI - noisy DTMF decoder fixture generation
//!
//! This binary overlays bursty noise on clean recordings at a calibrated SNR,
//! runs batch plans, and provides small silence/concat utilities.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use burstmix_audio::silence::DEFAULT_SAMPLE_RATE;
use burstmix_audio::SourceCursor;
use burstmix_cli::commands;
use burstmix_cli::commands::overlay::OverlayOptions;

/// burstmix - Bursty noise overlays for DTMF decoder fixtures
#[derive(Parser)]
#[command(name = "burstmix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// How a recorded noise source is read across bursts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CursorArg {
    /// Every burst starts at the beginning of the source
    Restart,
    /// Bursts continue where the previous one stopped
    Continuous,
}

impl From<CursorArg> for SourceCursor {
    fn from(arg: CursorArg) -> Self {
        match arg {
            CursorArg::Restart => SourceCursor::Restart,
            CursorArg::Continuous => SourceCursor::Continuous,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Overlay noise bursts on a clean recording
    Overlay {
        /// Clean mono 16-bit PCM WAV
        #[arg(short, long)]
        base: PathBuf,

        /// Output WAV path
        #[arg(short, long, conflicts_with = "out_dir")]
        out: Option<PathBuf>,

        /// Write into this directory using the fixture naming convention
        #[arg(long, required_unless_present = "out")]
        out_dir: Option<PathBuf>,

        /// Condition token for conventional names
        #[arg(long, default_value = "noisy")]
        condition: String,

        /// Expected DTMF code for conventional names (e.g. "12*#")
        #[arg(long, requires = "out_dir")]
        code: Option<String>,

        /// Target signal-to-noise ratio in dB (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        snr_db: f64,

        /// Recorded noise WAV; synthetic white noise when omitted
        #[arg(long)]
        noise_wav: Option<PathBuf>,

        /// Recorded source cursor policy [default: restart]
        #[arg(long, value_enum, requires = "noise_wav")]
        cursor: Option<CursorArg>,

        /// RNG seed (random and reported when omitted)
        #[arg(long)]
        seed: Option<u32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate every fixture listed in a JSON plan
    Batch {
        /// Path to the plan file
        #[arg(short, long)]
        plan: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write an all-zero recording
    Silence {
        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in milliseconds
        #[arg(long)]
        duration_ms: u32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Join recordings end to end
    Concat {
        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Input WAVs, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Overlay {
            base,
            out,
            out_dir,
            condition,
            code,
            snr_db,
            noise_wav,
            cursor,
            seed,
            json,
        } => {
            let options = OverlayOptions {
                base,
                out,
                out_dir,
                condition,
                code,
                snr_db,
                noise_wav,
                cursor: cursor.map(SourceCursor::from).unwrap_or_default(),
                seed,
            };
            commands::overlay::run(&options, json)
        }
        Commands::Batch { plan, json } => commands::batch::run(&plan, json),
        Commands::Silence {
            output,
            duration_ms,
            sample_rate,
            json,
        } => commands::silence::run(&output, duration_ms, sample_rate, json),
        Commands::Concat {
            output,
            inputs,
            json,
        } => commands::concat::run(&output, &inputs, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_overlay_with_out() {
        let cli = Cli::try_parse_from([
            "burstmix",
            "overlay",
            "--base",
            "clean.wav",
            "--out",
            "noisy.wav",
            "--snr-db",
            "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Overlay {
                base,
                out,
                snr_db,
                noise_wav,
                cursor,
                seed,
                json,
                ..
            } => {
                assert_eq!(base, PathBuf::from("clean.wav"));
                assert_eq!(out, Some(PathBuf::from("noisy.wav")));
                assert_eq!(snr_db, 10.0);
                assert!(noise_wav.is_none());
                assert!(cursor.is_none());
                assert!(seed.is_none());
                assert!(!json);
            }
            _ => panic!("expected overlay command"),
        }
    }

    #[test]
    fn test_cli_parses_negative_snr() {
        let cli = Cli::try_parse_from([
            "burstmix", "overlay", "-b", "a.wav", "-o", "b.wav", "--snr-db", "-6.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Overlay { snr_db, .. } => assert_eq!(snr_db, -6.5),
            _ => panic!("expected overlay command"),
        }
    }

    #[test]
    fn test_cli_parses_recorded_overlay() {
        let cli = Cli::try_parse_from([
            "burstmix",
            "overlay",
            "--base",
            "clean.wav",
            "--out-dir",
            "fixtures",
            "--code",
            "12*#",
            "--snr-db",
            "0",
            "--noise-wav",
            "atc.wav",
            "--cursor",
            "continuous",
            "--seed",
            "42",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Overlay {
                out,
                out_dir,
                condition,
                code,
                noise_wav,
                cursor,
                seed,
                json,
                ..
            } => {
                assert!(out.is_none());
                assert_eq!(out_dir, Some(PathBuf::from("fixtures")));
                assert_eq!(condition, "noisy");
                assert_eq!(code.as_deref(), Some("12*#"));
                assert_eq!(noise_wav, Some(PathBuf::from("atc.wav")));
                assert_eq!(cursor, Some(CursorArg::Continuous));
                assert_eq!(seed, Some(42));
                assert!(json);
            }
            _ => panic!("expected overlay command"),
        }
    }

    #[test]
    fn test_cli_rejects_overlay_without_destination() {
        let result =
            Cli::try_parse_from(["burstmix", "overlay", "--base", "a.wav", "--snr-db", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_both_out_and_out_dir() {
        let result = Cli::try_parse_from([
            "burstmix",
            "overlay",
            "--base",
            "a.wav",
            "--out",
            "b.wav",
            "--out-dir",
            "dir",
            "--snr-db",
            "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_cursor_without_noise_wav() {
        let result = Cli::try_parse_from([
            "burstmix",
            "overlay",
            "--base",
            "a.wav",
            "--out",
            "b.wav",
            "--snr-db",
            "3",
            "--cursor",
            "continuous",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_batch() {
        let cli = Cli::try_parse_from(["burstmix", "batch", "--plan", "plan.json"]).unwrap();
        match cli.command {
            Commands::Batch { plan, json } => {
                assert_eq!(plan, PathBuf::from("plan.json"));
                assert!(!json);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_parses_silence_with_default_rate() {
        let cli = Cli::try_parse_from([
            "burstmix",
            "silence",
            "-o",
            "silence_500ms.wav",
            "--duration-ms",
            "500",
        ])
        .unwrap();
        match cli.command {
            Commands::Silence {
                output,
                duration_ms,
                sample_rate,
                json,
            } => {
                assert_eq!(output, PathBuf::from("silence_500ms.wav"));
                assert_eq!(duration_ms, 500);
                assert_eq!(sample_rate, 8000);
                assert!(!json);
            }
            _ => panic!("expected silence command"),
        }
    }

    #[test]
    fn test_cli_parses_concat() {
        let cli =
            Cli::try_parse_from(["burstmix", "concat", "-o", "ab.wav", "a.wav", "b.wav"]).unwrap();
        match cli.command {
            Commands::Concat { output, inputs, .. } => {
                assert_eq!(output, PathBuf::from("ab.wav"));
                assert_eq!(inputs, vec![PathBuf::from("a.wav"), PathBuf::from("b.wav")]);
            }
            _ => panic!("expected concat command"),
        }
    }

    #[test]
    fn test_cli_rejects_concat_without_inputs() {
        assert!(Cli::try_parse_from(["burstmix", "concat", "-o", "ab.wav"]).is_err());
    }
}
