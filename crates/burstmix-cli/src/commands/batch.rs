//! Batch command implementation
//!
//! Runs every fixture in a JSON plan. A failing fixture does not stop the
//! rest; the command exits 1 if any fixture failed.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use burstmix_audio::plan::{execute, BatchItem, BatchPlan, PlannedFixture};
use burstmix_audio::MixResult;

use super::json_output::{error_codes, BatchFixtureResult, BatchOutput, JsonError};
use super::print_warnings;

/// Run the batch command
///
/// # Arguments
/// * `plan_path` - Path to the JSON plan
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every fixture was written, 1 otherwise
pub fn run(plan_path: &Path, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(plan_path)
    } else {
        run_human(plan_path)
    }
}

/// Loads a plan and resolves it against the plan file's directory.
fn load_plan(plan_path: &Path) -> MixResult<Vec<PlannedFixture>> {
    let plan = BatchPlan::load(plan_path)?;
    let plan_dir = plan_path.parent().unwrap_or_else(|| Path::new("."));
    plan.resolve(plan_dir)
}

fn run_human(plan_path: &Path) -> Result<ExitCode> {
    let start = Instant::now();
    let fixtures = load_plan(plan_path)
        .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;

    println!(
        "{} {} fixtures from {}",
        "INFO".blue().bold(),
        fixtures.len(),
        plan_path.display()
    );
    println!();

    let items = execute(fixtures);
    let mut failed = 0;
    for item in &items {
        match &item.result {
            Ok(report) => {
                println!(
                    "  {} {} (seed {}, {} bursts)",
                    "SUCCESS".green(),
                    item.fixture.out.display(),
                    item.fixture.seed,
                    report.bursts.len()
                );
                print_warnings(&report.warnings);
            }
            Err(e) => {
                failed += 1;
                println!(
                    "  {} {} - {}",
                    "FAILED".red(),
                    item.fixture.out.display(),
                    e
                );
            }
        }
    }

    println!();
    println!("{} {}", "Successful:".green().bold(), items.len() - failed);
    println!("{} {}", "Failed:".red().bold(), failed);
    println!(
        "{} {:.2}s",
        "Total time:".dimmed(),
        start.elapsed().as_secs_f64()
    );

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_json(plan_path: &Path) -> Result<ExitCode> {
    let fixtures = match load_plan(plan_path) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            let error = JsonError::new(error_codes::PLAN, e.to_string())
                .with_file(plan_path.display().to_string());
            let output = BatchOutput::plan_failure(error);
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
    };

    let results = execute(fixtures).into_iter().map(to_json_result).collect();
    let output = BatchOutput::from_results(results);
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn to_json_result(item: BatchItem) -> BatchFixtureResult {
    let out = item.fixture.out.display().to_string();
    match item.result {
        Ok(report) => BatchFixtureResult {
            out,
            seed: item.fixture.seed,
            success: true,
            error: None,
            result: Some(report),
        },
        Err(e) => BatchFixtureResult {
            out,
            seed: item.fixture.seed,
            success: false,
            error: Some(JsonError::from(&e)),
            result: None,
        },
    }
}
