//! CLI command implementations

pub mod batch;
pub mod concat;
pub mod json_output;
pub mod overlay;
pub mod silence;

use burstmix_audio::MixWarning;
use colored::Colorize;

/// Prints mix warnings in the human output style.
fn print_warnings(warnings: &[MixWarning]) {
    for warning in warnings {
        println!(
            "  {} [{}]: {}",
            "!".yellow(),
            warning.code().yellow(),
            warning.message()
        );
    }
}
