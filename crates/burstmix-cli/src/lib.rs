//! burstmix CLI library.
//!
//! Command implementations behind the `burstmix` binary. Each command has a
//! colored human mode and a `--json` mode.

pub mod commands;
