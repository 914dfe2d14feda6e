//! Fixture filename convention.
//!
//! Decoder fixtures carry their ground truth in the file stem as
//! `__`-separated tokens:
//!
//! ```text
//! noisy__code_12star__snr_10__noise_white.wav
//! ^cond  ^expected "12*"  ^SNR    ^noise kind
//! ```
//!
//! `star` and `hash` stand in for `*` and `#`. A `noise_only` token or any
//! token starting with `silence` means the file contains no code.

use std::path::Path;

use serde::Serialize;

use crate::error::{MixError, MixResult};

/// Token separator inside a stem.
pub const TOKEN_SEPARATOR: &str = "__";

const DTMF_SYMBOLS: &str = "0123456789ABCD*#";

/// Builder for conventional fixture names.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureName {
    condition: String,
    code: Option<String>,
    snr_db: Option<f64>,
    noise: Option<String>,
}

impl FixtureName {
    /// Starts a name for the given condition (e.g. `noisy`, `clean`).
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            code: None,
            snr_db: None,
            noise: None,
        }
    }

    /// Sets the expected DTMF code, using `*` and `#` literally.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Records the target SNR.
    pub fn snr_db(mut self, snr_db: f64) -> Self {
        self.snr_db = Some(snr_db);
        self
    }

    /// Records the noise kind (e.g. `white`, `atc`).
    pub fn noise(mut self, noise: impl Into<String>) -> Self {
        self.noise = Some(noise.into());
        self
    }

    /// Builds the file stem.
    pub fn stem(&self) -> MixResult<String> {
        if self.condition.is_empty() || self.condition.contains(TOKEN_SEPARATOR) {
            return Err(MixError::config(format!(
                "invalid fixture condition '{}'",
                self.condition
            )));
        }

        let mut tokens = vec![self.condition.clone()];
        if let Some(code) = &self.code {
            tokens.push(format!("code_{}", encode_code(code)?));
        }
        if let Some(snr) = self.snr_db {
            tokens.push(format!("snr_{}", snr));
        }
        if let Some(noise) = &self.noise {
            if noise.is_empty() || noise.contains(TOKEN_SEPARATOR) {
                return Err(MixError::config(format!("invalid noise label '{}'", noise)));
            }
            tokens.push(format!("noise_{}", noise));
        }
        Ok(tokens.join(TOKEN_SEPARATOR))
    }

    /// Builds the file name with a `.wav` extension.
    pub fn file_name(&self) -> MixResult<String> {
        Ok(format!("{}.wav", self.stem()?))
    }
}

/// Ground truth recovered from a fixture name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureMetadata {
    /// First token of the stem.
    pub condition: String,
    /// Expected decoder output; empty when the file holds no code.
    pub expected_code: String,
    /// Raw SNR token, if any.
    pub snr: Option<String>,
    /// Noise kind token, if any.
    pub noise_type: Option<String>,
}

impl FixtureMetadata {
    /// Parses the stem of `path`. Later tokens override earlier ones.
    pub fn parse(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse_stem(&stem)
    }

    /// Parses a bare stem.
    pub fn parse_stem(stem: &str) -> Self {
        let tokens: Vec<&str> = stem.split(TOKEN_SEPARATOR).collect();
        let condition = tokens.first().copied().unwrap_or_default().to_string();

        let mut expected_code = None;
        let mut snr = None;
        let mut noise_type = None;

        for token in &tokens {
            if let Some(code) = token.strip_prefix("code_") {
                expected_code = Some(decode_code(code));
            } else if let Some(value) = token.strip_prefix("snr_") {
                snr = Some(value.to_string());
            } else if *token == "noise_only" || token.starts_with("silence") {
                expected_code = Some(String::new());
            } else if let Some(kind) = token.strip_prefix("noise_") {
                noise_type = Some(kind.to_string());
            }
        }

        Self {
            condition,
            expected_code: expected_code.unwrap_or_default(),
            snr,
            noise_type,
        }
    }
}

/// Encodes a DTMF code for use in a filename token.
pub fn encode_code(code: &str) -> MixResult<String> {
    let mut out = String::with_capacity(code.len());
    for ch in code.chars() {
        match ch {
            '*' => out.push_str("star"),
            '#' => out.push_str("hash"),
            c if DTMF_SYMBOLS.contains(c) => out.push(c),
            c => {
                return Err(MixError::config(format!(
                    "'{}' is not a DTMF symbol in code '{}'",
                    c, code
                )))
            }
        }
    }
    Ok(out)
}

/// Reverses [`encode_code`].
pub fn decode_code(token: &str) -> String {
    token.replace("star", "*").replace("hash", "#")
}
