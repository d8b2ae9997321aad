use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::sentence_aligner::AlignOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Caption track language tag used for variant suffix detection
    /// (e.g. "en" matches `.en.srt`, `.en-orig.srt`, `.en-en.srt`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Cleaning settings
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Alignment settings
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the caption cleaning stage
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CleaningConfig {
    /// Whether redundant language-variant files are collapsed before cleaning
    #[serde(default = "default_true")]
    pub collapse_variants: bool,

    /// Whether rolling-caption text dedup runs on each kept file
    #[serde(default = "default_true")]
    pub dedupe_rolling: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            collapse_variants: true,
            dedupe_rolling: true,
        }
    }
}

/// Settings for the sentence alignment stage
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlignmentConfig {
    /// Minimum sentence span in milliseconds, forced when a resolved end
    /// does not come strictly after its start
    #[serde(default = "default_min_span_ms")]
    pub min_span_ms: u64,

    /// Span used when synthesizing timing for sentences with no timing source
    #[serde(default = "default_synthetic_span_ms")]
    pub synthetic_span_ms: u64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            min_span_ms: default_min_span_ms(),
            synthetic_span_ms: default_synthetic_span_ms(),
        }
    }
}

impl AlignmentConfig {
    /// Convert into the option block the aligner consumes
    pub fn to_align_options(&self) -> AlignOptions {
        AlignOptions {
            min_span_ms: self.min_span_ms,
            synthetic_span_ms: self.synthetic_span_ms,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_min_span_ms() -> u64 {
    500
}

fn default_synthetic_span_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.language.is_empty()
            || !self.language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(anyhow!("Invalid caption language tag: '{}'", self.language));
        }

        if self.alignment.min_span_ms == 0 {
            return Err(anyhow!("alignment.min_span_ms must be greater than zero"));
        }

        if self.alignment.synthetic_span_ms == 0 {
            return Err(anyhow!("alignment.synthetic_span_ms must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            cleaning: CleaningConfig::default(),
            alignment: AlignmentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
