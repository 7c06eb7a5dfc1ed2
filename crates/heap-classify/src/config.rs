use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use heap_core::{ErrorInfo, HeapError};
use heap_trace::StepPolicy;
use serde::{Deserialize, Serialize};

/// Similarity algorithm comparing candidate and student sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Similarity {
    /// Greedy forward matching of state sequences.
    #[default]
    States,
    /// Longest common subsequence of swap sequences.
    Lcs,
    /// Dynamic time warping of swap sequences, normalized to `[0, 1]`.
    Dtw,
}

impl Similarity {
    /// Name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Similarity::States => "states",
            Similarity::Lcs => "lcs",
            Similarity::Dtw => "dtw",
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Similarity {
    type Err = HeapError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "states" => Ok(Similarity::States),
            "lcs" => Ok(Similarity::Lcs),
            "dtw" => Ok(Similarity::Dtw),
            other => Err(HeapError::Config(
                ErrorInfo::new(
                    "unsupported-similarity",
                    "similarity algorithm is not implemented",
                )
                .with_context("similarity", other)
                .with_hint("use one of states, lcs, dtw"),
            )),
        }
    }
}

/// Options shared by all matchers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Similarity algorithm for non-delayed-recursion candidates.
    #[serde(default)]
    pub similarity: Similarity,
    /// Rescale scores to the Jaccard coefficient of the compared sequences.
    #[serde(default)]
    pub jaccard: bool,
    /// Best scores at or below this value classify as unknown (primary matcher).
    #[serde(default)]
    pub threshold: f64,
    /// 1 attaches score details to every match result.
    #[serde(default)]
    pub verbosity: u8,
    /// Lead over the correct variant required by the partial-match rule.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Handling of recording steps that are not a single exchange.
    #[serde(default)]
    pub step_policy: StepPolicy,
}

fn default_margin() -> f64 {
    2.0
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            similarity: Similarity::default(),
            jaccard: false,
            threshold: 0.0,
            verbosity: 0,
            margin: default_margin(),
            step_policy: StepPolicy::default(),
        }
    }
}

impl MatchOptions {
    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), HeapError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(invalid("threshold", self.threshold.to_string(), "a non-negative number"));
        }
        if self.jaccard && self.threshold >= 1.0 {
            return Err(invalid(
                "threshold",
                self.threshold.to_string(),
                "0 <= threshold < 1 with jaccard",
            ));
        }
        if self.verbosity > 1 {
            return Err(invalid("verbosity", self.verbosity.to_string(), "0 or 1"));
        }
        if !self.margin.is_finite() {
            return Err(invalid("margin", self.margin.to_string(), "a finite number"));
        }
        Ok(())
    }

    /// Parses and validates options from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, HeapError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|err| HeapError::serde("options_yaml", err))?;
        if let Some(name) = value.get("similarity").and_then(serde_yaml::Value::as_str) {
            name.parse::<Similarity>()?;
        }
        let options: MatchOptions =
            serde_yaml::from_value(value).map_err(|err| HeapError::serde("options_yaml", err))?;
        options.validate()?;
        Ok(options)
    }

    /// Parses and validates options from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, HeapError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|err| HeapError::serde("options_json", err))?;
        if let Some(name) = value.get("similarity").and_then(serde_json::Value::as_str) {
            name.parse::<Similarity>()?;
        }
        let options: MatchOptions =
            serde_json::from_value(value).map_err(|err| HeapError::serde("options_json", err))?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a `.json` file, or YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self, HeapError> {
        let text = fs::read_to_string(path).map_err(|err| {
            HeapError::Io(
                ErrorInfo::new("options_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }
}

fn invalid(field: &str, found: String, expected: &str) -> HeapError {
    HeapError::Config(
        ErrorInfo::new("invalid-option", "option value out of range")
            .with_context("field", field)
            .with_context("found", found)
            .with_context("expected", expected),
    )
}
