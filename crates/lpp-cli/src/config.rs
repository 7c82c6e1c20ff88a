use std::fs;
use std::path::Path;

use lpp_core::{from_yaml_slice, ErrorInfo, LppError};
use lpp_lattice::EstimateOpts;
use serde::{Deserialize, Serialize};

/// How the result is written to standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The bare probability.
    #[default]
    Plain,
    /// The full canonical JSON report.
    Json,
}

/// YAML-configurable defaults for a `pair-compute` invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Execution knobs forwarded to the estimator.
    #[serde(default)]
    pub estimate: EstimateOpts,
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl CliConfig {
    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self, LppError> {
        let bytes = fs::read(path).map_err(|err| {
            LppError::Config(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_yaml_slice(&bytes)
    }
}
