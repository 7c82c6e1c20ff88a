//! Provenance and schema descriptors attached to estimate reports.

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every serialized estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EstimateProvenance {
    /// Schema of the enclosing report.
    pub schema_version: SchemaVersion,
    /// Source commit (if available) or package version.
    pub commit: String,
}

impl EstimateProvenance {
    /// Provenance for the running build.
    pub fn current() -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            commit: commit_string(),
        }
    }
}

/// Returns the build commit when exported at compile time, else the package version.
pub fn commit_string() -> String {
    option_env!("GIT_COMMIT_HASH")
        .or_else(|| option_env!("VERGEN_GIT_SHA"))
        .map(|value| value.to_string())
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
}
