//! Search bound on the translation indices.

use std::f64::consts::PI;

use lpp_core::{ErrorInfo, LppError};
use serde::{Deserialize, Serialize};

use crate::constants::PhysicalConstants;
use crate::geometry::{field_magnitude, LatticeSite, Sublattice};

/// Largest bound accepted before the enumeration is considered runaway.
pub const MAX_SEARCH_INDEX: i64 = 1 << 16;

/// Admissible range `[-M, M]` for each of `l`, `m`, `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchBound(i64);

impl SearchBound {
    /// Wraps an explicit bound, mainly for tests and benchmarks.
    pub fn new(max_index: i64) -> Self {
        Self(max_index.max(0))
    }

    /// The bound `M`.
    pub fn max_index(self) -> i64 {
        self.0
    }

    /// Largest shell label searched, in quarter steps (`4 * 3M`).
    pub fn max_shell_quarters(self) -> u64 {
        12 * self.0 as u64
    }
}

/// Solves `2|K| / r³ = cutoff` for `r` with a generous prefactor and rounds
/// to the nearest integer.
///
/// The field magnitude is at most `2|K| / |r|³`, so the true radius is
/// `(2|K| / cutoff)^(1/3)`; the bound below is larger by a factor of
/// `4^(1/3)` before rounding.
pub fn search_bound(
    cutoff_hz: f64,
    constants: &PhysicalConstants,
) -> Result<SearchBound, LppError> {
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
        return Err(LppError::Input(
            ErrorInfo::new("non-positive-cutoff", "hyperfine cutoff must be positive and finite")
                .with_context("cutoff_hz", cutoff_hz.to_string()),
        ));
    }
    let radius = (2.0 * constants.gyromagnetic_product().abs()
        / (PI * constants.lattice_constant.powi(3) * cutoff_hz))
        .cbrt();
    let rounded = (radius + 0.5).floor();
    if !rounded.is_finite() || rounded > MAX_SEARCH_INDEX as f64 {
        return Err(LppError::Bound(
            ErrorInfo::new("bound-too-large", "search bound exceeds supported range")
                .with_context("cutoff_hz", cutoff_hz.to_string())
                .with_context("radius", radius.to_string())
                .with_hint("raise the hyperfine cutoff"),
        ));
    }
    Ok(SearchBound(rounded as i64))
}

/// Checks that no site on the cube surface `max(|l|,|m|,|n|) = M + 1`
/// exceeds the cutoff. A qualifying site there means the enumeration would
/// have been truncated.
pub fn verify_bound(
    bound: SearchBound,
    cutoff_hz: f64,
    constants: &PhysicalConstants,
) -> Result<(), LppError> {
    let edge = bound.max_index() + 1;
    for l in -edge..=edge {
        for m in -edge..=edge {
            let on_face = l.abs() == edge || m.abs() == edge;
            let ns: Vec<i64> = if on_face {
                (-edge..=edge).collect()
            } else {
                vec![-edge, edge]
            };
            for n in ns {
                for sublattice in Sublattice::ALL {
                    let site = LatticeSite::new(sublattice, l, m, n);
                    let magnitude = field_magnitude(&site, constants);
                    if magnitude > cutoff_hz {
                        return Err(LppError::Bound(
                            ErrorInfo::new(
                                "bound-truncated",
                                "a site beyond the search bound exceeds the cutoff",
                            )
                            .with_context("bound", bound.max_index().to_string())
                            .with_context("site", format!("{site:?}"))
                            .with_context("magnitude_hz", magnitude.to_string()),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
