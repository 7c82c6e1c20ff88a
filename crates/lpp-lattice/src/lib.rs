//! Closed-form estimate of the probability that a randomly C-13 doped
//! diamond lattice contains a Larmor pair: two doped sites whose hyperfine
//! fields at the NV defect have equal magnitude above a cutoff.
//!
//! The pipeline runs [`search_bound`] once, then [`enumerate_shell`] and
//! [`classify_shell`] for every quarter-integer shell, and finally
//! [`pair_probability`] over the collected [`ClassSizeBag`]. [`estimate`]
//! drives all of it and returns a [`PairEstimate`].

pub mod bound;
pub mod classes;
pub mod constants;
pub mod enumerate;
pub mod estimate;
pub mod geometry;
pub mod probability;

pub use bound::{search_bound, verify_bound, SearchBound, MAX_SEARCH_INDEX};
pub use classes::{classify_shell, ClassSizeBag, EquivalenceClass};
pub use constants::{PhysicalConstants, CONSTANTS, NATURAL_C13_ABUNDANCE};
pub use enumerate::{enumerate_shell, shells};
pub use estimate::{
    estimate, estimate_with_constants, larmor_pair_probability, shell_classes, EstimateOpts,
    EstimatorParameters, PairEstimate, ShellSummary,
};
pub use geometry::{
    field_magnitude, hyperfine_field, lattice_basis, reference_axis, LatticeSite,
    RotationInvariant, ShellIndex, Sublattice,
};
pub use probability::{no_pair_probability, pair_probability};
