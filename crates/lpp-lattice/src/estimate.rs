use lpp_core::{stable_hash_string, ErrorInfo, EstimateProvenance, LppError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bound::{search_bound, verify_bound, SearchBound};
use crate::classes::{classify_shell, ClassSizeBag, EquivalenceClass};
use crate::constants::{PhysicalConstants, CONSTANTS, NATURAL_C13_ABUNDANCE};
use crate::enumerate::{enumerate_shell, shells};
use crate::geometry::ShellIndex;
use crate::probability::pair_probability;

fn default_abundance() -> f64 {
    NATURAL_C13_ABUNDANCE
}

fn default_threads() -> usize {
    1
}

fn default_verify_bound() -> bool {
    true
}

/// The two external inputs of the estimator, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorParameters {
    /// Minimum field magnitude (Hz) a site must exceed.
    pub hyperfine_cutoff_hz: f64,
    /// Probability that a site holds the doping isotope.
    #[serde(default = "default_abundance")]
    pub isotope_abundance: f64,
}

impl EstimatorParameters {
    /// Builds validated parameters from a cutoff in Hz and an abundance fraction.
    pub fn new(hyperfine_cutoff_hz: f64, isotope_abundance: f64) -> Result<Self, LppError> {
        let params = Self {
            hyperfine_cutoff_hz,
            isotope_abundance,
        };
        params.validate()?;
        Ok(params)
    }

    /// Builds parameters from a cutoff in kHz and an optional abundance in
    /// percent, defaulting to the natural C-13 abundance.
    pub fn from_cli_units(
        cutoff_khz: f64,
        abundance_percent: Option<f64>,
    ) -> Result<Self, LppError> {
        let abundance = abundance_percent
            .map(|percent| percent / 100.0)
            .unwrap_or(NATURAL_C13_ABUNDANCE);
        Self::new(cutoff_khz * 1000.0, abundance)
    }

    /// Rejects non-positive cutoffs and abundances outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), LppError> {
        if !self.hyperfine_cutoff_hz.is_finite() || self.hyperfine_cutoff_hz <= 0.0 {
            return Err(LppError::Input(
                ErrorInfo::new(
                    "non-positive-cutoff",
                    "hyperfine cutoff must be positive and finite",
                )
                .with_context("cutoff_hz", self.hyperfine_cutoff_hz.to_string()),
            ));
        }
        if !(0.0..=1.0).contains(&self.isotope_abundance) {
            return Err(LppError::Input(
                ErrorInfo::new(
                    "abundance-out-of-range",
                    "isotope abundance must lie in [0, 1]",
                )
                .with_context("abundance", self.isotope_abundance.to_string())
                .with_hint("the command line takes the abundance in percent"),
            ));
        }
        Ok(())
    }
}

/// Execution knobs for [`estimate`]; none of them change the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateOpts {
    /// Worker threads used to evaluate shells. `1` runs inline.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Scan just outside the search bound for qualifying sites.
    #[serde(default = "default_verify_bound")]
    pub verify_bound: bool,
}

impl Default for EstimateOpts {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            verify_bound: default_verify_bound(),
        }
    }
}

/// Per-shell breakdown, kept for non-empty shells only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellSummary {
    /// Shell label in quarter steps.
    pub quarters: u64,
    /// Shell label `N`.
    pub shell: f64,
    /// Number of qualifying sites in the shell.
    pub sites: usize,
    /// Class sizes in increasing invariant order.
    pub class_sizes: Vec<usize>,
}

/// Full result of an estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEstimate {
    /// Inputs the estimate was computed for.
    pub params: EstimatorParameters,
    /// Search bound `M`.
    pub search_bound: SearchBound,
    /// Non-empty shells in increasing order.
    pub shells: Vec<ShellSummary>,
    /// Multiset of class sizes over all shells.
    pub class_sizes: ClassSizeBag,
    /// Number of equivalence classes.
    pub class_count: usize,
    /// Number of qualifying sites.
    pub site_count: usize,
    /// Probability that at least one Larmor pair is present.
    pub probability: f64,
    /// Schema and build information.
    pub provenance: EstimateProvenance,
    /// SHA-256 over the canonical JSON of the fields above.
    pub estimate_hash: String,
}

/// Enumerates and classifies one shell.
pub fn shell_classes(
    bound: SearchBound,
    cutoff_hz: f64,
    shell: ShellIndex,
    constants: &PhysicalConstants,
) -> Vec<EquivalenceClass> {
    let sites = enumerate_shell(bound, cutoff_hz, shell, constants);
    if sites.is_empty() {
        return Vec::new();
    }
    classify_shell(shell, sites)
}

fn summarize_shell(
    bound: SearchBound,
    cutoff_hz: f64,
    shell: ShellIndex,
    constants: &PhysicalConstants,
) -> Option<ShellSummary> {
    let classes = shell_classes(bound, cutoff_hz, shell, constants);
    if classes.is_empty() {
        return None;
    }
    let class_sizes: Vec<usize> = classes.iter().map(EquivalenceClass::size).collect();
    let sites: usize = class_sizes.iter().sum();
    debug!(
        shell = shell.value(),
        sites,
        classes = class_sizes.len(),
        "classified shell"
    );
    Some(ShellSummary {
        quarters: shell.quarters(),
        shell: shell.value(),
        sites,
        class_sizes,
    })
}

/// Runs the estimator with the process-wide physical constants.
pub fn estimate(
    params: &EstimatorParameters,
    opts: &EstimateOpts,
) -> Result<PairEstimate, LppError> {
    estimate_with_constants(params, opts, &CONSTANTS)
}

/// Runs the estimator: bound, per-shell enumeration and classification,
/// then aggregation of the class-size multiset.
pub fn estimate_with_constants(
    params: &EstimatorParameters,
    opts: &EstimateOpts,
    constants: &PhysicalConstants,
) -> Result<PairEstimate, LppError> {
    params.validate()?;
    let cutoff_hz = params.hyperfine_cutoff_hz;
    let bound = search_bound(cutoff_hz, constants)?;
    info!(bound = bound.max_index(), cutoff_hz, "derived search bound");
    if opts.verify_bound {
        verify_bound(bound, cutoff_hz, constants)?;
    }

    let shell_list: Vec<ShellIndex> = shells(bound).collect();
    let summaries: Vec<ShellSummary> = if opts.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.threads)
            .build()
            .map_err(|err| LppError::Config(ErrorInfo::new("thread_pool", err.to_string())))?;
        pool.install(|| {
            shell_list
                .par_iter()
                .filter_map(|&shell| summarize_shell(bound, cutoff_hz, shell, constants))
                .collect::<Vec<_>>()
        })
    } else {
        shell_list
            .iter()
            .filter_map(|&shell| summarize_shell(bound, cutoff_hz, shell, constants))
            .collect()
    };

    let mut class_sizes = ClassSizeBag::new();
    for summary in &summaries {
        let shell_bag: ClassSizeBag = summary.class_sizes.iter().copied().collect();
        class_sizes.merge(&shell_bag);
    }
    let probability = pair_probability(&class_sizes, params.isotope_abundance);
    if class_sizes.is_empty() {
        warn!(cutoff_hz, "no lattice site exceeds the cutoff");
    }
    info!(
        shells = summaries.len(),
        classes = class_sizes.class_count(),
        sites = class_sizes.site_count(),
        probability,
        "estimate complete"
    );

    let provenance = EstimateProvenance::current();
    let estimate_hash = stable_hash_string(&(
        params,
        bound,
        &summaries,
        &class_sizes,
        probability,
        &provenance,
    ))?;

    Ok(PairEstimate {
        params: *params,
        search_bound: bound,
        class_count: class_sizes.class_count(),
        site_count: class_sizes.site_count(),
        shells: summaries,
        class_sizes,
        probability,
        provenance,
        estimate_hash,
    })
}

/// Probability of at least one Larmor pair for a cutoff in Hz and an
/// abundance fraction.
pub fn larmor_pair_probability(cutoff_hz: f64, abundance: f64) -> Result<f64, LppError> {
    let params = EstimatorParameters::new(cutoff_hz, abundance)?;
    Ok(estimate(&params, &EstimateOpts::default())?.probability)
}
