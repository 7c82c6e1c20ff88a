//! Diamond lattice geometry and the hyperfine field at each site.
//!
//! Displacements are measured in units of the lattice parameter from the
//! defect site at the origin. The reference axis is the `[111]` bond
//! direction, which is also the 3-fold symmetry axis of the lattice.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::PhysicalConstants;

/// Which of the two face-centred sublattices a site belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sublattice {
    /// Sublattice containing the origin (`b = 0`).
    Origin,
    /// Sublattice shifted by a quarter body diagonal (`b = 1`).
    Offset,
}

impl Sublattice {
    /// Both sublattices in `b` order.
    pub const ALL: [Sublattice; 2] = [Sublattice::Origin, Sublattice::Offset];

    /// The `b` index of the sublattice.
    pub fn index(self) -> i64 {
        match self {
            Sublattice::Origin => 0,
            Sublattice::Offset => 1,
        }
    }
}

/// A candidate lattice position `(b, l, m, n)` relative to the defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LatticeSite {
    /// Sublattice selector.
    pub sublattice: Sublattice,
    /// Coefficient of the first translation generator.
    pub l: i64,
    /// Coefficient of the second translation generator.
    pub m: i64,
    /// Coefficient of the third translation generator.
    pub n: i64,
}

/// Quarter-integer shell label `N = |(3/4)b + l + m + n|`, stored as `4N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShellIndex(u64);

impl ShellIndex {
    /// Builds a shell label from its number of quarter steps.
    pub fn from_quarters(quarters: u64) -> Self {
        Self(quarters)
    }

    /// Number of quarter steps, i.e. `4N`.
    pub fn quarters(self) -> u64 {
        self.0
    }

    /// The shell label `N` itself.
    pub fn value(self) -> f64 {
        self.0 as f64 / 4.0
    }
}

/// `l² + m² + n² - (l+m+n)²/3`, stored as three times its value so that it
/// stays an exact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationInvariant(i64);

impl RotationInvariant {
    /// The scaled integer key `3(l² + m² + n²) - (l+m+n)²`.
    pub fn scaled(self) -> i64 {
        self.0
    }

    /// The real-valued invariant.
    pub fn value(self) -> f64 {
        self.0 as f64 / 3.0
    }
}

impl LatticeSite {
    /// Creates a site from its sublattice and translation indices.
    pub fn new(sublattice: Sublattice, l: i64, m: i64, n: i64) -> Self {
        Self {
            sublattice,
            l,
            m,
            n,
        }
    }

    /// True when all translation indices vanish (the defect or its partner).
    pub fn is_origin(&self) -> bool {
        self.l == 0 && self.m == 0 && self.n == 0
    }

    /// Sum of the translation indices.
    pub fn index_sum(&self) -> i64 {
        self.l + self.m + self.n
    }

    /// Largest absolute translation index.
    pub fn max_index(&self) -> i64 {
        self.l.abs().max(self.m.abs()).max(self.n.abs())
    }

    /// Shell containing this site.
    pub fn shell(&self) -> ShellIndex {
        ShellIndex((3 * self.sublattice.index() + 4 * self.index_sum()).unsigned_abs())
    }

    /// Invariant under the 3-fold rotation about the reference axis.
    pub fn rotation_invariant(&self) -> RotationInvariant {
        let squares = self.l * self.l + self.m * self.m + self.n * self.n;
        let sum = self.index_sum();
        RotationInvariant(3 * squares - sum * sum)
    }

    /// Whether the two sites fall into the same equivalence class, i.e.
    /// would form a Larmor pair if both were occupied.
    pub fn shares_class_with(&self, other: &LatticeSite) -> bool {
        self.shell() == other.shell() && self.rotation_invariant() == other.rotation_invariant()
    }

    /// Displacement from the origin in units of the lattice parameter.
    pub fn displacement(&self) -> Vector3<f64> {
        let basis = lattice_basis();
        basis[0] * self.sublattice.index() as f64
            + basis[1] * self.l as f64
            + basis[2] * self.m as f64
            + basis[3] * self.n as f64
    }
}

/// Sublattice offset followed by the three translation generators.
pub fn lattice_basis() -> [Vector3<f64>; 4] {
    [
        Vector3::new(1.0, 1.0, 1.0) / 4.0,
        Vector3::new(0.0, 1.0, 1.0) / 2.0,
        Vector3::new(1.0, 0.0, 1.0) / 2.0,
        Vector3::new(1.0, 1.0, 0.0) / 2.0,
    ]
}

/// Unit vector along the `[111]` axis.
pub fn reference_axis() -> Vector3<f64> {
    Vector3::new(1.0, 1.0, 1.0) / 3f64.sqrt()
}

/// Hyperfine field vector (Hz) produced at the defect by a nucleus at `site`.
///
/// Returns `None` for the origin, where the dipolar field diverges.
pub fn hyperfine_field(site: &LatticeSite, constants: &PhysicalConstants) -> Option<Vector3<f64>> {
    let r = site.displacement();
    let distance = r.norm();
    if distance == 0.0 {
        return None;
    }
    let r_hat = r / distance;
    let axis = reference_axis();
    let strength = constants.coupling() / distance.powi(3);
    Some((axis - r_hat * (3.0 * r_hat.dot(&axis))) * strength)
}

/// Magnitude of [`hyperfine_field`]; zero at the origin.
pub fn field_magnitude(site: &LatticeSite, constants: &PhysicalConstants) -> f64 {
    hyperfine_field(site, constants)
        .map(|field| field.norm())
        .unwrap_or(0.0)
}
