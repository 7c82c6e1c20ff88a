//! Enumeration of lattice sites one shell at a time.

use crate::bound::SearchBound;
use crate::constants::PhysicalConstants;
use crate::geometry::{field_magnitude, LatticeSite, ShellIndex, Sublattice};

/// Shells `N = 0, 1/4, 1/2, ..., 3M` in increasing order.
pub fn shells(bound: SearchBound) -> impl Iterator<Item = ShellIndex> {
    (0..=bound.max_shell_quarters()).map(ShellIndex::from_quarters)
}

/// All sites with `l, m, n ∈ [-M, M]`, not at the origin, lying in `shell`
/// and whose field magnitude exceeds `cutoff_hz`.
///
/// For each sublattice the shell fixes `l + m + n` up to sign, so `n` is
/// solved for rather than scanned.
pub fn enumerate_shell(
    bound: SearchBound,
    cutoff_hz: f64,
    shell: ShellIndex,
    constants: &PhysicalConstants,
) -> Vec<LatticeSite> {
    let max = bound.max_index();
    let quarters = shell.quarters() as i64;
    let signs: &[i64] = if quarters == 0 { &[1] } else { &[1, -1] };

    let mut sites = Vec::new();
    for sublattice in Sublattice::ALL {
        for &sign in signs {
            // 3b + 4(l + m + n) = ±4N
            let numerator = sign * quarters - 3 * sublattice.index();
            if numerator.rem_euclid(4) != 0 {
                continue;
            }
            let sum = numerator / 4;
            for l in -max..=max {
                let lo = (-max).max(sum - l - max);
                let hi = max.min(sum - l + max);
                for m in lo..=hi {
                    let site = LatticeSite::new(sublattice, l, m, sum - l - m);
                    if site.is_origin() {
                        continue;
                    }
                    if field_magnitude(&site, constants) > cutoff_hz {
                        sites.push(site);
                    }
                }
            }
        }
    }
    sites
}
