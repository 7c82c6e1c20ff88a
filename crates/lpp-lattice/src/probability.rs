//! Aggregation of class sizes into the Larmor pair probability.

use crate::classes::ClassSizeBag;

/// Probability that a class of `size` independent sites holds at most one
/// doped site when each is doped with probability `abundance`.
///
/// Evaluates `(1-p)^R + R p (1-p)^(R-1)`, which is finite at `p = 1`.
pub fn no_pair_probability(size: usize, abundance: f64) -> f64 {
    if size <= 1 {
        return 1.0;
    }
    let empty = 1.0 - abundance;
    let exponent = (size - 1) as i32;
    empty.powi(exponent) * (empty + size as f64 * abundance)
}

/// Probability that at least one class holds two or more doped sites.
///
/// Classes are treated as independent. An empty bag yields exactly zero.
pub fn pair_probability(bag: &ClassSizeBag, abundance: f64) -> f64 {
    if bag.is_empty() {
        return 0.0;
    }
    let no_pair: f64 = bag
        .iter()
        .map(|(size, count)| no_pair_probability(size, abundance).powi(count as i32))
        .product();
    (1.0 - no_pair).clamp(0.0, 1.0)
}
