//! Equivalence classes of sites sharing a shell and a rotation invariant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{LatticeSite, RotationInvariant, ShellIndex};

/// Sites within one shell sharing one rotation invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceClass {
    /// Shell the class was built in.
    pub shell: ShellIndex,
    /// Invariant shared by every member.
    pub invariant: RotationInvariant,
    /// Members, sorted.
    pub sites: Vec<LatticeSite>,
}

impl EquivalenceClass {
    /// Number of members `R`.
    pub fn size(&self) -> usize {
        self.sites.len()
    }
}

/// Partitions the sites of one shell by rotation invariant.
///
/// Classes are returned in increasing invariant order and their members are
/// sorted, so the output does not depend on the order of `sites`.
pub fn classify_shell(shell: ShellIndex, sites: Vec<LatticeSite>) -> Vec<EquivalenceClass> {
    let mut groups: BTreeMap<RotationInvariant, Vec<LatticeSite>> = BTreeMap::new();
    for site in sites {
        debug_assert_eq!(site.shell(), shell);
        groups.entry(site.rotation_invariant()).or_default().push(site);
    }
    groups
        .into_iter()
        .map(|(invariant, mut members)| {
            members.sort();
            EquivalenceClass {
                shell,
                invariant,
                sites: members,
            }
        })
        .collect()
}

/// Unordered multiset of class sizes, stored as `size -> multiplicity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassSizeBag {
    counts: BTreeMap<usize, usize>,
}

impl ClassSizeBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one class of the given size. Empty classes are ignored.
    pub fn insert(&mut self, size: usize) {
        if size > 0 {
            *self.counts.entry(size).or_insert(0) += 1;
        }
    }

    /// Adds every class of `other` to this bag.
    pub fn merge(&mut self, other: &ClassSizeBag) {
        for (&size, &count) in &other.counts {
            *self.counts.entry(size).or_insert(0) += count;
        }
    }

    /// `(size, multiplicity)` pairs in increasing size order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&size, &count)| (size, count))
    }

    /// Number of classes recorded.
    pub fn class_count(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of sites across all classes.
    pub fn site_count(&self) -> usize {
        self.counts.iter().map(|(size, count)| size * count).sum()
    }

    /// Whether no class has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Largest recorded class size.
    pub fn largest(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }
}

impl FromIterator<usize> for ClassSizeBag {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bag = ClassSizeBag::new();
        for size in iter {
            bag.insert(size);
        }
        bag
    }
}

impl<'a> FromIterator<&'a EquivalenceClass> for ClassSizeBag {
    fn from_iter<I: IntoIterator<Item = &'a EquivalenceClass>>(iter: I) -> Self {
        iter.into_iter().map(EquivalenceClass::size).collect()
    }
}
