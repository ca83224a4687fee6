//! The Collection Differ.
//!
//! Given a desired and an observed keyed collection, [`diff`] partitions
//! the pair into matched keys, items that only exist in the desired
//! collection (`to_add`), and items that only exist in the observed one
//! (`to_remove`). This replaces the per-resource nested-loop comparisons
//! the surrounding system would otherwise repeat for every sub-resource
//! kind.
//!
//! # Invariants
//!
//! - `matched ∪ keys(to_add) = keys(desired)`
//! - `matched ∪ keys(to_remove) = keys(observed)`
//! - the three sets are pairwise disjoint
//! - `to_add` / `to_remove` preserve the relative order of their source

use crate::error::{Error, Result, Side};
use crate::item::Keyed;
use std::collections::{HashMap, HashSet};

/// The outcome of diffing a desired collection against an observed one.
///
/// A plan is built fresh for one reconciliation cycle and discarded once
/// the cycle's operations are issued; it holds no state across cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan<T: Keyed> {
    /// Keys present on both sides, in desired order
    pub matched: Vec<T::Key>,
    /// Desired items whose key is absent from the observed side
    pub to_add: Vec<T>,
    /// Observed items whose key is absent from the desired side
    pub to_remove: Vec<T>,
}

impl<T: Keyed> ReconcilePlan<T> {
    /// True when the observed collection already matches the desired one
    /// and the cycle can short-circuit without any remote call.
    pub fn is_converged(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff a desired collection against an observed one.
///
/// Runs in linear time: the observed side is indexed by key, the desired
/// side is scanned in order, then the observed side is scanned for
/// leftovers. Pure and deterministic; safe to call repeatedly.
///
/// Fails with [`Error::DuplicateKey`] if either side contains the same
/// key twice - duplicate desired keys are a caller configuration error,
/// duplicate observed keys mean the remote reported nonsense.
pub fn diff<T>(desired: &[T], observed: &[T]) -> Result<ReconcilePlan<T>>
where
    T: Keyed + Clone,
{
    // Key -> item index for the observed side. `false` marks "not yet
    // claimed by a desired item".
    let mut observed_index: HashMap<&T::Key, bool> = HashMap::with_capacity(observed.len());
    for item in observed {
        if observed_index.insert(item.key(), false).is_some() {
            return Err(Error::DuplicateKey {
                key: item.key().to_string(),
                side: Side::Observed,
            });
        }
    }

    let mut matched = Vec::new();
    let mut to_add = Vec::new();
    let mut seen_desired: HashSet<&T::Key> = HashSet::with_capacity(desired.len());

    for item in desired {
        if !seen_desired.insert(item.key()) {
            return Err(Error::DuplicateKey {
                key: item.key().to_string(),
                side: Side::Desired,
            });
        }
        match observed_index.get_mut(item.key()) {
            Some(claimed) => {
                *claimed = true;
                matched.push(item.key().clone());
            }
            None => to_add.push(item.clone()),
        }
    }

    let to_remove = observed
        .iter()
        .filter(|item| !observed_index[item.key()])
        .cloned()
        .collect();

    Ok(ReconcilePlan {
        matched,
        to_add,
        to_remove,
    })
}
