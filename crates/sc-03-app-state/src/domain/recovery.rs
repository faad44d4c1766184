//! # Startup Recovery
//!
//! A crash between two store commits for the same block leaves the stores at
//! different versions. Before new blocks are applied, every store is brought
//! back to the newest version all of them have committed.
//!
//! ## Algorithm
//!
//! 1. Read each store's tip. All equal: nothing to do.
//! 2. An empty store next to non-empty ones cannot be aligned: fail.
//! 3. For every pair of differing tips, one tip must appear in the other
//!    store's history (one store is merely ahead). Otherwise the histories
//!    diverged: fail.
//! 4. The common version is the tip found in every history, i.e. the tip of
//!    the store that is furthest behind.
//! 5. Below the common version all histories must agree.
//! 6. Roll back every store whose tip differs from the common version.
//!
//! Steps 1-5 are pure and live here; step 6 is driven by `MultiStoreState`.

use super::errors::StateError;
use shared_types::{is_null_version, short_hex, VersionId};

// =============================================================================
// RECOVERY PLAN
// =============================================================================

/// What recovery has to do to align the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPlan {
    pub common_version: VersionId,
    /// Stores to roll back to `common_version`, ascending.
    pub rollbacks: Vec<usize>,
}

/// Computes the recovery plan for stores at `tips`.
///
/// `histories[i]` holds store `i`'s committed versions newest first, so
/// `histories[i][0] == tips[i]` for non-empty stores. Histories are only
/// consulted when the tips differ.
pub fn plan_recovery(
    tips: &[VersionId],
    histories: &[Vec<VersionId>],
) -> Result<RecoveryPlan, StateError> {
    let Some(first) = tips.first() else {
        return Err(StateError::NoStores);
    };
    if tips.iter().all(|tip| tip == first) {
        return Ok(RecoveryPlan {
            common_version: *first,
            rollbacks: Vec::new(),
        });
    }

    if let Some(empty) = tips.iter().position(is_null_version) {
        return Err(StateError::Consistency(format!(
            "store {} has no history while others do",
            empty
        )));
    }

    check_pairwise_related(tips, histories)?;

    let common_version = *tips
        .iter()
        .find(|tip| histories.iter().all(|history| history.contains(*tip)))
        .ok_or_else(|| {
            StateError::Consistency("no tip is present in every store history".into())
        })?;

    check_shared_ancestry(&common_version, histories)?;

    let rollbacks = tips
        .iter()
        .enumerate()
        .filter(|(_, tip)| **tip != common_version)
        .map(|(index, _)| index)
        .collect();

    Ok(RecoveryPlan {
        common_version,
        rollbacks,
    })
}

fn check_pairwise_related(
    tips: &[VersionId],
    histories: &[Vec<VersionId>],
) -> Result<(), StateError> {
    for i in 0..tips.len() {
        for j in (i + 1)..tips.len() {
            if tips[i] == tips[j] {
                continue;
            }
            let related = histories[j].contains(&tips[i]) || histories[i].contains(&tips[j]);
            if !related {
                return Err(StateError::Consistency(format!(
                    "stores {} and {} diverged: tips {} and {} are unrelated",
                    i,
                    j,
                    short_hex(&tips[i]),
                    short_hex(&tips[j])
                )));
            }
        }
    }
    Ok(())
}

/// Histories must list the same versions from `common` downwards, as far as
/// the shortest of them reaches.
fn check_shared_ancestry(common: &VersionId, histories: &[Vec<VersionId>]) -> Result<(), StateError> {
    let tails: Vec<&[VersionId]> = histories
        .iter()
        .map(|history| match history.iter().position(|v| v == common) {
            Some(at) => &history[at..],
            None => &[][..],
        })
        .collect();

    let depth = tails.iter().map(|tail| tail.len()).min().unwrap_or(0);
    let Some(reference) = tails.first() else {
        return Ok(());
    };
    for (index, tail) in tails.iter().enumerate().skip(1) {
        if tail[..depth] != reference[..depth] {
            return Err(StateError::Consistency(format!(
                "store {} disagrees with store 0 below version {}",
                index,
                short_hex(common)
            )));
        }
    }
    Ok(())
}
