//! Combining frozen per-worker partial results into the final map.
//!
//! Key sets are independent and the per-key merge rule is associative and
//! commutative, so the merge parallelizes by partitioning the key space:
//! reducer `r` folds every key with `hash(key) % reducers == r` across all
//! partials, and the disjoint shards are stitched together at the end. All
//! partials share one hasher state, assigned at pipeline start, so the
//! partition is consistent.

use crate::errors::{Result, TallyError};
use crate::stats::KeyStats;
use ahash::RandomState;
use hashbrown::HashMap;
use rayon::prelude::*;

/// A frozen per-worker result map, read-only after worker handoff.
pub type PartialResults = HashMap<String, KeyStats, RandomState>;

/// Fold all partial result maps into one, visiting every key exactly once.
/// With `reducers > 1` the fold runs on the rayon pool, one reducer per
/// key-space partition; otherwise it runs sequentially.
///
/// A zero-count entry is unreachable through the accumulator contract and is
/// surfaced as [`TallyError::MergeInconsistency`].
pub fn merge_partials(partials: &[PartialResults], reducers: usize) -> Result<PartialResults> {
    let Some(first) = partials.first() else {
        return Ok(HashMap::with_hasher(RandomState::new()));
    };
    let hasher = first.hasher().clone();

    if reducers <= 1 {
        let mut merged = HashMap::with_hasher(hasher);
        for partial in partials {
            fold_partition(partial, &mut merged, None)?;
        }
        return Ok(merged);
    }

    let shards: Vec<PartialResults> = (0..reducers)
        .into_par_iter()
        .map(|r| {
            let mut shard = HashMap::with_hasher(hasher.clone());
            for partial in partials {
                fold_partition(partial, &mut shard, Some((&hasher, reducers, r)))?;
            }
            Ok(shard)
        })
        .collect::<Result<Vec<_>>>()?;

    let total: usize = shards.iter().map(HashMap::len).sum();
    let mut merged = HashMap::with_capacity_and_hasher(total, hasher);
    for shard in shards {
        // Shards cover disjoint key partitions, so this never overwrites.
        merged.extend(shard);
    }
    Ok(merged)
}

/// Fold the keys of `partial` belonging to the given partition (or all keys
/// when `partition` is `None`) into `target`.
fn fold_partition(
    partial: &PartialResults,
    target: &mut PartialResults,
    partition: Option<(&RandomState, usize, usize)>,
) -> Result<()> {
    for (key, stats) in partial {
        if let Some((hasher, reducers, r)) = partition {
            if hasher.hash_one(key.as_str()) as usize % reducers != r {
                continue;
            }
        }
        if stats.count == 0 {
            return Err(TallyError::MergeInconsistency { key: key.clone() });
        }
        target.entry_ref(key.as_str()).and_modify(|s| s.merge(stats)).or_insert(*stats);
    }
    Ok(())
}
