use rayon::prelude::*;

use crate::hashset::OrderedHashSet;
use crate::types::{AnaValue, IndexResult};

/// Configuration for one indexing run (component G, §4.5).
pub struct IndexerConfig {
    pub threads: usize,
    /// Hashes to print a trace for as they are visited, for debugging
    /// (§4.7). Tracing never changes the result, only what is logged.
    pub follow: Vec<AnaValue>,
}

/// Runs the parallel confusion-difference indexer.
///
/// For every focus `f` in `foci`, walks outward from `f`'s position in
/// `hash_set` in both directions, recording `|f - h|` for every other
/// hash `h` it passes, as long as that difference is itself a member of
/// `conf_set`. The walk in each direction stops as soon as the running
/// difference exceeds the largest value in `conf_set`, which is sound
/// because hashes are visited in strictly increasing distance from `f`
/// inside a sorted set.
///
/// Storage is asymmetric by direction: walking downward (`h < f`) stores
/// the neighbor `h` under `diff`; walking upward (`h > f`) stores the
/// focus `f` itself. This matches the reference tool's output exactly
/// and must not be "fixed" into symmetry.
pub fn build_index(
    hash_set: &OrderedHashSet,
    foci: &OrderedHashSet,
    conf_set: &OrderedHashSet,
    config: &IndexerConfig,
) -> IndexResult {
    let max_diff = match conf_set.max() {
        Some(m) => m.clone(),
        None => return IndexResult::new(),
    };

    let slices = partition_slices(foci.as_slice(), config.threads.max(1));

    let partials: Vec<IndexResult> = slices
        .par_iter()
        .map(|slice| index_slice(slice, hash_set, conf_set, &max_diff, &config.follow))
        .collect();

    merge_results(partials)
}

/// Splits `items` into `threads` contiguous slices, the last absorbing
/// whatever remainder doesn't divide evenly (§4.5, mirroring `init()`).
fn partition_slices(items: &[AnaValue], threads: usize) -> Vec<&[AnaValue]> {
    if items.is_empty() {
        return Vec::new();
    }
    let threads = threads.min(items.len()).max(1);
    let chunk = items.len() / threads;
    let mut slices = Vec::with_capacity(threads);
    let mut start = 0;
    for i in 0..threads {
        let end = if i == threads - 1 { items.len() } else { start + chunk };
        slices.push(&items[start..end]);
        start = end;
    }
    slices
}

fn index_slice(
    slice: &[AnaValue],
    hash_set: &OrderedHashSet,
    conf_set: &OrderedHashSet,
    max_diff: &AnaValue,
    follow: &[AnaValue],
) -> IndexResult {
    let mut local = IndexResult::new();
    for focus in slice {
        let Some(pos) = hash_set.position(focus) else {
            continue;
        };
        let trace = follow.contains(focus);
        if trace {
            eprintln!("[follow] visiting focus {}", focus);
        }

        // Downward: h < f, diff = f - h, grows as we step further back.
        let mut i = pos;
        while i > 0 {
            i -= 1;
            let h = &hash_set.as_slice()[i];
            let diff = focus - h;
            if &diff > max_diff {
                break;
            }
            if conf_set.contains(&diff) {
                if trace {
                    eprintln!("[follow]   down: {} - {} = {}, storing {}", focus, h, diff, h);
                }
                local.entry(diff).or_default().insert(h.clone());
            }
        }

        // Upward: h > f, diff = h - f, grows as we step further forward.
        let mut j = pos + 1;
        while j < hash_set.len() {
            let h = &hash_set.as_slice()[j];
            let diff = h - focus;
            if &diff > max_diff {
                break;
            }
            if conf_set.contains(&diff) {
                if trace {
                    eprintln!("[follow]   up: {} - {} = {}, storing {}", h, focus, diff, focus);
                }
                local.entry(diff).or_default().insert(focus.clone());
            }
            j += 1;
        }
    }
    local
}

/// Merges per-slice partial results by set union, so the final result is
/// identical regardless of how many threads produced it.
fn merge_results(partials: Vec<IndexResult>) -> IndexResult {
    let mut merged = IndexResult::new();
    for partial in partials {
        for (diff, hashes) in partial {
            merged.entry(diff).or_default().extend(hashes);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u32]) -> OrderedHashSet {
        OrderedHashSet::from_sorted_dedup(values.iter().map(|&v| AnaValue::from(v)).collect())
    }

    fn default_config() -> IndexerConfig {
        IndexerConfig { threads: 1, follow: Vec::new() }
    }

    #[test]
    fn test_worked_example() {
        // hashSet = {10, 17, 25, 40}, focSet = {17, 25}, confSet = {7, 8, 15}
        let hash_set = set(&[10, 17, 25, 40]);
        let foci = set(&[17, 25]);
        let conf_set = set(&[7, 8, 15]);
        let result = build_index(&hash_set, &foci, &conf_set, &default_config());

        // focus 17: down -> |17-10|=7 (store neighbor 10); up -> |25-17|=8 (store focus 17)
        // focus 25: down -> |25-17|=8 (store neighbor 17); up -> |40-25|=15 (store focus 25)
        assert_eq!(result[&AnaValue::from(7u32)].len(), 1);
        assert!(result[&AnaValue::from(7u32)].contains(&AnaValue::from(10u32)));

        // Both focus 17's upward walk and focus 25's downward walk land on
        // the same stored value (17), so the diff-8 bucket has one member.
        let eights = &result[&AnaValue::from(8u32)];
        assert_eq!(eights.len(), 1);
        assert!(eights.contains(&AnaValue::from(17u32)));

        assert!(result[&AnaValue::from(15u32)].contains(&AnaValue::from(25u32)));
    }

    #[test]
    fn test_determinism_independent_of_thread_count() {
        let hash_set = set(&[3, 10, 17, 25, 40, 42, 51, 60]);
        let foci = set(&[17, 25, 42, 51]);
        let conf_set = set(&[1, 7, 8, 9, 15, 16]);

        let single = build_index(
            &hash_set,
            &foci,
            &conf_set,
            &IndexerConfig { threads: 1, follow: Vec::new() },
        );
        let many = build_index(
            &hash_set,
            &foci,
            &conf_set,
            &IndexerConfig { threads: 8, follow: Vec::new() },
        );
        assert_eq!(single, many);
    }

    #[test]
    fn test_diff_above_max_never_stored() {
        let hash_set = set(&[10, 100]);
        let foci = set(&[10]);
        let conf_set = set(&[5]);
        let result = build_index(&hash_set, &foci, &conf_set, &default_config());
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_conf_set_yields_empty_result() {
        let hash_set = set(&[10, 17]);
        let foci = set(&[10]);
        let conf_set = OrderedHashSet::from_sorted_dedup(Vec::new());
        let result = build_index(&hash_set, &foci, &conf_set, &default_config());
        assert!(result.is_empty());
    }

    #[test]
    fn test_partition_slices_last_absorbs_remainder() {
        let items: Vec<AnaValue> = (0..7u32).map(AnaValue::from).collect();
        let slices = partition_slices(&items, 3);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].len(), 2);
        assert_eq!(slices[1].len(), 2);
        assert_eq!(slices[2].len(), 3);
    }
}
