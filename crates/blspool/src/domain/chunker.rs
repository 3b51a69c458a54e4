//! # Chunker
//!
//! Deterministic partitioning of weighted items into batch chunks.
//!
//! Batch verification of N sets costs roughly N + k pairings with k small,
//! so the marginal speedup plateaus once a chunk holds about 16 sets.
//! Keeping chunks near that size also bounds the cost of a failed batch,
//! which has to be re-verified per job.

/// Greedily group `items` in order into chunks whose total weight reaches
/// `min_weight`. Only the final chunk may fall short, when not enough weight
/// remains. Items are never split; concatenating the chunks yields the input.
///
/// `min_weight` of zero is treated as one.
pub fn chunk_by_weight<T>(
    items: Vec<T>,
    weight: impl Fn(&T) -> usize,
    min_weight: usize,
) -> Vec<Vec<T>> {
    let min_weight = min_weight.max(1);
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    let mut current_weight = 0usize;

    for item in items {
        current_weight += weight(&item);
        current.push(item);
        if current_weight >= min_weight {
            chunks.push(std::mem::take(&mut current));
            current_weight = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(chunks: &[Vec<usize>]) -> Vec<usize> {
        chunks.iter().map(|c| c.iter().sum()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let chunks = chunk_by_weight(Vec::<usize>::new(), |w| *w, 16);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_seventeen_unit_items_split_sixteen_one() {
        let chunks = chunk_by_weight(vec![1usize; 17], |w| *w, 16);
        assert_eq!(weights(&chunks), vec![16, 1]);
    }

    #[test]
    fn test_undersized_tail_forms_single_chunk() {
        let chunks = chunk_by_weight(vec![1usize, 2, 3], |w| *w, 16);
        assert_eq!(weights(&chunks), vec![6]);
    }

    #[test]
    fn test_heavy_item_forms_its_own_chunk() {
        let chunks = chunk_by_weight(vec![40usize, 1, 1], |w| *w, 16);
        assert_eq!(weights(&chunks), vec![40, 2]);
    }

    #[test]
    fn test_items_are_never_split_and_order_is_preserved() {
        let items: Vec<usize> = vec![5, 5, 5, 5, 5, 5, 5];
        let chunks = chunk_by_weight(items.clone(), |w| *w, 16);

        let rejoined: Vec<usize> = chunks.iter().flatten().copied().collect();
        assert_eq!(rejoined, items);
    }

    #[test]
    fn test_every_chunk_but_last_reaches_threshold() {
        // Mixed weights across a few hundred items.
        let items: Vec<usize> = (0..300).map(|i| (i * 7) % 5 + 1).collect();
        for min_weight in [1usize, 2, 16, 33] {
            let chunks = chunk_by_weight(items.clone(), |w| *w, min_weight);

            let totals = weights(&chunks);
            for total in &totals[..totals.len().saturating_sub(1)] {
                assert!(*total >= min_weight);
            }

            let rejoined: Vec<usize> = chunks.iter().flatten().copied().collect();
            assert_eq!(rejoined, items);
        }
    }

    #[test]
    fn test_deterministic() {
        let items: Vec<usize> = (0..64).map(|i| i % 4 + 1).collect();
        let a = chunk_by_weight(items.clone(), |w| *w, 16);
        let b = chunk_by_weight(items, |w| *w, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_min_weight_behaves_as_one() {
        let chunks = chunk_by_weight(vec![1usize, 1], |w| *w, 0);
        assert_eq!(weights(&chunks), vec![1, 1]);
    }
}
