//! Fuzz target for the chunker laws: item order is preserved, nothing is
//! dropped or duplicated, and every chunk except possibly the last reaches
//! the threshold.

#![no_main]

use blspool::domain::chunker::chunk_by_weight;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct ChunkerFuzzInput {
    weights: Vec<u8>,
    min_weight: u16,
}

fuzz_target!(|input: ChunkerFuzzInput| {
    let items: Vec<usize> = input.weights.iter().map(|&w| w as usize).collect();
    let min_weight = input.min_weight as usize;

    let chunks = chunk_by_weight(items.clone(), |w| *w, min_weight);

    let rejoined: Vec<usize> = chunks.iter().flatten().copied().collect();
    assert_eq!(rejoined, items);

    let effective_min = min_weight.max(1);
    for chunk in chunks.iter().take(chunks.len().saturating_sub(1)) {
        let total: usize = chunk.iter().sum();
        assert!(total >= effective_min);
    }

    for chunk in &chunks {
        assert!(!chunk.is_empty());
    }
});
