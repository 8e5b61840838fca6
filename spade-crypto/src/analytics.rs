//! Post-decryption analytics over the 0/1 indicator vector, plus the padding
//! helper subjects use to bring variable-length records to the fixed capacity.
//!
//! Everything here is deterministic post-processing of an already-decrypted
//! vector; nothing feeds back into the engine.

use itertools::Itertools;

/// Counts positions that matched the query value.
pub fn count_matches(indicator: &[u64]) -> usize {
    indicator.iter().filter(|&&v| v == 1).count()
}

/// Counts transitions out of a matching position (a match directly followed by
/// a non-match). For a hypnogram query this is "how often did the subject
/// leave this sleep stage".
pub fn count_transitions(indicator: &[u64]) -> usize {
    indicator
        .iter()
        .tuple_windows()
        .filter(|(a, b)| **a == 1 && **b != 1)
        .count()
}

/// Counts maximal runs of consecutive matches.
pub fn count_runs(indicator: &[u64]) -> usize {
    indicator.iter().dedup().filter(|&&v| v == 1).count()
}

/// Truncates or right-pads `data` with the sentinel to exactly `capacity`
/// entries. The engine treats the sentinel as an ordinary plaintext integer.
pub fn pad_to_capacity(sentinel: u64, capacity: usize, data: &[u64]) -> Vec<u64> {
    let mut padded: Vec<u64> = data.iter().take(capacity).copied().collect();
    padded.resize(capacity, sentinel);
    padded
}
