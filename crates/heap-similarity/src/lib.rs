#![deny(missing_docs)]
#![doc = "Similarity engines scoring a simulated build-heap trace against an observed one."]

/// Two-phase matching for deferred recursive swaps.
pub mod delayed;
/// Dynamic time warping over swap sequences.
pub mod dtw;
/// Longest common subsequence with explicit alignment.
pub mod lcs;
/// Greedy forward state matching.
pub mod states;

pub use delayed::delayed_recursion_similarity;
pub use dtw::{dtw_cost, dtw_similarity, max_swap_distance};
pub use lcs::{lcs, lcs_similarity, LcsAlignment};
pub use states::state_similarity;

/// Jaccard coefficient of an overlap score between sequences of the given
/// lengths: `score / (len_a + len_b - score)`.
///
/// Two empty sequences are identical and yield 1.
pub fn jaccard(score: f64, len_a: f64, len_b: f64) -> f64 {
    let union = len_a + len_b - score;
    if union <= 0.0 {
        1.0
    } else {
        score / union
    }
}
