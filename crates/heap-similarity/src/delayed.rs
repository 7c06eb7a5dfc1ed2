use heap_core::{Swap, TaggedSwap};

use crate::lcs::lcs;

/// Matches a student's swaps against a candidate whose recursive swaps may
/// have been deferred.
///
/// Non-recursive candidate swaps are aligned first by LCS, with recursive
/// swaps masked out. Each recursive candidate swap is then searched for,
/// in candidate order, among the student swaps that come after the last
/// aligned non-recursive swap (or the previous recursive hit). A student
/// swap already aligned to a non-recursive candidate may match again.
///
/// Returns the number of matched candidate swaps, or 0 when the matched
/// student positions never decrease along the candidate: such a student
/// recursed immediately and shows no deferral.
pub fn delayed_recursion_similarity(candidate: &[TaggedSwap], student: &[Swap]) -> usize {
    let masked: Vec<Option<Swap>> = candidate
        .iter()
        .map(|tagged| (!tagged.recursive).then_some(tagged.swap))
        .collect();
    let observed: Vec<Option<Swap>> = student.iter().copied().map(Some).collect();
    let alignment = lcs(&masked, &observed);

    let mut position: Vec<Option<usize>> = vec![None; candidate.len()];
    for &(c, s) in &alignment.matches {
        position[c] = Some(s);
    }

    let mut matched = alignment.length;
    // no recursive swap can precede the first aligned non-recursive one
    let mut cursor: Option<usize> = None;
    for (c, tagged) in candidate.iter().enumerate() {
        if !tagged.recursive {
            if let Some(s) = position[c] {
                cursor = Some(s + 1);
            }
            continue;
        }
        let Some(start) = cursor else { continue };
        let hit = (start..student.len()).find(|&s| student[s] == tagged.swap);
        if let Some(s) = hit {
            position[c] = Some(s);
            matched += 1;
            cursor = Some(s + 1);
        }
    }

    let deferred = position
        .iter()
        .flatten()
        .zip(position.iter().flatten().skip(1))
        .any(|(earlier, later)| later < earlier);
    if deferred {
        matched
    } else {
        0
    }
}
