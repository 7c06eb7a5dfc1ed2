//! Build-heap variants that postpone the recursive part of min-heapify.

use heap_core::{Key, StateSequence, TaggedSwap, Trace};

use crate::heapify::HeapifyVariant;
use crate::loops::{heap_levels, LoopOrder};

/// Swaps of one delayed-recursion heapify call at `i`, applied to `array`.
fn heapify_swaps(array: &mut [Key], i: usize) -> Vec<TaggedSwap> {
    let mut scratch = Trace::new(array);
    HeapifyVariant::DelayedRecursion.apply(array, i, &mut scratch);
    let (_, swaps) = scratch.into_parts();
    swaps
}

/// Delayed recursion flushed per tree level.
///
/// Recursive swaps are queued and emitted once the main loop reaches the
/// leftmost internal node of a level. The returned swaps are in the order a
/// student with this misconception would perform them.
pub fn build_min_heap_dr_level(input: &[Key]) -> Vec<TaggedSwap> {
    let mut array = input.to_vec();
    let levels = heap_levels(array.len());
    // the lowest level holds only leaves
    let mut flush_points = levels
        .iter()
        .rev()
        .skip(1)
        .map(|&(first, _)| first)
        .peekable();

    let mut swaps = Vec::new();
    let mut queue = Vec::new();
    for i in LoopOrder::bottom_up(array.len()) {
        for tagged in heapify_swaps(&mut array, i) {
            if tagged.recursive {
                queue.push(tagged);
            } else {
                swaps.push(tagged);
            }
        }
        if flush_points.peek() == Some(&i) {
            swaps.append(&mut queue);
            flush_points.next();
        }
    }
    swaps.append(&mut queue);
    swaps
}

/// Delayed recursion where every recursive swap is left to the very end.
pub fn build_min_heap_dr_end(input: &[Key]) -> Vec<TaggedSwap> {
    let mut array = input.to_vec();
    let mut swaps = Vec::new();
    let mut queue = Vec::new();
    for i in LoopOrder::bottom_up(array.len()) {
        for tagged in heapify_swaps(&mut array, i) {
            if tagged.recursive {
                queue.push(tagged);
            } else {
                swaps.push(tagged);
            }
        }
    }
    swaps.append(&mut queue);
    swaps
}

/// Correct build-heap traces with a single swap skipped.
///
/// One candidate state sequence per swap of the correct trace: that swap is
/// omitted together with the recursive swaps directly following it, and the
/// remaining swaps are applied unchanged.
pub fn single_skips(input: &[Key]) -> Vec<StateSequence> {
    let mut array = input.to_vec();
    let mut swaps = Vec::new();
    for i in LoopOrder::bottom_up(array.len()) {
        swaps.extend(heapify_swaps(&mut array, i));
    }

    (0..swaps.len())
        .map(|omitted| {
            let mut kept = Vec::with_capacity(swaps.len());
            let mut j = 0;
            while j < swaps.len() {
                if j == omitted {
                    j += 1;
                    while j < swaps.len() && swaps[j].recursive {
                        j += 1;
                    }
                } else {
                    kept.push(swaps[j]);
                    j += 1;
                }
            }
            let (states, _) = Trace::from_tagged_swaps(input, &kept).into_parts();
            states
        })
        .collect()
}
