use std::fmt;

use heap_core::{HeapError, Key, StateSequence, Swap, TaggedSwap};
use heap_sim::{
    build_heap_variant, build_min_heap_dr_end, build_min_heap_dr_level, single_skips,
    HeapifyVariant, LoopVariant,
};
use heap_trace::states_from_swaps;
use serde::{Deserialize, Serialize};

/// Algorithm variants of the replicated misconception study, in
/// descending order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplicatedVariant {
    /// Textbook build-heap.
    Correct,
    /// Right child preferred on equal keys.
    WrongDuplicate,
    /// Heapify-with-father, left child first.
    HeapifyWithFatherLr,
    /// Heapify-with-father, left child first, descending.
    HeapifyWithFatherLrRecursive,
    /// Heapify-with-father, right child first.
    HeapifyWithFatherRl,
    /// Heapify-with-father, right child first, descending.
    HeapifyWithFatherRlRecursive,
    /// Levels visited left to right.
    LeftToRight,
    /// Heapify without recursion.
    NoRecursion,
    /// Correct trace with one swap left out.
    SingleSkip,
    /// Main loop from the root downwards.
    TopDown,
    /// Recursive swaps deferred per level or to the end.
    DelayedRecursion,
    /// Subtree minimum moved up in one swap, top-down.
    SmallestInstantlyUp,
    /// Subtree minimum moved up in one swap, zigzag top-down.
    Other,
    /// Max-heap built instead of a min-heap.
    MaximumHeap,
}

impl ReplicatedVariant {
    /// All variants in preference order.
    pub const ALL: [ReplicatedVariant; 14] = [
        ReplicatedVariant::Correct,
        ReplicatedVariant::WrongDuplicate,
        ReplicatedVariant::HeapifyWithFatherLr,
        ReplicatedVariant::HeapifyWithFatherLrRecursive,
        ReplicatedVariant::HeapifyWithFatherRl,
        ReplicatedVariant::HeapifyWithFatherRlRecursive,
        ReplicatedVariant::LeftToRight,
        ReplicatedVariant::NoRecursion,
        ReplicatedVariant::SingleSkip,
        ReplicatedVariant::TopDown,
        ReplicatedVariant::DelayedRecursion,
        ReplicatedVariant::SmallestInstantlyUp,
        ReplicatedVariant::Other,
        ReplicatedVariant::MaximumHeap,
    ];

    /// Name reported by the study; the four heapify-with-father variants share one.
    pub fn name(self) -> &'static str {
        match self {
            ReplicatedVariant::Correct => "Correct",
            ReplicatedVariant::WrongDuplicate => "Wrong-Duplicate",
            ReplicatedVariant::HeapifyWithFatherLr
            | ReplicatedVariant::HeapifyWithFatherLrRecursive
            | ReplicatedVariant::HeapifyWithFatherRl
            | ReplicatedVariant::HeapifyWithFatherRlRecursive => "Heapify-with-Father",
            ReplicatedVariant::LeftToRight => "Left-to-Right",
            ReplicatedVariant::NoRecursion => "No-Recursion",
            ReplicatedVariant::SingleSkip => "Single-Skip",
            ReplicatedVariant::TopDown => "Top-Down",
            ReplicatedVariant::DelayedRecursion => "Delayed-Recursion",
            ReplicatedVariant::SmallestInstantlyUp => "Smallest-Instantly-Up",
            ReplicatedVariant::Other => "Other",
            ReplicatedVariant::MaximumHeap => "Maximum-Heap",
        }
    }

    fn simulated(self) -> Option<(LoopVariant, HeapifyVariant)> {
        let correct = LoopVariant::CORRECT;
        let level_lr = LoopVariant::ALL[3];
        let top_down = LoopVariant::ALL[4];
        let zigzag_top_down_rl = LoopVariant::ALL[6];
        let pair = match self {
            ReplicatedVariant::Correct => (correct, HeapifyVariant::Correct),
            ReplicatedVariant::WrongDuplicate => (correct, HeapifyVariant::WrongDuplicate),
            ReplicatedVariant::HeapifyWithFatherLr => {
                (correct, HeapifyVariant::HeapifyWithFatherLr)
            }
            ReplicatedVariant::HeapifyWithFatherLrRecursive => {
                (correct, HeapifyVariant::HeapifyWithFatherLrRecursive)
            }
            ReplicatedVariant::HeapifyWithFatherRl => {
                (correct, HeapifyVariant::HeapifyWithFatherRl)
            }
            ReplicatedVariant::HeapifyWithFatherRlRecursive => {
                (correct, HeapifyVariant::HeapifyWithFatherRlRecursive)
            }
            ReplicatedVariant::LeftToRight => (level_lr, HeapifyVariant::Correct),
            ReplicatedVariant::NoRecursion => (correct, HeapifyVariant::NoRecursion),
            ReplicatedVariant::TopDown => (top_down, HeapifyVariant::Correct),
            ReplicatedVariant::SmallestInstantlyUp => {
                (top_down, HeapifyVariant::SmallestInstantlyUp)
            }
            ReplicatedVariant::Other => (zigzag_top_down_rl, HeapifyVariant::SmallestInstantlyUp),
            ReplicatedVariant::MaximumHeap => (correct, HeapifyVariant::MaxHeapify),
            ReplicatedVariant::SingleSkip | ReplicatedVariant::DelayedRecursion => return None,
        };
        Some(pair)
    }

    /// Candidate state sequences of the variant for `input`.
    ///
    /// Single-skip yields one sequence per omitted swap, delayed recursion
    /// its per-level and at-end builds, every other variant one sequence.
    pub fn candidates(self, input: &[Key]) -> Result<Vec<StateSequence>, HeapError> {
        match self {
            ReplicatedVariant::SingleSkip => Ok(single_skips(input)),
            ReplicatedVariant::DelayedRecursion => Ok(vec![
                states_from_swaps(input, &untagged(&build_min_heap_dr_level(input))),
                states_from_swaps(input, &untagged(&build_min_heap_dr_end(input))),
            ]),
            simulated => {
                let Some((loop_variant, heapify)) = simulated.simulated() else {
                    return Ok(Vec::new());
                };
                let trace = build_heap_variant(&loop_variant.order, heapify, input)?;
                let (states, _) = trace.into_parts();
                Ok(vec![states])
            }
        }
    }
}

fn untagged(swaps: &[TaggedSwap]) -> Vec<Swap> {
    swaps.iter().map(|tagged| tagged.swap).collect()
}

impl fmt::Display for ReplicatedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the student's trace matched a variant in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completeness {
    /// Every state matched.
    Finished,
    /// Only a prefix of the variant was followed, or nothing matched.
    Unfinished,
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completeness::Finished => f.write_str("Finished"),
            Completeness::Unfinished => f.write_str("Unfinished"),
        }
    }
}

/// Outcome of the replicated-study matcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplicatedMatch {
    /// Matched variant, `None` for unknown traces.
    pub variant: Option<ReplicatedVariant>,
    /// Completeness of the match.
    pub completeness: Completeness,
}

impl ReplicatedMatch {
    /// Reported variant name, "Unknown" when nothing matched.
    pub fn name(&self) -> &'static str {
        self.variant.map_or("Unknown", ReplicatedVariant::name)
    }
}

impl fmt::Display for ReplicatedMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.completeness)
    }
}
