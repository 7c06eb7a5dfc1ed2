#![deny(missing_docs)]
#![doc = "Simulators reproducing the swap sequences of correct and misconceived build-heap variants."]

mod build;
pub mod delayed;
mod generators;
mod heapify;
mod loops;
pub mod properties;

pub use build::build_heap_variant;
pub use delayed::{build_min_heap_dr_end, build_min_heap_dr_level, single_skips};
pub use generators::random_input;
pub use heapify::HeapifyVariant;
pub use loops::{heap_levels, LoopOrder, LoopVariant};
pub use properties::{
    correct_with_extra_steps, min_heap_property, swaps_are_legal, swaps_are_legal_by_index,
    swaps_resemble_build_heap,
};
