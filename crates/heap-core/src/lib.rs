#![deny(missing_docs)]
#![doc = "Core value types and errors shared by the build-heap trace matcher crates."]

pub mod errors;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, HeapError};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{
    left_child, parent, right_child, Key, State, StateSequence, Swap, SwapSequence, TaggedSwap,
    Trace,
};
