use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HeapError};

/// Value stored in one cell of the heap array.
pub type Key = i64;

/// Ordered sequence of heap array snapshots; the first entry is the input.
pub type StateSequence = Vec<State>;

/// Ordered sequence of exchanges, one per non-initial state.
pub type SwapSequence = Vec<Swap>;

/// Returns the index of the left child of `i` in the implicit binary heap.
pub const fn left_child(i: usize) -> usize {
    2 * i + 1
}

/// Returns the index of the right child of `i` in the implicit binary heap.
pub const fn right_child(i: usize) -> usize {
    2 * i + 2
}

/// Returns the parent index of `i`, or `None` for the root.
pub const fn parent(i: usize) -> Option<usize> {
    if i == 0 {
        None
    } else {
        Some((i - 1) / 2)
    }
}

/// Immutable snapshot of the heap array at one point in time.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Box<[Key]>);

impl State {
    /// Creates a snapshot from the given values.
    pub fn new(values: impl Into<Vec<Key>>) -> Self {
        Self(values.into().into_boxed_slice())
    }

    /// Returns the values of the snapshot.
    pub fn values(&self) -> &[Key] {
        &self.0
    }

    /// Returns a copy of the snapshot with the two positions of `swap` exchanged.
    pub fn swapped(&self, swap: Swap) -> State {
        let mut values = self.0.to_vec();
        values.swap(swap.0, swap.1);
        State::new(values)
    }
}

impl Deref for State {
    type Target = [Key];

    fn deref(&self) -> &[Key] {
        &self.0
    }
}

impl From<Vec<Key>> for State {
    fn from(values: Vec<Key>) -> Self {
        State::new(values)
    }
}

impl From<&[Key]> for State {
    fn from(values: &[Key]) -> Self {
        State::new(values.to_vec())
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Exchange of two heap array positions.
///
/// Simulators always record the ancestor position first. Swaps parsed from
/// recordings list the lower index first, which coincides for parent/child
/// exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Swap(pub usize, pub usize);

impl Swap {
    /// Returns true when the first index is the heap parent of the second.
    pub fn is_parent_child(&self) -> bool {
        parent(self.1) == Some(self.0)
    }

    /// Returns true when the swap exchanges `index`.
    pub fn touches(&self, index: usize) -> bool {
        self.0 == index || self.1 == index
    }

    /// Euclidean distance between two swaps seen as points in index space.
    pub fn distance(&self, other: &Swap) -> f64 {
        let d0 = self.0 as f64 - other.0 as f64;
        let d1 = self.1 as f64 - other.1 as f64;
        (d0 * d0 + d1 * d1).sqrt()
    }
}

/// Swap annotated with whether a heapify call made it from a recursive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedSwap {
    /// Exchanged positions.
    pub swap: Swap,
    /// True when the swap was not made by the outermost heapify invocation.
    pub recursive: bool,
}

impl TaggedSwap {
    /// Creates a tagged swap.
    pub fn new(swap: Swap, recursive: bool) -> Self {
        Self { swap, recursive }
    }
}

/// State and swap sequence produced by replaying a build-heap variant.
///
/// Always holds at least the input state and exactly one state per swap
/// after it; decoding rejects data that breaks either rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrace")]
pub struct Trace {
    states: StateSequence,
    swaps: Vec<TaggedSwap>,
}

impl Trace {
    /// Starts a trace whose only state is `input`.
    pub fn new(input: &[Key]) -> Self {
        Self {
            states: vec![State::from(input)],
            swaps: Vec::new(),
        }
    }

    /// Rebuilds a trace by applying `swaps` to `input` in order.
    pub fn from_tagged_swaps(input: &[Key], swaps: &[TaggedSwap]) -> Self {
        let mut array = input.to_vec();
        let mut trace = Trace::new(input);
        for tagged in swaps {
            array.swap(tagged.swap.0, tagged.swap.1);
            trace.record(&array, tagged.swap, tagged.recursive);
        }
        trace
    }

    /// Appends the snapshot `array` reached by performing `swap`.
    pub fn record(&mut self, array: &[Key], swap: Swap, recursive: bool) {
        self.states.push(State::from(array));
        self.swaps.push(TaggedSwap::new(swap, recursive));
    }

    /// Returns the initial input state.
    pub fn initial(&self) -> &State {
        &self.states[0]
    }

    /// Returns the last recorded state.
    pub fn final_state(&self) -> &State {
        &self.states[self.states.len() - 1]
    }

    /// Returns all states including the initial one.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the swaps with their recursion tags.
    pub fn tagged_swaps(&self) -> &[TaggedSwap] {
        &self.swaps
    }

    /// Returns the swaps without recursion tags.
    pub fn swaps(&self) -> SwapSequence {
        self.swaps.iter().map(|tagged| tagged.swap).collect()
    }

    /// Returns the number of swaps in the trace.
    pub fn swap_count(&self) -> usize {
        self.swaps.len()
    }

    /// Consumes the trace into its state and tagged swap sequences.
    pub fn into_parts(self) -> (StateSequence, Vec<TaggedSwap>) {
        (self.states, self.swaps)
    }
}

#[derive(Deserialize)]
struct RawTrace {
    states: StateSequence,
    swaps: Vec<TaggedSwap>,
}

impl TryFrom<RawTrace> for Trace {
    type Error = HeapError;

    fn try_from(raw: RawTrace) -> Result<Self, HeapError> {
        if raw.states.len() != raw.swaps.len() + 1 {
            let info = ErrorInfo::new(
                "trace-length-mismatch",
                "a trace needs the input state plus one state per swap",
            )
            .with_context("states", raw.states.len())
            .with_context("swaps", raw.swaps.len());
            return Err(HeapError::Trace(info));
        }
        Ok(Trace {
            states: raw.states,
            swaps: raw.swaps,
        })
    }
}
