use heap_core::{left_child, parent, right_child, Key, Swap, Trace};
use serde::{Deserialize, Serialize};

/// Per-node exchange strategy, correct or misconceived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeapifyVariant {
    /// Min-heapify sinking towards the smaller child.
    Correct,
    /// Min-heapify that never descends after its first exchange.
    NoRecursion,
    /// Min-heapify whose recursive exchanges are tagged for deferred matching.
    DelayedRecursion,
    /// Parent compared with the left child, then with the right child.
    HeapifyWithFatherLr,
    /// [`HeapifyVariant::HeapifyWithFatherLr`] descending into each swapped child.
    HeapifyWithFatherLrRecursive,
    /// Parent compared with the right child, then with the left child.
    HeapifyWithFatherRl,
    /// [`HeapifyVariant::HeapifyWithFatherRl`] descending into each swapped child.
    HeapifyWithFatherRlRecursive,
    /// After an exchange, continue from the parent towards the root.
    HeapifyUp,
    /// Sinks towards the larger child.
    MaxHeapify,
    /// Prefers the right child when both children are equal.
    WrongDuplicate,
    /// Bubble sort along the path from the smaller child to the root.
    PathBubblesort,
    /// Swaps the subtree minimum directly into the visited node.
    SmallestInstantlyUp,
}

impl HeapifyVariant {
    /// All heapify variants in catalogue order.
    pub const ALL: [HeapifyVariant; 12] = [
        HeapifyVariant::Correct,
        HeapifyVariant::NoRecursion,
        HeapifyVariant::DelayedRecursion,
        HeapifyVariant::HeapifyWithFatherLr,
        HeapifyVariant::HeapifyWithFatherLrRecursive,
        HeapifyVariant::HeapifyWithFatherRl,
        HeapifyVariant::HeapifyWithFatherRlRecursive,
        HeapifyVariant::HeapifyUp,
        HeapifyVariant::MaxHeapify,
        HeapifyVariant::WrongDuplicate,
        HeapifyVariant::PathBubblesort,
        HeapifyVariant::SmallestInstantlyUp,
    ];

    /// Numeric code added to a loop variant code to form a class code.
    pub fn code(self) -> u32 {
        match self {
            HeapifyVariant::Correct => 0,
            HeapifyVariant::NoRecursion => 1,
            HeapifyVariant::DelayedRecursion => 2,
            HeapifyVariant::HeapifyWithFatherLr => 3,
            HeapifyVariant::HeapifyWithFatherLrRecursive => 4,
            HeapifyVariant::HeapifyWithFatherRl => 5,
            HeapifyVariant::HeapifyWithFatherRlRecursive => 6,
            HeapifyVariant::HeapifyUp => 7,
            HeapifyVariant::MaxHeapify => 8,
            HeapifyVariant::WrongDuplicate => 9,
            HeapifyVariant::PathBubblesort => 10,
            HeapifyVariant::SmallestInstantlyUp => 11,
        }
    }

    /// Looks up a variant by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.code() == code)
    }

    /// Display name used in reports.
    pub fn name(self) -> &'static str {
        match self {
            HeapifyVariant::Correct => "Correct",
            HeapifyVariant::NoRecursion => "No-Recursion",
            HeapifyVariant::DelayedRecursion => "Delayed-Recursion",
            HeapifyVariant::HeapifyWithFatherLr => "Heapify-with-Father LR",
            HeapifyVariant::HeapifyWithFatherLrRecursive => "Heapify-with-Father LR recursive",
            HeapifyVariant::HeapifyWithFatherRl => "Heapify-with-Father RL",
            HeapifyVariant::HeapifyWithFatherRlRecursive => "Heapify-with-Father RL recursive",
            HeapifyVariant::HeapifyUp => "Heapify-up",
            HeapifyVariant::MaxHeapify => "Max-heapify",
            HeapifyVariant::WrongDuplicate => "Wrong-duplicate",
            HeapifyVariant::PathBubblesort => "Path-Bubblesort",
            HeapifyVariant::SmallestInstantlyUp => "Smallest-Instantly-Up",
        }
    }

    /// Runs the variant once at index `i`, recording every exchange in `trace`.
    ///
    /// `i` must be a valid index of `array`.
    pub fn apply(self, array: &mut [Key], i: usize, trace: &mut Trace) {
        match self {
            HeapifyVariant::Correct | HeapifyVariant::DelayedRecursion => {
                min_heapify(array, i, trace, false)
            }
            HeapifyVariant::NoRecursion => {
                let smallest = smallest_of_family(array, i, Order::Min, Tie::KeepLeft);
                if smallest != i {
                    exchange(array, trace, i, smallest, false);
                }
            }
            HeapifyVariant::HeapifyWithFatherLr => {
                with_father(array, i, trace, Side::Left, false, false)
            }
            HeapifyVariant::HeapifyWithFatherLrRecursive => {
                with_father(array, i, trace, Side::Left, true, false)
            }
            HeapifyVariant::HeapifyWithFatherRl => {
                with_father(array, i, trace, Side::Right, false, false)
            }
            HeapifyVariant::HeapifyWithFatherRlRecursive => {
                with_father(array, i, trace, Side::Right, true, false)
            }
            HeapifyVariant::HeapifyUp => heapify_up(array, i, trace, false),
            HeapifyVariant::MaxHeapify => sink(array, i, trace, Order::Max, Tie::KeepLeft, false),
            HeapifyVariant::WrongDuplicate => {
                sink(array, i, trace, Order::Min, Tie::PreferRight, false)
            }
            HeapifyVariant::PathBubblesort => path_bubblesort(array, i, trace),
            HeapifyVariant::SmallestInstantlyUp => {
                if let Some(j) = subtree_min_index(array, i) {
                    if j != i {
                        exchange(array, trace, i, j, false);
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Order {
    Min,
    Max,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tie {
    KeepLeft,
    PreferRight,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn exchange(array: &mut [Key], trace: &mut Trace, i: usize, j: usize, recursive: bool) {
    array.swap(i, j);
    trace.record(array, Swap(i, j), recursive);
}

fn beats(order: Order, candidate: Key, current: Key) -> bool {
    match order {
        Order::Min => candidate < current,
        Order::Max => candidate > current,
    }
}

/// Index of the winner among `i` and its children under `order`.
fn smallest_of_family(array: &[Key], i: usize, order: Order, tie: Tie) -> usize {
    let (l, r) = (left_child(i), right_child(i));
    let mut best = i;
    if l < array.len() && beats(order, array[l], array[i]) {
        best = l;
    }
    if r < array.len() {
        let wins = beats(order, array[r], array[best])
            || (tie == Tie::PreferRight && array[r] == array[best]);
        if wins {
            best = r;
        }
    }
    best
}

fn min_heapify(array: &mut [Key], i: usize, trace: &mut Trace, recursive: bool) {
    sink(array, i, trace, Order::Min, Tie::KeepLeft, recursive);
}

fn sink(array: &mut [Key], i: usize, trace: &mut Trace, order: Order, tie: Tie, recursive: bool) {
    let best = smallest_of_family(array, i, order, tie);
    if best != i {
        exchange(array, trace, i, best, recursive);
        sink(array, best, trace, order, tie, true);
    }
}

fn with_father(
    array: &mut [Key],
    i: usize,
    trace: &mut Trace,
    first: Side,
    descend: bool,
    recursive: bool,
) {
    let (l, r) = (left_child(i), right_child(i));
    let children = match first {
        Side::Left => [l, r],
        Side::Right => [r, l],
    };
    for child in children {
        if child < array.len() && array[child] < array[i] {
            exchange(array, trace, i, child, recursive);
            if descend {
                with_father(array, child, trace, first, descend, true);
            }
        }
    }
}

fn heapify_up(array: &mut [Key], i: usize, trace: &mut Trace, recursive: bool) {
    let smallest = smallest_of_family(array, i, Order::Min, Tie::KeepLeft);
    if smallest != i {
        exchange(array, trace, i, smallest, recursive);
        if let Some(p) = parent(i) {
            heapify_up(array, p, trace, true);
        }
    }
}

fn path_bubblesort(array: &mut [Key], i: usize, trace: &mut Trace) {
    let smallest = smallest_of_family(array, i, Order::Min, Tie::KeepLeft);
    let mut path = Vec::new();
    if smallest != i {
        path.push(smallest);
    }
    path.push(i);
    let mut node = i;
    while let Some(p) = parent(node) {
        path.push(p);
        node = p;
    }

    // path runs bottom-up, so path[k + 1] is an ancestor of path[k]
    let len = path.len();
    for pass in 0..len.saturating_sub(1) {
        for k in 0..len - 1 - pass {
            let (lower, upper) = (path[k], path[k + 1]);
            if array[lower] < array[upper] {
                exchange(array, trace, upper, lower, false);
            }
        }
    }
}

/// Preorder scan of the subtree rooted at `i`; the first minimum wins.
fn subtree_min_index(array: &[Key], i: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut stack = vec![i];
    while let Some(node) = stack.pop() {
        if node >= array.len() {
            continue;
        }
        if best.map_or(true, |b| array[node] < array[b]) {
            best = Some(node);
        }
        stack.push(right_child(node));
        stack.push(left_child(node));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(variant: HeapifyVariant, input: &[Key], i: usize) -> (Vec<Key>, Vec<Swap>) {
        let mut array = input.to_vec();
        let mut trace = Trace::new(input);
        variant.apply(&mut array, i, &mut trace);
        (array, trace.swaps())
    }

    #[test]
    fn subtree_minimum_uses_preorder() {
        // Both index 3 and index 2 hold 1; index 3 is visited first in preorder.
        let array = [5, 4, 1, 1, 9];
        assert_eq!(subtree_min_index(&array, 0), Some(3));
        assert_eq!(subtree_min_index(&array, 2), Some(2));
        assert_eq!(subtree_min_index(&array, 7), None);
    }

    #[test]
    fn wrong_duplicate_prefers_right_on_ties() {
        let (_, correct) = run(HeapifyVariant::Correct, &[5, 2, 2], 0);
        let (_, wrong) = run(HeapifyVariant::WrongDuplicate, &[5, 2, 2], 0);
        assert_eq!(correct, vec![Swap(0, 1)]);
        assert_eq!(wrong, vec![Swap(0, 2)]);
    }

    #[test]
    fn heapify_with_father_swaps_both_children() {
        let (array, swaps) = run(HeapifyVariant::HeapifyWithFatherLr, &[5, 3, 1], 0);
        assert_eq!(swaps, vec![Swap(0, 1), Swap(0, 2)]);
        assert_eq!(array, vec![1, 5, 3]);

        let (array, swaps) = run(HeapifyVariant::HeapifyWithFatherRl, &[5, 3, 1], 0);
        assert_eq!(swaps, vec![Swap(0, 2)]);
        assert_eq!(array, vec![1, 3, 5]);
    }

    #[test]
    fn heapify_up_climbs_towards_root() {
        // Exchange at 1 with its child 3, then the root sees the new value 1.
        let (array, swaps) = run(HeapifyVariant::HeapifyUp, &[2, 5, 3, 1], 1);
        assert_eq!(swaps, vec![Swap(1, 3), Swap(0, 1)]);
        assert_eq!(array, vec![1, 2, 3, 5]);
    }

    #[test]
    fn path_bubblesort_sorts_path_to_root() {
        let (array, swaps) = run(HeapifyVariant::PathBubblesort, &[2, 5, 3, 1], 1);
        assert_eq!(swaps, vec![Swap(1, 3), Swap(0, 1)]);
        assert_eq!(array, vec![1, 2, 3, 5]);
    }

    #[test]
    fn recursive_swaps_are_tagged() {
        let input = [9, 1, 8, 2, 3];
        let mut array = input.to_vec();
        let mut trace = Trace::new(&input);
        HeapifyVariant::DelayedRecursion.apply(&mut array, 0, &mut trace);
        let tags: Vec<bool> = trace.tagged_swaps().iter().map(|t| t.recursive).collect();
        assert_eq!(trace.swaps(), vec![Swap(0, 1), Swap(1, 3)]);
        assert_eq!(tags, vec![false, true]);
    }

    #[test]
    fn codes_round_trip() {
        for variant in HeapifyVariant::ALL {
            assert_eq!(HeapifyVariant::from_code(variant.code()), Some(variant));
        }
        assert_eq!(HeapifyVariant::from_code(12), None);
    }
}
