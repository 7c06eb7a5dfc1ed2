//! Structural checks on observed traces used by the fallback rules.

use heap_core::{left_child, right_child, Key, State, Swap};

/// True when the subtree rooted at `i` satisfies the min-heap property.
pub fn min_heap_property(array: &[Key], i: usize) -> bool {
    let mut stack = vec![i];
    while let Some(node) = stack.pop() {
        for child in [left_child(node), right_child(node)] {
            if child < array.len() {
                if array[node] > array[child] {
                    return false;
                }
                stack.push(child);
            }
        }
    }
    true
}

/// True when `student` starts with the whole of `correct` and then continues.
pub fn correct_with_extra_steps(student: &[State], correct: &[State]) -> bool {
    student.len() > correct.len() && student[..correct.len()] == *correct
}

/// True when the swaps form parent-to-child heapify chains whose starting
/// points descend like the build-heap main loop.
pub fn swaps_resemble_build_heap(swaps: &[Swap], heap_size: usize) -> bool {
    if swaps.len() < 2 {
        return false;
    }

    let mut main_loop_index = heap_size / 2;
    let mut previous_child: Option<usize> = None;
    for swap in swaps {
        if !swap.is_parent_child() {
            return false;
        }
        let Swap(parent, child) = *swap;
        if previous_child != Some(parent) {
            // a new chain must start below the previous main loop index
            if parent >= main_loop_index {
                return false;
            }
            main_loop_index = parent;
        }
        previous_child = Some(child);
    }
    true
}

/// True when every swap, judged against the state preceding it, moves the
/// smaller child of a parent upwards (left child on ties).
///
/// `states[k]` must be the state before `swaps[k]`.
pub fn swaps_are_legal(states: &[State], swaps: &[Swap], heap_size: usize) -> bool {
    swaps.iter().zip(states).all(|(swap, state)| {
        if !swap.is_parent_child() {
            return false;
        }
        let Swap(parent, child) = *swap;
        let (l, r) = (left_child(parent), right_child(parent));
        let mut min_index = parent;
        if l < heap_size && state[l] < state[parent] {
            min_index = l;
        }
        if r < heap_size && state[r] < state[min_index] {
            min_index = r;
        }
        min_index == child
    })
}

/// True when every swap exchanges a parent with one of its children, values
/// ignored.
pub fn swaps_are_legal_by_index(swaps: &[Swap]) -> bool {
    swaps.iter().all(Swap::is_parent_child)
}
