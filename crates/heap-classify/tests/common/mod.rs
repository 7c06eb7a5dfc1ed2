#![allow(dead_code)]

use heap_core::{Key, State, Swap};
use heap_sim::{build_heap_variant, HeapifyVariant, LoopVariant};
use heap_trace::{ObservedTrace, Recording};

pub const DESCENDING: [Key; 10] = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
pub const ASCENDING: [Key; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
/// Every catalogue variant performs at least one swap on this input.
pub const MIXED: [Key; 10] = [50, 20, 80, 10, 70, 30, 90, 60, 40, 15];

pub fn recording(states: &[State]) -> Recording {
    let arrays: Vec<&[Key]> = states.iter().map(State::values).collect();
    Recording::from_arrays(&arrays)
}

pub fn simulated(loop_code: u32, heapify: HeapifyVariant, input: &[Key]) -> ObservedTrace {
    let loop_variant = LoopVariant::from_code(loop_code).unwrap();
    let trace = build_heap_variant(&loop_variant.order, heapify, input).unwrap();
    ObservedTrace::from_swaps(input, &trace.swaps())
}

pub fn student(input: &[Key], swaps: &[Swap]) -> ObservedTrace {
    ObservedTrace::from_swaps(input, swaps)
}
