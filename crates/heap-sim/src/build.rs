use heap_core::{ErrorInfo, HeapError, Key, Trace};

use crate::heapify::HeapifyVariant;

/// Replays `heapify` once per index of `loop_order` on a copy of `input`.
pub fn build_heap_variant(
    loop_order: &[usize],
    heapify: HeapifyVariant,
    input: &[Key],
) -> Result<Trace, HeapError> {
    if let Some(&index) = loop_order.iter().find(|&&index| index >= input.len()) {
        let info = ErrorInfo::new(
            "loop-index-out-of-range",
            "main loop visits an index outside the heap array",
        )
        .with_context("index", index.to_string())
        .with_context("heap_size", input.len().to_string())
        .with_hint("the variant catalogue assumes a 10-element heap");
        return Err(HeapError::Simulation(info));
    }

    let mut array = input.to_vec();
    let mut trace = Trace::new(input);
    for &i in loop_order {
        heapify.apply(&mut array, i, &mut trace);
    }
    Ok(trace)
}
