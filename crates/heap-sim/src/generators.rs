use heap_core::{Key, RngHandle};

/// Draws a random exercise input of `heap_size` distinct keys.
///
/// Keys come from 10..=99 like the recorded exercise; larger heaps extend
/// the pool upwards so keys stay distinct.
pub fn random_input(heap_size: usize, rng: &mut RngHandle) -> Vec<Key> {
    let upper = Key::max(99, 10 + heap_size as Key - 1);
    let pool: Vec<Key> = (10..=upper).collect();
    rng.sample_distinct(&pool, heap_size)
}
