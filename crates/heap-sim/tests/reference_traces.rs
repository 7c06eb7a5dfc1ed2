use heap_core::{State, Swap};
use heap_sim::{
    build_heap_variant, build_min_heap_dr_end, build_min_heap_dr_level, single_skips,
    HeapifyVariant, LoopOrder, LoopVariant,
};
use heap_trace::states_from_swaps;

const DESCENDING: [i64; 10] = [10, 9, 8, 7, 6, 5, 4, 3, 2, 1];

// Worked by hand: heapify(4) .. heapify(0) on the descending input.
const CORRECT_SWAPS: [Swap; 8] = [
    Swap(4, 9),
    Swap(3, 8),
    Swap(2, 6),
    Swap(1, 4),
    Swap(4, 9),
    Swap(0, 1),
    Swap(1, 3),
    Swap(3, 7),
];
const CORRECT_FINAL: [i64; 10] = [1, 2, 4, 3, 6, 5, 8, 10, 7, 9];

#[test]
fn correct_build_heap_matches_hand_computed_trace() {
    let trace =
        build_heap_variant(&LoopVariant::CORRECT.order, HeapifyVariant::Correct, &DESCENDING)
            .unwrap();
    assert_eq!(trace.swaps(), CORRECT_SWAPS.to_vec());
    assert_eq!(trace.final_state(), &State::new(CORRECT_FINAL.to_vec()));
    assert_eq!(trace.states().len(), 9);
    assert_eq!(trace.initial(), &State::new(DESCENDING.to_vec()));
    assert_eq!(trace.states(), states_from_swaps(&DESCENDING, &CORRECT_SWAPS).as_slice());
}

#[test]
fn recursion_tags_follow_heapify_calls() {
    let trace = build_heap_variant(
        &LoopVariant::CORRECT.order,
        HeapifyVariant::DelayedRecursion,
        &DESCENDING,
    )
    .unwrap();
    let tags: Vec<bool> = trace.tagged_swaps().iter().map(|t| t.recursive).collect();
    assert_eq!(tags, vec![false, false, false, false, true, false, true, true]);
    assert_eq!(trace.swaps(), CORRECT_SWAPS.to_vec());
}

#[test]
fn no_recursion_swaps_once_per_call() {
    let trace =
        build_heap_variant(&LoopVariant::CORRECT.order, HeapifyVariant::NoRecursion, &DESCENDING)
            .unwrap();
    assert_eq!(
        trace.swaps(),
        vec![Swap(4, 9), Swap(3, 8), Swap(2, 6), Swap(1, 4), Swap(0, 1)]
    );
}

#[test]
fn max_heapify_leaves_descending_input_untouched() {
    let trace =
        build_heap_variant(&LoopVariant::CORRECT.order, HeapifyVariant::MaxHeapify, &DESCENDING)
            .unwrap();
    assert_eq!(trace.swap_count(), 0);
}

#[test]
fn smallest_instantly_up_top_down() {
    let top_down = LoopVariant::from_code(500).unwrap();
    let trace = build_heap_variant(
        &top_down.order,
        HeapifyVariant::SmallestInstantlyUp,
        &DESCENDING,
    )
    .unwrap();
    // index 0: minimum 1 at 9; index 1: minimum 2 at 8; index 2: 4 at 6;
    // index 3: 7 vs children 3 and 9 -> 3 at 7; index 4: 6 vs 10 -> none.
    assert_eq!(
        trace.swaps(),
        vec![Swap(0, 9), Swap(1, 8), Swap(2, 6), Swap(3, 7)]
    );
}

#[test]
fn loop_index_outside_heap_is_rejected() {
    let err = build_heap_variant(&[4, 3], HeapifyVariant::Correct, &[3, 2, 1]).unwrap_err();
    assert_eq!(err.info().code, "loop-index-out-of-range");
    assert_eq!(err.info().context.get("index"), Some(&"4".to_string()));
}

#[test]
fn loop_catalogue_is_complete() {
    assert_eq!(LoopVariant::ALL.len(), 8);
    for (idx, variant) in LoopVariant::ALL.iter().enumerate() {
        assert_eq!(variant.code, 100 * (idx as u32 + 1));
        let mut sorted = variant.order;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4]);
    }
    assert_eq!(LoopOrder::bottom_up(10), LoopVariant::CORRECT.order.to_vec());
    assert_eq!(LoopOrder::top_down(10), vec![0, 1, 2, 3, 4]);
}

#[test]
fn delayed_recursion_by_level_flushes_after_each_level() {
    let swaps: Vec<Swap> = build_min_heap_dr_level(&DESCENDING)
        .iter()
        .map(|t| t.swap)
        .collect();
    assert_eq!(swaps, CORRECT_SWAPS.to_vec());
}

#[test]
fn delayed_recursion_at_end_moves_recursive_swaps_last() {
    let tagged = build_min_heap_dr_end(&DESCENDING);
    let swaps: Vec<Swap> = tagged.iter().map(|t| t.swap).collect();
    assert_eq!(
        swaps,
        vec![
            Swap(4, 9),
            Swap(3, 8),
            Swap(2, 6),
            Swap(1, 4),
            Swap(0, 1),
            Swap(4, 9),
            Swap(1, 3),
            Swap(3, 7),
        ]
    );
    assert!(tagged[..5].iter().all(|t| !t.recursive));
    assert!(tagged[5..].iter().all(|t| t.recursive));
}

#[test]
fn single_skips_drop_a_swap_and_its_recursion() {
    let sequences = single_skips(&DESCENDING);
    assert_eq!(sequences.len(), CORRECT_SWAPS.len());
    // skipping a swap without recursive followers
    assert_eq!(sequences[0].len(), 8);
    // skipping (1,4) also drops the recursive (4,9)
    assert_eq!(sequences[3].len(), 7);
    // skipping (0,1) also drops (1,3) and (3,7)
    assert_eq!(sequences[5].len(), 6);
    for sequence in &sequences {
        assert_eq!(sequence[0], State::new(DESCENDING.to_vec()));
    }
    let expected = states_from_swaps(&DESCENDING, &CORRECT_SWAPS[1..]);
    assert_eq!(sequences[0], expected);
}
