mod common;

use common::{recording, simulated, ASCENDING, DESCENDING};
use heap_classify::{BuildHeapMatcher, MatchOptions, Rule, Similarity};
use heap_core::RngHandle;
use heap_sim::{
    build_heap_variant, build_min_heap_dr_end, random_input, HeapifyVariant, LoopVariant,
};
use heap_trace::ObservedTrace;
use proptest::prelude::*;

fn matcher(similarity: Similarity, jaccard: bool) -> BuildHeapMatcher {
    BuildHeapMatcher::new(MatchOptions {
        similarity,
        jaccard,
        ..MatchOptions::default()
    })
    .unwrap()
}

#[test]
fn correct_recording_is_class_100() {
    let trace =
        build_heap_variant(&LoopVariant::CORRECT.order, HeapifyVariant::Correct, &DESCENDING)
            .unwrap();
    let result = BuildHeapMatcher::default()
        .match_recording(&recording(trace.states()))
        .unwrap();
    assert_eq!(result.class, 100);
    assert_eq!(result.rule, Rule::BestScore);
    assert!(result.debug.is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn correct_traces_match_class_100_under_every_similarity(seed in any::<u64>()) {
        let mut rng = RngHandle::from_seed(seed);
        let input = random_input(10, &mut rng);
        let observed = simulated(100, HeapifyVariant::Correct, &input);
        // inputs that already form a heap leave nothing to compare under lcs
        prop_assume!(!observed.swaps().is_empty());
        for (similarity, jaccard) in [
            (Similarity::States, false),
            (Similarity::States, true),
            (Similarity::Lcs, false),
            (Similarity::Dtw, false),
        ] {
            let result = matcher(similarity, jaccard).match_trace(&observed).unwrap();
            prop_assert_eq!(result.class, 100);
        }
    }
}

#[test]
fn max_heapify_on_sorted_input() {
    let observed = simulated(100, HeapifyVariant::MaxHeapify, &ASCENDING);
    assert!(observed.swaps().len() > 1);
    let result = BuildHeapMatcher::default().match_trace(&observed).unwrap();
    assert_eq!(result.class, 108);
}

#[test]
fn deferred_recursion_wins_under_lcs() {
    let swaps: Vec<_> = build_min_heap_dr_end(&DESCENDING)
        .iter()
        .map(|tagged| tagged.swap)
        .collect();
    let observed = ObservedTrace::from_swaps(&DESCENDING, &swaps);
    let result = matcher(Similarity::Lcs, false).match_trace(&observed).unwrap();
    assert_eq!(result.class, 102);
}

#[test]
fn verbose_results_carry_score_details() {
    let options = MatchOptions {
        verbosity: 1,
        ..MatchOptions::default()
    };
    let observed = simulated(100, HeapifyVariant::Correct, &DESCENDING);
    let result = BuildHeapMatcher::new(options).unwrap().match_trace(&observed).unwrap();
    let debug = result.debug.unwrap();
    assert_eq!(debug.best_score, 9.0);
    assert_eq!(debug.tied[0], 100);
    assert!(debug.to_string().starts_with("9 100"));
}

#[test]
fn scores_at_or_below_threshold_are_unknown() {
    let options = MatchOptions {
        threshold: 9.0,
        verbosity: 1,
        ..MatchOptions::default()
    };
    let observed = simulated(100, HeapifyVariant::Correct, &DESCENDING);
    let result = BuildHeapMatcher::new(options).unwrap().match_trace(&observed).unwrap();
    assert_eq!(result.class, 0);
    assert_eq!(result.rule, Rule::UnderThreshold);
    assert_eq!(result.debug.unwrap().to_string(), "9 (under threshold)");
}

#[test]
fn short_heaps_are_rejected_by_the_catalogue() {
    let observed = ObservedTrace::from_swaps(&[3, 2, 1], &[]);
    let err = BuildHeapMatcher::default().match_trace(&observed).unwrap_err();
    assert_eq!(err.info().code, "loop-index-out-of-range");
}
