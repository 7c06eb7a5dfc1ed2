mod common;

use common::{recording, simulated, student, DESCENDING, MIXED};
use heap_classify::{classify_batch, BuildHeapMatcher, Classification, MatcherKind};
use heap_core::Swap;
use heap_sim::HeapifyVariant;
use heap_trace::Recording;

fn recordings() -> Vec<Recording> {
    let traces = [
        simulated(100, HeapifyVariant::Correct, &DESCENDING),
        simulated(200, HeapifyVariant::Correct, &DESCENDING),
        student(&MIXED, &[Swap(0, 1), Swap(1, 3), Swap(3, 8)]),
        student(&MIXED, &[]),
        student(&MIXED, &[Swap(0, 1)]),
    ];
    let mut recordings: Vec<Recording> =
        traces.iter().map(|trace| recording(trace.states())).collect();
    recordings.insert(3, Recording::new(Vec::new()));
    recordings
}

#[test]
fn batch_results_keep_input_order() {
    let matcher = BuildHeapMatcher::default();
    let recordings = recordings();
    let outcome = classify_batch(&matcher, &recordings, MatcherKind::LoopHypothesis, 3).unwrap();
    assert_eq!(outcome.results.len(), recordings.len());

    let codes: Vec<Option<u32>> = outcome
        .results
        .iter()
        .map(|result| match result {
            Ok(Classification::Class(result)) => Some(result.class),
            Ok(other) => panic!("unexpected result: {other:?}"),
            Err(_) => None,
        })
        .collect();
    assert_eq!(codes, vec![Some(100), Some(200), Some(500), None, Some(11), Some(15)]);

    let err = outcome.results[3].as_ref().unwrap_err();
    assert_eq!(err.info().code, "empty-recording");
    assert_eq!(outcome.statistics.total_matched, 5);
}

#[test]
fn batch_statistics_do_not_depend_on_pool_size() {
    let matcher = BuildHeapMatcher::default();
    let recordings = recordings();
    let parallel = classify_batch(&matcher, &recordings, MatcherKind::Replicated, 4).unwrap();
    let single = classify_batch(&matcher, &recordings, MatcherKind::Replicated, 1).unwrap();
    assert_eq!(parallel.statistics, single.statistics);
    assert_eq!(
        parallel.results[0].as_ref().unwrap().to_string(),
        "Correct Finished"
    );
}

#[test]
fn primary_matcher_leaves_statistics_untouched() {
    let matcher = BuildHeapMatcher::default();
    let outcome = classify_batch(&matcher, &recordings()[..1], MatcherKind::Primary, 0).unwrap();
    assert_eq!(outcome.statistics.total_matched, 0);
    assert_eq!(outcome.results[0].as_ref().unwrap().to_string(), "100");
}
