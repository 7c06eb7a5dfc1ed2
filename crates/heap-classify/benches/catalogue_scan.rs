use criterion::{criterion_group, criterion_main, Criterion};
use heap_classify::{
    classify_batch, AmbiguityStatistics, BuildHeapMatcher, MatchOptions, MatcherKind, Similarity,
};
use heap_core::{RngHandle, State};
use heap_sim::{build_heap_variant, random_input, HeapifyVariant, LoopVariant};
use heap_trace::Recording;

fn student_recordings(count: usize) -> Vec<Recording> {
    let mut rng = RngHandle::from_seed(11);
    (0..count)
        .map(|idx| {
            let input = random_input(10, &mut rng);
            let loop_variant = LoopVariant::ALL[idx % LoopVariant::ALL.len()];
            let trace = build_heap_variant(&loop_variant.order, HeapifyVariant::Correct, &input)
                .expect("simulated trace");
            let arrays: Vec<&[i64]> = trace.states().iter().map(State::values).collect();
            Recording::from_arrays(&arrays)
        })
        .collect()
}

fn bench_catalogue(c: &mut Criterion) {
    let recordings = student_recordings(32);
    let states = BuildHeapMatcher::default();
    let lcs = BuildHeapMatcher::new(MatchOptions {
        similarity: Similarity::Lcs,
        ..MatchOptions::default()
    })
    .expect("lcs options");

    c.bench_function("primary_states", |bench| {
        bench.iter(|| states.match_recording(&recordings[0]))
    });
    c.bench_function("primary_lcs", |bench| bench.iter(|| lcs.match_recording(&recordings[0])));
    c.bench_function("loop_hypothesis", |bench| {
        bench.iter(|| {
            let mut stats = AmbiguityStatistics::default();
            states.loop_hypothesis_match(&recordings[1], &mut stats)
        })
    });
    c.bench_function("batch_32_replicated", |bench| {
        bench.iter(|| classify_batch(&states, &recordings, MatcherKind::Replicated, 0))
    });
}

criterion_group!(benches, bench_catalogue);
criterion_main!(benches);
