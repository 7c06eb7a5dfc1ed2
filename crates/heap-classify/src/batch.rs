use std::fmt;

use heap_core::HeapError;
use heap_trace::Recording;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matcher::{BuildHeapMatcher, MatchResult};
use crate::replicated::ReplicatedMatch;
use crate::stats::AmbiguityStatistics;

/// Matcher applied to every trace of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatcherKind {
    /// Single-pass best-score match.
    #[default]
    Primary,
    /// Cascading classifier with structural fallback classes.
    LoopHypothesis,
    /// Named variants of the replicated study.
    Replicated,
}

/// Classification of one trace by any matcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Classification {
    /// Class code result.
    Class(MatchResult),
    /// Replicated-study result.
    Replicated(ReplicatedMatch),
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Class(result) => {
                write!(f, "{}", result.class)?;
                if let Some(debug) = &result.debug {
                    write!(f, " {debug}")?;
                }
                Ok(())
            }
            Classification::Replicated(result) => write!(f, "{result}"),
        }
    }
}

/// Per-trace results in input order plus the merged statistics.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// One result per input recording.
    pub results: Vec<Result<Classification, HeapError>>,
    /// Statistics of all workers combined.
    pub statistics: AmbiguityStatistics,
}

impl BuildHeapMatcher {
    /// Classifies one recording with the chosen matcher.
    pub fn classify(
        &self,
        recording: &Recording,
        kind: MatcherKind,
        stats: &mut AmbiguityStatistics,
    ) -> Result<Classification, HeapError> {
        match kind {
            MatcherKind::Primary => self.match_recording(recording).map(Classification::Class),
            MatcherKind::LoopHypothesis => self
                .loop_hypothesis_match(recording, stats)
                .map(Classification::Class),
            MatcherKind::Replicated => self
                .replicated_study_match(recording, stats)
                .map(Classification::Replicated),
        }
    }
}

/// Classifies independent recordings in parallel.
///
/// Every rayon worker accumulates its own statistics; they are merged once
/// the map completes. `threads == 0` lets rayon pick the pool size.
pub fn classify_batch(
    matcher: &BuildHeapMatcher,
    recordings: &[Recording],
    kind: MatcherKind,
    threads: usize,
) -> Result<BatchOutcome, HeapError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| HeapError::io("thread_pool", err))?;

    let partials: Vec<(Vec<(usize, Result<Classification, HeapError>)>, AmbiguityStatistics)> =
        pool.install(|| {
            recordings
                .par_iter()
                .enumerate()
                .fold(
                    || (Vec::new(), AmbiguityStatistics::default()),
                    |(mut results, mut stats), (index, recording)| {
                        results.push((index, matcher.classify(recording, kind, &mut stats)));
                        (results, stats)
                    },
                )
                .collect()
        });

    let mut indexed = Vec::with_capacity(recordings.len());
    let mut statistics = AmbiguityStatistics::default();
    for (results, stats) in partials {
        indexed.extend(results);
        statistics.merge(&stats);
    }
    indexed.sort_unstable_by_key(|(index, _)| *index);

    let results: Vec<_> = indexed.into_iter().map(|(_, result)| result).collect();
    let failed = results.iter().filter(|result| result.is_err()).count();
    info!(traces = results.len(), failed, ?kind, "batch classified");
    Ok(BatchOutcome {
        results,
        statistics,
    })
}
