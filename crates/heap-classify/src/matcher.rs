use std::fmt;

use heap_core::{HeapError, State, Swap, Trace};
use heap_sim::{
    build_heap_variant, correct_with_extra_steps, min_heap_property, swaps_are_legal,
    swaps_are_legal_by_index, swaps_resemble_build_heap, HeapifyVariant, LoopOrder,
};
use heap_similarity::{
    delayed_recursion_similarity, dtw_similarity, jaccard, lcs_similarity, state_similarity,
};
use heap_trace::{parse_with, ObservedTrace, Recording};
use serde::Serialize;
use tracing::debug;

use crate::codes::{
    catalogue, CatalogueEntry, ClassCode, CORRECT, EXTRA_STEPS_AFTER_CORRECT, LEGAL_SWAPS,
    LEGAL_SWAP_INDICES, NONSYSTEMATIC_BUILD_HEAP, NO_SWAPS, SWAPS_RESEMBLE_BUILD_HEAP, UNKNOWN,
};
use crate::config::{MatchOptions, Similarity};
use crate::preference::{PreferenceTable, TieBreak};
use crate::replicated::{Completeness, ReplicatedMatch, ReplicatedVariant};
use crate::stats::{AmbiguityStatistics, MatchLabel};

/// Decision rule that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Best similarity score above the threshold.
    BestScore,
    /// Best similarity score at or below the threshold.
    UnderThreshold,
    /// A candidate state sequence equals the student's.
    ExactMatch,
    /// A candidate leads the correct variant by the configured margin.
    Margin,
    /// One of the structural fallback classes.
    Structural,
}

/// Score details attached to a result when verbosity is 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDebug {
    /// Highest similarity score over the catalogue.
    pub best_score: f64,
    /// Classes the decision rule chose from, in catalogue order.
    pub tied: Vec<ClassCode>,
    /// True when the primary matcher fell back to unknown.
    pub under_threshold: bool,
}

impl fmt::Display for MatchDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.best_score)?;
        if self.under_threshold {
            return write!(f, " (under threshold)");
        }
        for code in &self.tied {
            write!(f, " {code}")?;
        }
        Ok(())
    }
}

/// Class assigned to one trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Chosen class code.
    pub class: ClassCode,
    /// Rule that fired.
    pub rule: Rule,
    /// Present when the matcher runs with verbosity 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<MatchDebug>,
}

struct Scored {
    code: ClassCode,
    score: f64,
    exact: bool,
}

/// Classifier comparing observed build-heap traces with the variant catalogue.
#[derive(Debug, Clone, Default)]
pub struct BuildHeapMatcher {
    options: MatchOptions,
    preferences: PreferenceTable,
}

impl BuildHeapMatcher {
    /// Creates a matcher with the standard preference table.
    pub fn new(options: MatchOptions) -> Result<Self, HeapError> {
        Self::with_preferences(options, PreferenceTable::standard())
    }

    /// Creates a matcher with a custom preference table.
    pub fn with_preferences(
        options: MatchOptions,
        preferences: PreferenceTable,
    ) -> Result<Self, HeapError> {
        options.validate()?;
        Ok(Self {
            options,
            preferences,
        })
    }

    /// Options in effect.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Preference table used by the cascading matchers.
    pub fn preferences(&self) -> &PreferenceTable {
        &self.preferences
    }

    /// Code and `loop / heapify` name of every class, unknown first.
    pub fn describe_variants(&self) -> Vec<(ClassCode, String)> {
        let mut described = vec![(UNKNOWN, "unrecognised or not sure".to_string())];
        described.extend(catalogue().map(|entry| (entry.code(), entry.name())));
        described
    }

    /// Most preferred of several equally good classes, 0 when empty.
    pub fn choose_class(&self, candidates: &[ClassCode]) -> ClassCode {
        TieBreak::Preference.resolve(candidates, &self.preferences)
    }

    /// Parses a recording with the configured step policy.
    pub fn observe(&self, recording: &Recording) -> Result<ObservedTrace, HeapError> {
        parse_with(recording, self.options.step_policy)
    }

    /// Single-pass match of a recording; see [`BuildHeapMatcher::match_trace`].
    pub fn match_recording(&self, recording: &Recording) -> Result<MatchResult, HeapError> {
        self.match_trace(&self.observe(recording)?)
    }

    /// Scores every catalogue class and returns the first one at the best
    /// score, or unknown when that score does not exceed the threshold.
    pub fn match_trace(&self, observed: &ObservedTrace) -> Result<MatchResult, HeapError> {
        let scored = self.scan(observed)?;

        // the initial state always matches, so unknown starts at score 0
        let mut best_score = 0.0;
        let mut tied = vec![UNKNOWN];
        for candidate in &scored {
            if candidate.score > best_score {
                best_score = candidate.score;
                tied = vec![candidate.code];
            } else if candidate.score == best_score {
                tied.push(candidate.code);
            }
        }

        let (class, rule) = if best_score > self.options.threshold {
            let class = TieBreak::FirstInCatalogue.resolve(&tied, &self.preferences);
            (class, Rule::BestScore)
        } else {
            (UNKNOWN, Rule::UnderThreshold)
        };
        debug!(class, best_score, tied = ?tied, ?rule, "primary match");
        Ok(self.result(class, rule, best_score, tied))
    }

    /// Cascading match of a recording; see
    /// [`BuildHeapMatcher::loop_hypothesis_match_trace`].
    pub fn loop_hypothesis_match(
        &self,
        recording: &Recording,
        stats: &mut AmbiguityStatistics,
    ) -> Result<MatchResult, HeapError> {
        self.loop_hypothesis_match_trace(&self.observe(recording)?, stats)
    }

    /// Exact match, then margin over the correct variant, then structural
    /// fallback rules. Ties resolve through the preference table.
    pub fn loop_hypothesis_match_trace(
        &self,
        observed: &ObservedTrace,
        stats: &mut AmbiguityStatistics,
    ) -> Result<MatchResult, HeapError> {
        let scored = self.scan(observed)?;
        stats.total_matched += 1;
        let best_score = scored.iter().map(|c| c.score).fold(0.0, f64::max);

        let exact: Vec<ClassCode> = scored
            .iter()
            .filter(|c| c.exact)
            .map(|c| c.code)
            .collect();
        if !exact.is_empty() {
            if exact.len() > 1 {
                if exact.contains(&CORRECT) {
                    stats.misconception_as_correct += 1;
                } else {
                    stats.multiple_misconceptions += 1;
                }
                stats.record_ties(&class_labels(&exact));
            }
            let class = TieBreak::Preference.resolve(&exact, &self.preferences);
            debug!(class, candidates = ?exact, "exact state sequence match");
            return Ok(self.result(class, Rule::ExactMatch, best_score, exact));
        }

        let correct_score = scored
            .iter()
            .find(|c| c.code == CORRECT)
            .map_or(0.0, |c| c.score);
        if best_score - correct_score >= self.options.margin {
            let leaders: Vec<ClassCode> = scored
                .iter()
                .filter(|c| c.score == best_score)
                .map(|c| c.code)
                .collect();
            if leaders.len() > 1 {
                stats.multiple_misconceptions += 1;
                stats.record_ties(&class_labels(&leaders));
            }
            let class = TieBreak::Preference.resolve(&leaders, &self.preferences);
            if class != UNKNOWN {
                debug!(class, best_score, correct_score, "margin over correct variant");
                return Ok(self.result(class, Rule::Margin, best_score, leaders));
            }
        }

        let class = structural_class(observed)?;
        debug!(class, best_score, correct_score, "structural fallback");
        Ok(self.result(class, Rule::Structural, best_score, Vec::new()))
    }

    /// Replicated-study match of a recording; see
    /// [`BuildHeapMatcher::replicated_study_match_trace`].
    pub fn replicated_study_match(
        &self,
        recording: &Recording,
        stats: &mut AmbiguityStatistics,
    ) -> Result<ReplicatedMatch, HeapError> {
        self.replicated_study_match_trace(&self.observe(recording)?, stats)
    }

    /// Exact match, then margin over the correct variant, over the named
    /// variants of the replicated study. Catalogue order breaks ties.
    ///
    /// Scores are always matching state counts, so the margin is measured in
    /// states whatever [`Similarity`] the options select.
    pub fn replicated_study_match_trace(
        &self,
        observed: &ObservedTrace,
        stats: &mut AmbiguityStatistics,
    ) -> Result<ReplicatedMatch, HeapError> {
        let mut scores = Vec::with_capacity(ReplicatedVariant::ALL.len());
        let mut exact = Vec::new();
        for variant in ReplicatedVariant::ALL {
            let mut best: f64 = 0.0;
            let mut perfect = false;
            for states in variant.candidates(observed.input())? {
                best = best.max(state_similarity(&states, observed.states()) as f64);
                perfect |= states.as_slice() == observed.states();
            }
            scores.push(best);
            if perfect {
                exact.push(variant);
            }
        }
        stats.total_matched += 1;

        if let Some(&first) = exact.first() {
            if exact.len() > 1 {
                if first == ReplicatedVariant::Correct {
                    stats.misconception_as_correct += 1;
                } else {
                    stats.multiple_misconceptions += 1;
                }
                stats.record_ties(&variant_labels(&exact));
            }
            debug!(variant = first.name(), candidates = ?exact, "replicated exact match");
            return Ok(ReplicatedMatch {
                variant: Some(first),
                completeness: Completeness::Finished,
            });
        }

        let best_score = scores.iter().copied().fold(0.0, f64::max);
        let correct_score = scores[0];
        if best_score - correct_score >= self.options.margin {
            let leaders: Vec<ReplicatedVariant> = ReplicatedVariant::ALL
                .into_iter()
                .zip(&scores)
                .filter(|(_, &score)| score == best_score)
                .map(|(variant, _)| variant)
                .collect();
            if leaders.len() > 1 {
                stats.multiple_misconceptions += 1;
                stats.record_ties(&variant_labels(&leaders));
            }
            debug!(
                variant = leaders[0].name(),
                best_score,
                correct_score,
                "replicated partial match"
            );
            return Ok(ReplicatedMatch {
                variant: Some(leaders[0]),
                completeness: Completeness::Unfinished,
            });
        }

        Ok(ReplicatedMatch {
            variant: None,
            completeness: Completeness::Unfinished,
        })
    }

    fn scan(&self, observed: &ObservedTrace) -> Result<Vec<Scored>, HeapError> {
        catalogue()
            .map(|entry| -> Result<Scored, HeapError> {
                let trace =
                    build_heap_variant(&entry.loop_variant.order, entry.heapify, observed.input())?;
                let score = self.candidate_score(&entry, &trace, observed);
                let exact = trace.states() == observed.states();
                Ok(Scored {
                    code: entry.code(),
                    score,
                    exact,
                })
            })
            .collect()
    }

    fn candidate_score(
        &self,
        entry: &CatalogueEntry,
        trace: &Trace,
        observed: &ObservedTrace,
    ) -> f64 {
        if entry.heapify != HeapifyVariant::DelayedRecursion {
            return self.sequence_score(trace.states(), &trace.swaps(), observed);
        }
        let matched = delayed_recursion_similarity(trace.tagged_swaps(), observed.swaps());
        let score = (1 + matched) as f64;
        if self.options.jaccard || self.options.similarity == Similarity::Dtw {
            jaccard(
                score,
                (trace.swap_count() + 1) as f64,
                (observed.swaps().len() + 1) as f64,
            )
        } else {
            score
        }
    }

    fn sequence_score(&self, states: &[State], swaps: &[Swap], observed: &ObservedTrace) -> f64 {
        let (score, candidate_len, student_len) = match self.options.similarity {
            Similarity::States => (
                state_similarity(states, observed.states()),
                states.len(),
                observed.states().len(),
            ),
            Similarity::Lcs => (
                lcs_similarity(swaps, observed.swaps()),
                swaps.len(),
                observed.swaps().len(),
            ),
            Similarity::Dtw => {
                return dtw_similarity(swaps, observed.swaps(), observed.heap_size());
            }
        };
        if self.options.jaccard {
            jaccard(score as f64, candidate_len as f64, student_len as f64)
        } else {
            score as f64
        }
    }

    fn result(
        &self,
        class: ClassCode,
        rule: Rule,
        best_score: f64,
        tied: Vec<ClassCode>,
    ) -> MatchResult {
        let debug = (self.options.verbosity == 1).then(|| MatchDebug {
            best_score,
            under_threshold: rule == Rule::UnderThreshold,
            tied,
        });
        MatchResult { class, rule, debug }
    }
}

fn structural_class(observed: &ObservedTrace) -> Result<ClassCode, HeapError> {
    let (states, swaps) = (observed.states(), observed.swaps());
    let heap_size = observed.heap_size();
    if states.len() == 1 {
        return Ok(NO_SWAPS);
    }
    let correct = build_heap_variant(
        &LoopOrder::bottom_up(heap_size),
        HeapifyVariant::Correct,
        observed.input(),
    )?;
    let class = if correct_with_extra_steps(states, correct.states()) {
        EXTRA_STEPS_AFTER_CORRECT
    } else if swaps_resemble_build_heap(swaps, heap_size) {
        SWAPS_RESEMBLE_BUILD_HEAP
    } else if min_heap_property(observed.final_state(), 0) {
        NONSYSTEMATIC_BUILD_HEAP
    } else if swaps_are_legal(states, swaps, heap_size) {
        LEGAL_SWAPS
    } else if swaps_are_legal_by_index(swaps) {
        LEGAL_SWAP_INDICES
    } else {
        UNKNOWN
    };
    Ok(class)
}

fn class_labels(codes: &[ClassCode]) -> Vec<MatchLabel> {
    codes.iter().copied().map(MatchLabel::Class).collect()
}

fn variant_labels(variants: &[ReplicatedVariant]) -> Vec<MatchLabel> {
    variants.iter().copied().map(MatchLabel::Variant).collect()
}
