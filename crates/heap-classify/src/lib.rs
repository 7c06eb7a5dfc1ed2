#![deny(missing_docs)]
#![doc = "Classification of observed build-heap traces against the catalogue of correct and misconceived variants."]

/// Parallel classification of many recordings.
pub mod batch;
/// Class codes and the primary variant catalogue.
pub mod codes;
/// Matcher options loaded from YAML or JSON.
pub mod config;
/// Primary, loop-hypothesis and replicated-study matchers.
pub mod matcher;
/// Tie-break preferences derived from a labelled corpus.
pub mod preference;
/// Variant catalogue of the replicated study.
pub mod replicated;
/// Ambiguity counters accumulated across traces.
pub mod stats;

pub use batch::{classify_batch, BatchOutcome, Classification, MatcherKind};
pub use codes::{catalogue, class_name, fallback_name, CatalogueEntry, ClassCode};
pub use config::{MatchOptions, Similarity};
pub use matcher::{BuildHeapMatcher, MatchDebug, MatchResult, Rule};
pub use preference::{PreferenceTable, TieBreak};
pub use replicated::{Completeness, ReplicatedMatch, ReplicatedVariant};
pub use stats::{AmbiguityStatistics, MatchLabel};
