use std::collections::BTreeMap;
use std::fmt;

use crate::codes::ClassCode;
use crate::replicated::ReplicatedVariant;

/// Class identity recorded in the cross-match table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchLabel {
    /// Catalogue class of the loop-hypothesis matcher.
    Class(ClassCode),
    /// Variant of the replicated-study matcher.
    Variant(ReplicatedVariant),
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLabel::Class(code) => write!(f, "{code}"),
            MatchLabel::Variant(variant) => write!(f, "{variant:?}"),
        }
    }
}

/// Ambiguity counters accumulated over classified traces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbiguityStatistics {
    /// Traces classified by a cascading matcher.
    pub total_matched: u64,
    /// Ties in which the correct variant took part.
    pub misconception_as_correct: u64,
    /// Ties among misconceptions only.
    pub multiple_misconceptions: u64,
    cross_matches: BTreeMap<(MatchLabel, MatchLabel), u64>,
}

impl AmbiguityStatistics {
    /// Counts every unordered pair of `tied` once.
    pub fn record_ties(&mut self, tied: &[MatchLabel]) {
        for (idx, &a) in tied.iter().enumerate() {
            for &b in &tied[idx + 1..] {
                *self.cross_matches.entry(ordered(a, b)).or_insert(0) += 1;
            }
        }
    }

    /// How often `a` and `b` tied as joint best match, in either order.
    pub fn cross_match(&self, a: MatchLabel, b: MatchLabel) -> u64 {
        self.cross_matches.get(&ordered(a, b)).copied().unwrap_or(0)
    }

    /// Non-zero cross-match counts with the smaller label first.
    pub fn cross_matches(&self) -> impl Iterator<Item = (MatchLabel, MatchLabel, u64)> + '_ {
        self.cross_matches.iter().map(|(&(a, b), &n)| (a, b, n))
    }

    /// Adds the counters of `other`.
    pub fn merge(&mut self, other: &AmbiguityStatistics) {
        self.total_matched += other.total_matched;
        self.misconception_as_correct += other.misconception_as_correct;
        self.multiple_misconceptions += other.multiple_misconceptions;
        for (&pair, &n) in &other.cross_matches {
            *self.cross_matches.entry(pair).or_insert(0) += n;
        }
    }

    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = AmbiguityStatistics::default();
    }
}

fn ordered(a: MatchLabel, b: MatchLabel) -> (MatchLabel, MatchLabel) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl fmt::Display for AmbiguityStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Submission matching statistics")?;
        writeln!(f, "------------------------------")?;
        writeln!(f, "Submissions classified:          {}", self.total_matched)?;
        writeln!(f, "Misconception passes as correct: {}", self.misconception_as_correct)?;
        writeln!(f, "Incorrect, equal misconceptions: {}", self.multiple_misconceptions)?;
        writeln!(f, "Cross-matches:")?;
        if self.cross_matches.is_empty() {
            writeln!(f, "  none")?;
        }
        for (a, b, n) in self.cross_matches() {
            writeln!(f, "  {a} / {b}: {n}")?;
        }
        Ok(())
    }
}
