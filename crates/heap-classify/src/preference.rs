use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codes::ClassCode;

/// Classes observed at least three times in the labelled corpus, most
/// frequent first.
const MANUAL_ORDER: [ClassCode; 19] = [
    100, 200, 101, 400, 102, 106, 300, 800, 201, 109, 105, 107, 108, 301, 500, 202, 206, 402, 801,
];

/// Submissions per loop variant in the labelled corpus of 1430 traces.
const LOOP_COUNTS: [(ClassCode, u64); 8] = [
    (100, 1051),
    (200, 90),
    (300, 19),
    (400, 33),
    (500, 7),
    (600, 1),
    (700, 1),
    (800, 19),
];

/// Submissions per heapify variant in the same corpus.
const HEAPIFY_COUNTS: [(ClassCode, u64); 12] = [
    (0, 1053),
    (1, 74),
    (2, 32),
    (3, 1),
    (4, 4),
    (5, 6),
    (6, 24),
    (7, 7),
    (8, 5),
    (9, 14),
    (10, 1),
    (11, 1),
];

/// Total order over class codes used to break ties; lower is preferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceTable {
    values: BTreeMap<ClassCode, u32>,
}

impl Default for PreferenceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PreferenceTable {
    /// Table derived from the labelled build-heap corpus.
    pub fn standard() -> Self {
        Self::from_counts(&MANUAL_ORDER, &LOOP_COUNTS, &HEAPIFY_COUNTS)
    }

    /// Builds a table from an explicit order followed by every remaining
    /// loop/heapify combination ranked by the product of their corpus
    /// counts, higher products and then higher codes first.
    pub fn from_counts(
        manual: &[ClassCode],
        loop_counts: &[(ClassCode, u64)],
        heapify_counts: &[(ClassCode, u64)],
    ) -> Self {
        let mut values = BTreeMap::new();
        for &code in manual {
            let next = values.len() as u32;
            values.entry(code).or_insert(next);
        }

        let mut derived: Vec<(u64, ClassCode)> = loop_counts
            .iter()
            .flat_map(|&(loop_code, loop_count)| {
                heapify_counts.iter().map(move |&(heapify_code, count)| {
                    (loop_count * count, loop_code + heapify_code)
                })
            })
            .collect();
        derived.sort_unstable_by_key(|&entry| Reverse(entry));
        for (_, code) in derived {
            let next = values.len() as u32;
            values.entry(code).or_insert(next);
        }
        Self { values }
    }

    /// Preference value of `code`; codes outside the table rank by their own value.
    pub fn preference(&self, code: ClassCode) -> u32 {
        self.values.get(&code).copied().unwrap_or(code)
    }

    /// Number of ranked codes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no code is ranked.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most preferred code of `candidates`, or 0 when there is none.
    ///
    /// The earliest candidate wins between equal preferences.
    pub fn choose_class(&self, candidates: &[ClassCode]) -> ClassCode {
        let mut best: Option<(u32, ClassCode)> = None;
        for &code in candidates {
            let preference = self.preference(code);
            if best.map_or(true, |(current, _)| preference < current) {
                best = Some((preference, code));
            }
        }
        best.map_or(0, |(_, code)| code)
    }
}

/// Strategy resolving several classes tied at the best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// First tied class in catalogue order.
    FirstInCatalogue,
    /// Tied class ranked highest by the [`PreferenceTable`].
    Preference,
}

impl TieBreak {
    /// Picks one of `tied` (given in catalogue order), or 0 when empty.
    pub fn resolve(self, tied: &[ClassCode], table: &PreferenceTable) -> ClassCode {
        match self {
            TieBreak::FirstInCatalogue => tied.first().copied().unwrap_or(0),
            TieBreak::Preference => table.choose_class(tied),
        }
    }
}
