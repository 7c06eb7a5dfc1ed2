use heap_classify::{
    catalogue, class_name, AmbiguityStatistics, BuildHeapMatcher, MatchLabel, PreferenceTable,
    ReplicatedVariant, TieBreak,
};
use proptest::prelude::*;

#[test]
fn standard_table_ranks_manual_classes_first() {
    let table = PreferenceTable::standard();
    assert_eq!(table.len(), 96);
    assert_eq!(table.preference(100), 0);
    assert_eq!(table.preference(200), 1);
    assert_eq!(table.preference(801), 18);
}

#[test]
fn remaining_classes_follow_corpus_frequencies() {
    let table = PreferenceTable::standard();
    assert_eq!(table.preference(104), 19);
    assert_eq!(table.preference(401), 20);
    // equal products: the higher code ranks first
    assert_eq!(table.preference(700), 22);
    assert_eq!(table.preference(600), 23);
    assert_eq!(table.preference(111), 24);
    assert_eq!(table.preference(110), 25);
}

#[test]
fn codes_outside_the_table_rank_by_value() {
    let table = PreferenceTable::standard();
    assert_eq!(table.preference(11), 11);
    assert_eq!(table.choose_class(&[16, 950]), 16);
    assert_eq!(table.choose_class(&[]), 0);
    assert_eq!(table.choose_class(&[102, 201, 100]), 100);
    assert_eq!(table.choose_class(&[201, 102]), 102);
}

#[test]
fn tie_break_strategies_differ() {
    let table = PreferenceTable::standard();
    let tied = [109, 100];
    assert_eq!(TieBreak::FirstInCatalogue.resolve(&tied, &table), 109);
    assert_eq!(TieBreak::Preference.resolve(&tied, &table), 100);
    assert_eq!(TieBreak::FirstInCatalogue.resolve(&[], &table), 0);
}

#[test]
fn custom_tables() {
    let table = PreferenceTable::from_counts(&[300], &[(100, 5), (300, 1)], &[(0, 2), (1, 3)]);
    assert_eq!(table.preference(300), 0);
    assert_eq!(table.preference(101), 1);
    assert_eq!(table.preference(100), 2);
    assert_eq!(table.preference(301), 3);
}

proptest! {
    #[test]
    fn choose_class_is_idempotent_on_singletons(code in 0u32..1000) {
        let matcher = BuildHeapMatcher::default();
        prop_assert_eq!(matcher.choose_class(&[code]), code);
    }
}

#[test]
fn catalogue_order_and_names() {
    let codes: Vec<u32> = catalogue().map(|entry| entry.code()).collect();
    assert_eq!(codes.len(), 96);
    assert_eq!(codes[0], 100);
    assert_eq!(codes[12], 200);
    assert_eq!(codes[95], 811);
    assert_eq!(class_name(100).unwrap(), "Correct / Correct");
    assert_eq!(class_name(702).unwrap(), "Zigzag top-down RL / Delayed-Recursion");
    assert_eq!(class_name(11).unwrap(), "No-Swaps");
    assert_eq!(class_name(950), None);
    assert_eq!(class_name(112), None);

    let described = BuildHeapMatcher::default().describe_variants();
    assert_eq!(described.len(), 97);
    assert_eq!(described[0].0, 0);
    assert_eq!(described[1], (100, "Correct / Correct".to_string()));
}

#[test]
fn cross_matches_are_unordered() {
    let mut stats = AmbiguityStatistics::default();
    let (a, b, c) = (MatchLabel::Class(100), MatchLabel::Class(109), MatchLabel::Class(200));
    stats.record_ties(&[b, a, c]);
    stats.record_ties(&[a, b]);
    assert_eq!(stats.cross_match(a, b), 2);
    assert_eq!(stats.cross_match(b, a), 2);
    assert_eq!(stats.cross_match(a, c), 1);
    assert_eq!(stats.cross_matches().count(), 3);
}

#[test]
fn statistics_merge_and_reset() {
    let mut left = AmbiguityStatistics::default();
    left.total_matched = 3;
    left.misconception_as_correct = 1;
    left.record_ties(&[MatchLabel::Class(100), MatchLabel::Class(109)]);
    let mut right = AmbiguityStatistics::default();
    right.total_matched = 2;
    right.multiple_misconceptions = 1;
    let correct = MatchLabel::Variant(ReplicatedVariant::Correct);
    let duplicate = MatchLabel::Variant(ReplicatedVariant::WrongDuplicate);
    right.record_ties(&[correct, duplicate]);

    left.merge(&right);
    assert_eq!(left.total_matched, 5);
    assert_eq!(left.misconception_as_correct, 1);
    assert_eq!(left.multiple_misconceptions, 1);
    assert_eq!(left.cross_match(duplicate, correct), 1);

    let report = left.to_string();
    assert!(report.starts_with("Submission matching statistics"));
    assert!(report.contains("Submissions classified:          5"));
    assert!(report.contains("100 / 109: 1"));

    left.reset();
    assert_eq!(left, AmbiguityStatistics::default());
}
