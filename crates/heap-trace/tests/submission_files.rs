use std::io::Write;

use heap_core::HeapError;
use heap_trace::{InspectorFile, SubmissionSet};

fn inspector_json(course_instance: u32, ids: &[u64]) -> String {
    let submissions: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id": {id}, "points": 3, "max_points": 4,
                    "recording": [{{"ind": [{{"v": 2}}, {{"v": 1}}]}},
                                  {{"ind": [{{"v": 1}}, {{"v": 2}}]}}]}}"#
            )
        })
        .collect();
    format!(
        r#"{{"application": "JSAV Inspector", "version": 1,
            "metadata": {{"type": "buildheap", "course_code": "CS-A1140",
                          "course_name": "Data Structures and Algorithms",
                          "course_instance": {course_instance},
                          "longname": "Build-heap"}},
            "submissions": [{}]}}"#,
        submissions.join(",")
    )
}

#[test]
fn inspector_file_is_validated() {
    let file = InspectorFile::from_json(&inspector_json(2016, &[1, 2])).unwrap();
    assert_eq!(file.submissions.len(), 2);
    assert_eq!(file.metadata.exercise_type, "buildheap");

    let wrong = inspector_json(2016, &[1]).replace("JSAV Inspector", "Other Tool");
    let err = InspectorFile::from_json(&wrong).unwrap_err();
    match err {
        HeapError::Serde(info) => {
            assert_eq!(info.code, "inspector-field-mismatch");
            assert_eq!(info.context.get("field"), Some(&"application".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let unsupported = inspector_json(2016, &[1]).replace("buildheap", "mergesort");
    assert!(InspectorFile::from_json(&unsupported).is_err());
}

#[test]
fn files_merge_by_submission_id() {
    let mut set = SubmissionSet::new(InspectorFile::from_json(&inspector_json(2016, &[1, 2])).unwrap());
    set.append(InspectorFile::from_json(&inspector_json(2018, &[2, 3])).unwrap())
        .unwrap();
    assert_eq!(set.submissions().len(), 3);
    assert!(set.get(3).is_some());
    assert_eq!(set.score_rows()[0].score_percent, 75);
    assert_eq!(set.score_rows()[2].number, 3);
}

#[test]
fn loading_the_same_file_twice_is_rejected() {
    let mut set = SubmissionSet::new(InspectorFile::from_json(&inspector_json(2016, &[1])).unwrap());
    let err = set
        .append(InspectorFile::from_json(&inspector_json(2016, &[1])).unwrap())
        .unwrap_err();
    assert_eq!(err.info().code, "file-already-loaded");
}

#[test]
fn manual_labels_attach_to_loaded_submissions() {
    let mut set = SubmissionSet::new(InspectorFile::from_json(&inspector_json(2016, &[10, 11])).unwrap());
    let csv = "year,id,manual_class\n2016,10,100\n2016,11,0\n";
    assert_eq!(set.load_manual_classification(csv.as_bytes()).unwrap(), 2);
    assert_eq!(set.manual_class(10), Some(100));
    assert_eq!(set.manual_class(11), Some(0));
    assert_eq!(set.labelled_count(), 2);

    let unknown = "year,id,manual_class\n2016,99,100\n";
    let err = set.load_manual_classification(unknown.as_bytes()).unwrap_err();
    assert_eq!(err.info().code, "manual-label-unknown-id");
}

#[test]
fn files_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("2016.json");
    std::fs::write(&path, inspector_json(2016, &[5])).unwrap();
    let csv_path = dir.path().join("manual.csv");
    let mut csv = std::fs::File::create(&csv_path).unwrap();
    writeln!(csv, "year,id,manual_class").unwrap();
    writeln!(csv, "2016,5,101").unwrap();
    drop(csv);

    let mut set = SubmissionSet::load(&path).unwrap();
    set.load_manual_classification_file(&csv_path).unwrap();
    assert_eq!(set.manual_class(5), Some(101));

    let missing = SubmissionSet::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, HeapError::Io(_)));
}
