use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use heap_core::{ErrorInfo, HeapError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::recording::Recording;

/// Exercise types accepted in inspector files.
pub const SUPPORTED_EXERCISE_TYPES: [&str; 3] = ["buildheap", "dijkstra", "quicksort"];

const APPLICATION: &str = "JSAV Inspector";
const FILE_VERSION: u32 = 1;

/// Course and exercise description stored in an inspector file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseMetadata {
    /// Exercise family, one of [`SUPPORTED_EXERCISE_TYPES`].
    #[serde(rename = "type")]
    pub exercise_type: String,
    /// Course code.
    #[serde(default)]
    pub course_code: String,
    /// Course name.
    #[serde(default)]
    pub course_name: String,
    /// Course instance, usually a year.
    #[serde(default)]
    pub course_instance: Value,
    /// Long exercise name.
    #[serde(default)]
    pub longname: String,
    /// Remaining metadata fields, kept for round trips.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One graded attempt with its recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Submission identifier assigned by the grading system.
    pub id: u64,
    /// Points given by the exercise.
    #[serde(default)]
    pub points: f64,
    /// Maximum points of the exercise.
    #[serde(default)]
    pub max_points: f64,
    /// Recorded steps of the attempt.
    pub recording: Recording,
}

impl Submission {
    /// Returns the exercise score in whole percent, rounded down.
    pub fn score_percent(&self) -> u32 {
        if self.max_points <= 0.0 {
            return 0;
        }
        (100.0 * self.points / self.max_points).floor().max(0.0) as u32
    }
}

/// Raw inspector file as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorFile {
    /// Producing application; must be "JSAV Inspector".
    pub application: String,
    /// File format version; must be 1.
    pub version: u32,
    /// Course and exercise metadata.
    pub metadata: ExerciseMetadata,
    /// Submissions of the exercise.
    pub submissions: Vec<Submission>,
}

impl InspectorFile {
    /// Decodes and validates an inspector file from JSON text.
    pub fn from_json(json: &str) -> Result<Self, HeapError> {
        let file: InspectorFile = serde_json::from_str(json)
            .map_err(|err| HeapError::serde("inspector_deserialize", err))?;
        file.validate()?;
        Ok(file)
    }

    /// Reads and validates an inspector file from disk.
    pub fn load(path: &Path) -> Result<Self, HeapError> {
        let json = fs::read_to_string(path).map_err(|err| {
            HeapError::Io(
                ErrorInfo::new("inspector_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), HeapError> {
        if self.application != APPLICATION {
            return Err(field_error("application", &self.application, APPLICATION));
        }
        if self.version != FILE_VERSION {
            return Err(field_error(
                "version",
                &self.version.to_string(),
                &FILE_VERSION.to_string(),
            ));
        }
        if !SUPPORTED_EXERCISE_TYPES.contains(&self.metadata.exercise_type.as_str()) {
            return Err(field_error(
                "type",
                &self.metadata.exercise_type,
                &SUPPORTED_EXERCISE_TYPES.join("|"),
            ));
        }
        Ok(())
    }
}

fn field_error(field: &str, found: &str, expected: &str) -> HeapError {
    HeapError::Serde(
        ErrorInfo::new("inspector-field-mismatch", "unexpected inspector file field")
            .with_context("field", field)
            .with_context("found", found)
            .with_context("expected", expected),
    )
}

/// Manually assigned class of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualLabel {
    /// Course year of the submission.
    #[serde(default)]
    pub year: Option<i32>,
    /// Submission identifier.
    pub id: u64,
    /// Class code assigned by a human rater.
    pub manual_class: u32,
}

/// Row of the submission score summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRow {
    /// One-based position in load order.
    pub number: usize,
    /// Submission identifier.
    pub id: u64,
    /// Exercise score in percent.
    pub score_percent: u32,
}

/// Submissions of one exercise merged from one or more inspector files.
#[derive(Debug, Clone)]
pub struct SubmissionSet {
    metadata: ExerciseMetadata,
    loaded: Vec<ExerciseMetadata>,
    submissions: Vec<Submission>,
    by_id: BTreeMap<u64, usize>,
    manual: BTreeMap<u64, u32>,
}

impl SubmissionSet {
    /// Starts a set from a validated inspector file.
    pub fn new(file: InspectorFile) -> Self {
        let mut set = Self {
            metadata: file.metadata.clone(),
            loaded: vec![file.metadata],
            submissions: Vec::new(),
            by_id: BTreeMap::new(),
            manual: BTreeMap::new(),
        };
        set.insert_all(file.submissions);
        info!(
            exercise = %set.metadata.longname,
            exercise_type = %set.metadata.exercise_type,
            submissions = set.submissions.len(),
            "submission file loaded"
        );
        set
    }

    /// Loads a set from an inspector file on disk.
    pub fn load(path: &Path) -> Result<Self, HeapError> {
        Ok(Self::new(InspectorFile::load(path)?))
    }

    /// Merges another inspector file of the same exercise type.
    ///
    /// Submissions with an already known id replace the earlier entry.
    pub fn append(&mut self, file: InspectorFile) -> Result<(), HeapError> {
        if file.metadata.exercise_type != self.metadata.exercise_type {
            let info = ErrorInfo::new(
                "exercise-type-mismatch",
                "appended file has a different exercise type",
            )
            .with_context("expected", self.metadata.exercise_type.clone())
            .with_context("found", file.metadata.exercise_type.clone());
            return Err(HeapError::Serde(info));
        }
        if self.loaded.contains(&file.metadata) {
            let info = ErrorInfo::new("file-already-loaded", "inspector file already loaded")
                .with_context("longname", file.metadata.longname.clone());
            return Err(HeapError::Serde(info));
        }
        let count = file.submissions.len();
        self.loaded.push(file.metadata);
        self.insert_all(file.submissions);
        info!(appended = count, total = self.submissions.len(), "submission file appended");
        Ok(())
    }

    fn insert_all(&mut self, submissions: Vec<Submission>) {
        for submission in submissions {
            match self.by_id.get(&submission.id) {
                Some(&index) => self.submissions[index] = submission,
                None => {
                    self.by_id.insert(submission.id, self.submissions.len());
                    self.submissions.push(submission);
                }
            }
        }
    }

    /// Reads `year,id,manual_class` rows and attaches them to submissions.
    pub fn load_manual_classification<R: Read>(&mut self, reader: R) -> Result<usize, HeapError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut count = 0;
        for row in csv_reader.deserialize::<ManualLabel>() {
            let label = row.map_err(|err| HeapError::serde("manual_csv_row", err))?;
            if !self.by_id.contains_key(&label.id) {
                let info = ErrorInfo::new(
                    "manual-label-unknown-id",
                    "manual label refers to a submission that is not loaded",
                )
                .with_context("id", label.id.to_string());
                return Err(HeapError::Serde(info));
            }
            self.manual.insert(label.id, label.manual_class);
            count += 1;
        }
        Ok(count)
    }

    /// Reads manual labels from a CSV file on disk.
    pub fn load_manual_classification_file(&mut self, path: &Path) -> Result<usize, HeapError> {
        let file = fs::File::open(path).map_err(|err| {
            HeapError::Io(
                ErrorInfo::new("manual_csv_open", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        self.load_manual_classification(file)
    }

    /// Returns the metadata of the first loaded file.
    pub fn metadata(&self) -> &ExerciseMetadata {
        &self.metadata
    }

    /// Returns the submissions in load order.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Looks up a submission by id.
    pub fn get(&self, id: u64) -> Option<&Submission> {
        self.by_id.get(&id).map(|&index| &self.submissions[index])
    }

    /// Returns the manual class of a submission, if labelled.
    pub fn manual_class(&self, id: u64) -> Option<u32> {
        self.manual.get(&id).copied()
    }

    /// Returns the number of manually labelled submissions.
    pub fn labelled_count(&self) -> usize {
        self.manual.len()
    }

    /// Returns the `No,Id,JSAV-score%` summary rows.
    pub fn score_rows(&self) -> Vec<ScoreRow> {
        self.submissions
            .iter()
            .enumerate()
            .map(|(idx, submission)| ScoreRow {
                number: idx + 1,
                id: submission.id,
                score_percent: submission.score_percent(),
            })
            .collect()
    }
}
