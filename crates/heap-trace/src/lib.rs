#![deny(missing_docs)]
#![doc = "Recording model, trace parser and submission file loading for build-heap exercises."]

/// Trace parser turning recordings into observed state and swap sequences.
pub mod parser;
/// JSAV step format of a recorded exercise attempt.
pub mod recording;
/// JSAV inspector submission files and manual classification labels.
pub mod submissions;

pub use parser::{
    parse, parse_values, parse_with, states_from_swaps, swaps_from_states, ObservedTrace,
    StepPolicy,
};
pub use recording::{Cell, Recording, Step};
pub use submissions::{
    ExerciseMetadata, InspectorFile, ManualLabel, ScoreRow, Submission, SubmissionSet,
    SUPPORTED_EXERCISE_TYPES,
};
