use heap_core::{HeapError, Key};
use serde::{Deserialize, Serialize};

/// One array cell of a recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Value shown at the position.
    pub v: Key,
}

/// Snapshot of the heap array after one user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Cell values in array order.
    pub ind: Vec<Cell>,
    /// Presentation style of the step; not used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<serde_json::Value>,
    /// CSS classes of the step; not used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<serde_json::Value>,
}

impl Step {
    /// Creates a step from plain array values.
    pub fn from_values(values: &[Key]) -> Self {
        Self {
            ind: values.iter().map(|&v| Cell { v }).collect(),
            style: None,
            classes: None,
        }
    }

    /// Returns the array values of the step.
    pub fn values(&self) -> Vec<Key> {
        self.ind.iter().map(|cell| cell.v).collect()
    }

    /// Returns the number of array positions in the step.
    pub fn width(&self) -> usize {
        self.ind.len()
    }
}

/// Ordered list of steps recorded while a student solved the exercise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recording {
    steps: Vec<Step>,
}

impl Recording {
    /// Wraps already decoded steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Builds a recording from a list of array snapshots.
    pub fn from_arrays<A: AsRef<[Key]>>(arrays: &[A]) -> Self {
        Self {
            steps: arrays
                .iter()
                .map(|array| Step::from_values(array.as_ref()))
                .collect(),
        }
    }

    /// Decodes a recording from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, HeapError> {
        serde_json::from_str(json).map_err(|err| HeapError::serde("recording_deserialize", err))
    }

    /// Returns the recorded steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
