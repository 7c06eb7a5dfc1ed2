pub mod classify;
pub mod describe;
pub mod show;
pub mod summary;

use std::error::Error;
use std::path::PathBuf;

use heap_trace::{InspectorFile, SubmissionSet};

/// Loads the first file and appends the rest in order.
pub fn load_submissions(paths: &[PathBuf]) -> Result<SubmissionSet, Box<dyn Error>> {
    let (first, rest) = paths
        .split_first()
        .ok_or("at least one --submissions file is required")?;
    let mut set = SubmissionSet::load(first)?;
    for path in rest {
        set.append(InspectorFile::load(path)?)?;
    }
    Ok(set)
}
