use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use heap_classify::{classify_batch, BuildHeapMatcher, Classification, MatchOptions, MatcherKind};
use heap_trace::Recording;
use tracing::{info, warn};

use super::load_submissions;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// JSAV-inspector submission files, merged in order.
    #[arg(long, required = true, num_args = 1..)]
    pub submissions: Vec<PathBuf>,
    /// CSV file of manually assigned classes (`year,id,manual_class`).
    #[arg(long)]
    pub manual: Option<PathBuf>,
    /// YAML or JSON matching options.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Matcher applied to every submission.
    #[arg(long, value_enum, default_value_t = MatcherArg::Primary)]
    pub matcher: MatcherArg,
    /// Print one `id class debug` line per submission.
    #[arg(long)]
    pub print_classes: bool,
    /// Worker threads; 0 uses every available core.
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatcherArg {
    Primary,
    LoopHypothesis,
    Replicated,
}

impl From<MatcherArg> for MatcherKind {
    fn from(arg: MatcherArg) -> Self {
        match arg {
            MatcherArg::Primary => MatcherKind::Primary,
            MatcherArg::LoopHypothesis => MatcherKind::LoopHypothesis,
            MatcherArg::Replicated => MatcherKind::Replicated,
        }
    }
}

pub fn run(args: &ClassifyArgs) -> Result<(), Box<dyn Error>> {
    let mut set = load_submissions(&args.submissions)?;
    if let Some(path) = &args.manual {
        let labelled = set.load_manual_classification_file(path)?;
        info!(labelled, "manual classification loaded");
    }
    let options = match &args.config {
        Some(path) => MatchOptions::load(path)?,
        None => MatchOptions::default(),
    };
    let matcher = BuildHeapMatcher::new(options)?;

    let exercise_type = &set.metadata().exercise_type;
    if exercise_type != "buildheap" {
        warn!(%exercise_type, "no matcher for this exercise type");
        return Ok(());
    }

    let recordings: Vec<Recording> = set
        .submissions()
        .iter()
        .map(|submission| submission.recording.clone())
        .collect();
    let kind = MatcherKind::from(args.matcher);
    let outcome = classify_batch(&matcher, &recordings, kind, args.threads)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut correct = 0usize;
    if args.print_classes {
        writeln!(out, "id best_class debug")?;
    }
    for (submission, result) in set.submissions().iter().zip(&outcome.results) {
        if let (Ok(Classification::Class(matched)), Some(manual)) =
            (result, set.manual_class(submission.id))
        {
            if matched.class == manual {
                correct += 1;
            }
        }
        if args.print_classes {
            match result {
                Ok(classification) => writeln!(out, "{} {classification}", submission.id)?,
                Err(err) => writeln!(out, "{} error: {err}", submission.id)?,
            }
        }
    }

    if set.labelled_count() > 0 && kind != MatcherKind::Replicated {
        let accuracy = correct as f64 / recordings.len().max(1) as f64;
        writeln!(out, "Classification accuracy: {accuracy:.3}")?;
    }
    if kind != MatcherKind::Primary {
        writeln!(out)?;
        write!(out, "{}", outcome.statistics)?;
    }
    Ok(())
}
