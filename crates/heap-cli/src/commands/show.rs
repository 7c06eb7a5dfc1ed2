use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use heap_trace::{parse_with, StepPolicy};

use super::load_submissions;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// JSAV-inspector submission files, merged in order.
    #[arg(long, required = true, num_args = 1..)]
    pub submissions: Vec<PathBuf>,
    /// Submission identifier.
    #[arg(long)]
    pub id: u64,
    /// Reject steps that are not a single exchange instead of dropping them.
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: &ShowArgs) -> Result<(), Box<dyn Error>> {
    let set = load_submissions(&args.submissions)?;
    let submission = set
        .get(args.id)
        .ok_or_else(|| format!("no submission with id {}", args.id))?;
    let policy = if args.strict {
        StepPolicy::Strict
    } else {
        StepPolicy::Lenient
    };
    let observed = parse_with(&submission.recording, policy)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "Submission {}: {} states, {} swaps",
        submission.id,
        observed.states().len(),
        observed.swaps().len()
    )?;
    let header: String = (0..observed.heap_size())
        .map(|idx| format!(" {idx:>3} "))
        .collect();
    writeln!(out, "     {header}")?;
    for (step, state) in observed.states().iter().enumerate() {
        // cells exchanged by the following swap are parenthesised
        let next = observed.swaps().get(step);
        let row: String = state
            .iter()
            .enumerate()
            .map(|(idx, value)| match next {
                Some(swap) if swap.touches(idx) => format!("({value:>3})"),
                _ => format!(" {value:>3} "),
            })
            .collect();
        writeln!(out, "{step:>3}: {row}")?;
    }
    Ok(())
}
