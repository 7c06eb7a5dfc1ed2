use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use super::load_submissions;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// JSAV-inspector submission files, merged in order.
    #[arg(long, required = true, num_args = 1..)]
    pub submissions: Vec<PathBuf>,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let set = load_submissions(&args.submissions)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "No,Id,JSAV-score%")?;
    for row in set.score_rows() {
        writeln!(out, "{},{},{}", row.number, row.id, row.score_percent)?;
    }
    Ok(())
}
