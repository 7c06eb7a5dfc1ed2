use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    classify::{self, ClassifyArgs},
    describe,
    show::{self, ShowArgs},
    summary::{self, SummaryArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "heapmatch", about = "Build-heap misconception matcher")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every build-heap submission of one or more inspector files.
    Classify(ClassifyArgs),
    /// List the loop/heapify variant catalogue with class codes.
    Describe,
    /// Print the parsed array states of one submission.
    Show(ShowArgs),
    /// Print the JSAV score of every submission as CSV.
    Summary(SummaryArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Classify(args) => classify::run(&args),
        Command::Describe => describe::run(),
        Command::Show(args) => show::run(&args),
        Command::Summary(args) => summary::run(&args),
    }
}
