//! csvetl CLI
//!
//! ```bash
//! csvetl                         # input.csv -> output.csv
//! csvetl data/in.csv data/out.csv
//! ```
//!
//! Status lines go to stderr. The exit code is 0 whether the run succeeds
//! or fails; the outcome is reported in the log.

use clap::Parser;
use csvetl::config::{DEFAULT_SINK, DEFAULT_SOURCE};
use csvetl::{EtlConfig, Pipeline, TracingLog};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csvetl", version)]
#[command(about = "Upper-case every value of a CSV file", long_about = None)]
struct Cli {
    /// Source CSV file
    #[arg(default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Sink CSV file (created or overwritten)
    #[arg(default_value = DEFAULT_SINK)]
    sink: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    csvetl::logging::init("info");

    let pipeline = Pipeline::new(EtlConfig::new(cli.source, cli.sink));
    pipeline.run(&TracingLog);
}
