// File: src/main.rs
//
// Main entry point for the vmbench benchmark driver. Parses command-line
// arguments into an immutable configuration and runs the scoring sweep.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use vmbench::config::{Config, Mode};
use vmbench::pipeline::run_sweep;
use vmbench::reporter::Reporter;
use vmbench::runner::ShellExecutor;

#[derive(Parser)]
#[command(
    name = "vmbench",
    about = "Run benchmarks against language implementations and compare scores",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Record the measured scores as the new reference baseline
    #[arg(long = "create-reference")]
    create_reference: bool,

    /// Compare measured scores against the recorded reference baseline
    #[arg(long = "calculate-overhead")]
    calculate_overhead: bool,

    /// How many times to run each benchmark
    #[arg(long = "number-of-runs", default_value_t = 1)]
    number_of_runs: usize,

    /// Which configured implementation to benchmark
    #[arg(long, default_value = "ruby")]
    implementation: String,

    /// Sort profiler output (only meaningful for the profiling implementations)
    #[arg(long = "profile-sort")]
    profile_sort: bool,

    /// TOML file overriding the benchmark suite and implementation commands
    #[arg(long)]
    config: Option<PathBuf>,

    /// Echo each run's full output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mode = match (cli.create_reference, cli.calculate_overhead) {
        (true, true) => {
            eprintln!("can't use --create-reference and --calculate-overhead together");
            return ExitCode::FAILURE;
        }
        (true, false) => Mode::CreateReference,
        (false, true) => Mode::CalculateOverhead,
        (false, false) => Mode::Measure,
    };

    let config = match Config::build(
        mode,
        cli.number_of_runs,
        &cli.implementation,
        cli.profile_sort,
        cli.verbose,
        cli.config.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let reporter = Reporter::new(config.verbose);

    if !config.executable_found() {
        reporter.warn_missing_executable(&config.command_template);
    }

    match run_sweep(&config, &ShellExecutor, &reporter) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
