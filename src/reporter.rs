// File: src/reporter.rs
//
// Operator-visible console output and the plain-text data files read back
// by the plotting tooling. Console lines mirror what operators have come to
// expect from the driver: per-run narration, per-run scores, and avg lines
// for multi-run sweeps.

use crate::errors::BenchError;
use crate::overhead::OverheadEntry;
use crate::score::BenchmarkResult;
use colored::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct Reporter {
    verbose: bool,
}

impl Reporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_started(&self, benchmark_name: &str, run_index: usize) {
        println!("run {}", run_index);
        println!("running {}", benchmark_name.bright_white());
    }

    pub fn score(&self, result: &BenchmarkResult) {
        println!("{}: {}", result.benchmark_name, format!("{:.2}", result.score).green());
        if self.verbose {
            println!("{}", result.raw_output);
        }
    }

    /// The parse-failure warning: the literal "error" plus the raw output,
    /// so the operator can see what the process actually printed.
    pub fn parse_failure(&self, result: &BenchmarkResult) {
        println!("{} {}", result.benchmark_name, "error".red().bold());
        println!("{}", result.raw_output);
    }

    pub fn reference(&self, reference: f64) {
        println!("reference: {}", reference);
    }

    pub fn overhead(&self, entry: &OverheadEntry) {
        println!(
            "{} overhead: {}%",
            entry.benchmark_name,
            format!("{:.2}", entry.overhead_percentage).yellow()
        );
        println!(
            "{} difference: {}",
            entry.benchmark_name,
            format!("{:.2}", entry.absolute_difference).yellow()
        );
    }

    pub fn average_score(&self, benchmark_name: &str, average: f64) {
        println!("{} avg: {}", benchmark_name, format!("{:.2}", average).green().bold());
    }

    pub fn average_overhead(&self, benchmark_name: &str, overhead: f64, difference: f64) {
        println!(
            "{} avg overhead: {}%",
            benchmark_name,
            format!("{:.2}", overhead).yellow().bold()
        );
        println!(
            "{} avg difference: {}",
            benchmark_name,
            format!("{:.2}", difference).yellow().bold()
        );
    }

    /// Per-benchmark structural failure (missing baseline entry, zero
    /// reference). The sweep continues with the next benchmark.
    pub fn benchmark_skipped(&self, error: &BenchError) {
        println!("{}", error);
    }

    pub fn warn_missing_executable(&self, command_template: &str) {
        println!(
            "{} couldn't find the executable for '{}' - scores will come out as errors",
            "warning:".yellow().bold(),
            command_template
        );
    }
}

/// One of the emitted data files (results, reference, overhead,
/// overhead-difference). All share the same shape: a run-count header line,
/// `<name> <value>` entries to 2 decimal places, and for multi-run sweeps an
/// `avg:` summary line followed by a blank separator.
pub struct ScoreFile {
    writer: BufWriter<File>,
    path: String,
}

impl ScoreFile {
    pub fn create(path: &Path, run_count: usize) -> Result<Self, BenchError> {
        let file = File::create(path)
            .map_err(|e| BenchError::io(format!("creating '{}'", path.display()), e))?;
        let mut score_file =
            Self { writer: BufWriter::new(file), path: path.display().to_string() };
        score_file.write_line(&format!("{} {}", crate::baseline::RUN_COUNT_KEY, run_count))?;
        Ok(score_file)
    }

    pub fn write_score(&mut self, benchmark_name: &str, value: f64) -> Result<(), BenchError> {
        self.write_line(&format!("{} {:.2}", benchmark_name, value))
    }

    pub fn write_average(&mut self, benchmark_name: &str, value: f64) -> Result<(), BenchError> {
        self.write_line(&format!("avg: {} {:.2}\n", benchmark_name, value))
    }

    fn write_line(&mut self, line: &str) -> Result<(), BenchError> {
        writeln!(self.writer, "{}", line)
            .map_err(|e| BenchError::io(format!("writing '{}'", self.path), e))
    }

    pub fn finish(mut self) -> Result<(), BenchError> {
        self.writer
            .flush()
            .map_err(|e| BenchError::io(format!("flushing '{}'", self.path), e))
    }
}
