// File: src/errors.rs
//
// Error handling for the vmbench driver. Structured error types with
// pretty-printed, colored messages for the operator.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;

/// Errors raised by the scoring pipeline.
///
/// Score extraction failures are deliberately NOT represented here: a run
/// whose output yields no score degrades to a zero score and a logged
/// warning, and the sweep continues. Only structural problems (a missing or
/// unreadable baseline, a broken config) abort a flow.
#[derive(Debug)]
pub enum BenchError {
    /// The baseline file required for an overhead comparison does not exist.
    MissingBaselineFile { path: PathBuf },

    /// A baseline file line could not be split into a key and numeric value.
    MalformedBaselineLine { line_number: usize, line: String },

    /// The recorded reference score is zero, so no percentage overhead can
    /// be computed for this benchmark.
    DivisionByZeroBaseline { benchmark: String },

    /// The requested benchmark has no entry in the loaded baseline.
    MissingBaselineEntry { benchmark: String },

    /// Bad configuration: unknown implementation name, unreadable config
    /// file, conflicting flags.
    Config { message: String },

    /// Filesystem failure while writing a results or baseline file.
    Io { context: String, source: std::io::Error },
}

impl BenchError {
    pub fn config(message: impl Into<String>) -> Self {
        BenchError::Config { message: message.into() }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        BenchError::Io { context: context.into(), source }
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BenchError::MissingBaselineFile { path } => {
                write!(
                    f,
                    "{}: no baseline file at '{}' - record one with --create-reference first",
                    "Missing Baseline".red().bold(),
                    path.display()
                )
            }
            BenchError::MalformedBaselineLine { line_number, line } => {
                write!(
                    f,
                    "{}: line {} is not '<key> <value>': {:?}",
                    "Malformed Baseline".red().bold(),
                    line_number,
                    line
                )
            }
            BenchError::DivisionByZeroBaseline { benchmark } => {
                write!(
                    f,
                    "{}: reference score for '{}' is zero, overhead is undefined",
                    "Zero Baseline".red().bold(),
                    benchmark
                )
            }
            BenchError::MissingBaselineEntry { benchmark } => {
                write!(
                    f,
                    "{}: '{}' has no entry in the reference file",
                    "Missing Baseline Entry".red().bold(),
                    benchmark
                )
            }
            BenchError::Config { message } => {
                write!(f, "{}: {}", "Config Error".red().bold(), message)
            }
            BenchError::Io { context, source } => {
                write!(f, "{}: {}: {}", "IO Error".red().bold(), context, source)
            }
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
