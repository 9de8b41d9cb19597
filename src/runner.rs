// File: src/runner.rs
//
// Subprocess execution for benchmark runs. The external implementations are
// black boxes: the only channel of information is the text they print, so
// the interface here is deliberately narrow (run a shell command, hand back
// the captured text) and sits behind a trait so tests can script outputs.

use crate::score::BenchmarkResult;
use std::process::Command;

/// Runs a shell command and captures its standard output as text.
pub trait CommandExecutor {
    fn run(&self, command: &str) -> String;
}

/// Real executor: one OS process per call via `sh -c`, blocking until the
/// process exits. No retry, no timeout; the sweep is strictly sequential so
/// measurements never contend with each other.
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn run(&self, command: &str) -> String {
        match Command::new("sh").arg("-c").arg(command).output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).to_string(),
            // A missing executable collapses into the same path as garbage
            // output: no score line, zero score.
            Err(e) => format!("failed to run '{}': {}", command, e),
        }
    }
}

/// Executes one run of one benchmark. The command template's `{benchmark}`
/// placeholder is replaced with the benchmark path before execution. Exit
/// codes are not interpreted; the output text is the sole signal.
pub fn run_once(
    executor: &dyn CommandExecutor,
    command_template: &str,
    benchmark_name: &str,
    benchmark_path: &str,
    run_index: usize,
) -> BenchmarkResult {
    let command = substitute(command_template, benchmark_path);
    let raw_output = executor.run(&command);
    BenchmarkResult::from_output(benchmark_name, run_index, raw_output)
}

pub fn substitute(command_template: &str, benchmark_path: &str) -> String {
    command_template.replace("{benchmark}", benchmark_path)
}
