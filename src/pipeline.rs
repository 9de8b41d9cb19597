// File: src/pipeline.rs
//
// The scoring pipeline: runs every configured benchmark N times, strictly
// sequentially, turning raw subprocess text into aggregate scores and,
// depending on the mode, a recorded reference or an overhead comparison
// against one. Per-benchmark failures never abort the sweep; only a missing
// or unreadable baseline does.

use crate::aggregate::AggregateScore;
use crate::baseline::{load_baseline, record_baseline, Baseline};
use crate::config::{Config, Mode};
use crate::errors::BenchError;
use crate::overhead::{compute_overhead, OverheadAccumulator, OverheadEntry};
use crate::reporter::{Reporter, ScoreFile};
use crate::runner::{run_once, CommandExecutor};

/// Lifecycle of one benchmark inside a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkState {
    Pending,
    Running(usize),
    Aggregated,
    CompletedWithOverhead,
}

/// Everything the sweep learned about one benchmark.
#[derive(Debug)]
pub struct BenchmarkOutcome {
    pub aggregate: AggregateScore,
    pub state: BenchmarkState,
    /// Every run's result, in order, parse failures included.
    pub results: Vec<crate::score::BenchmarkResult>,
    /// One entry per successfully compared run (overhead mode only).
    pub overhead_entries: Vec<OverheadEntry>,
}

#[derive(Debug)]
pub struct SweepSummary {
    pub outcomes: Vec<BenchmarkOutcome>,
}

impl SweepSummary {
    pub fn outcome(&self, benchmark_name: &str) -> Option<&BenchmarkOutcome> {
        self.outcomes.iter().find(|o| o.aggregate.benchmark_name == benchmark_name)
    }
}

/// Runs the full configured sweep. Always completes every benchmark and
/// every run; returns an error only for structural problems (baseline
/// missing or malformed, a data file that cannot be written).
pub fn run_sweep(
    config: &Config,
    executor: &dyn CommandExecutor,
    reporter: &Reporter,
) -> Result<SweepSummary, BenchError> {
    let baseline = match config.mode {
        Mode::CalculateOverhead => Some(load_baseline(&config.reference_path)?),
        _ => None,
    };

    let mut results_file = ScoreFile::create(&config.results_path, config.runs)?;
    let mut overhead_files = match config.mode {
        Mode::CalculateOverhead => Some((
            ScoreFile::create(&config.overhead_path, config.runs)?,
            ScoreFile::create(&config.overhead_difference_path, config.runs)?,
        )),
        _ => None,
    };

    let mut outcomes = Vec::new();
    let mut recordable = Vec::new();

    for benchmark_name in &config.benchmarks {
        let outcome = run_benchmark(
            config,
            executor,
            reporter,
            benchmark_name,
            baseline.as_ref(),
            &mut results_file,
            &mut overhead_files,
        )?;

        if config.mode == Mode::CreateReference {
            // A single-run sweep only records benchmarks whose one run
            // produced a score; a multi-run sweep records the average even
            // when some runs failed.
            let single_run_failed =
                config.runs == 1 && outcome.results.iter().any(|r| !r.valid);
            if config.runs > 1 || !single_run_failed {
                recordable.push(outcome.aggregate.clone());
            }
        }

        outcomes.push(outcome);
    }

    if config.mode == Mode::CreateReference {
        record_baseline(&config.reference_path, &recordable, config.runs)?;
    }

    results_file.finish()?;
    if let Some((overhead_file, difference_file)) = overhead_files {
        overhead_file.finish()?;
        difference_file.finish()?;
    }

    Ok(SweepSummary { outcomes })
}

fn run_benchmark(
    config: &Config,
    executor: &dyn CommandExecutor,
    reporter: &Reporter,
    benchmark_name: &str,
    baseline: Option<&Baseline>,
    results_file: &mut ScoreFile,
    overhead_files: &mut Option<(ScoreFile, ScoreFile)>,
) -> Result<BenchmarkOutcome, BenchError> {
    let mut state = BenchmarkState::Pending;
    let mut aggregate = AggregateScore::new(benchmark_name, config.runs);
    let mut overhead_totals = OverheadAccumulator::new(config.runs);
    let mut overhead_entries = Vec::new();
    let mut results = Vec::new();
    let benchmark_path = config.benchmark_path(benchmark_name);

    // Resolved once per benchmark: a missing entry or zero reference skips
    // this benchmark's overhead reporting but never the runs themselves.
    let reference = baseline.and_then(|baseline| {
        match baseline
            .reference_for(benchmark_name)
            .and_then(|reference| nonzero_reference(benchmark_name, reference))
        {
            Ok(reference) => Some(reference),
            Err(e) => {
                reporter.benchmark_skipped(&e);
                None
            }
        }
    });

    for run_index in 1..=config.runs {
        state = BenchmarkState::Running(run_index);
        reporter.run_started(benchmark_name, run_index);

        let result = run_once(
            executor,
            &config.command_template,
            benchmark_name,
            &benchmark_path,
            run_index,
        );

        if result.valid {
            reporter.score(&result);

            if let Some(reference) = reference {
                reporter.reference(reference);
                let entry = compute_overhead(benchmark_name, result.score, reference)?;
                reporter.overhead(&entry);
                if let Some((overhead_file, difference_file)) = overhead_files {
                    overhead_file.write_score(benchmark_name, entry.overhead_percentage)?;
                    difference_file.write_score(benchmark_name, entry.absolute_difference)?;
                }
                overhead_totals.record(&entry);
                overhead_entries.push(entry);
            }

            results_file.write_score(benchmark_name, result.score)?;
        } else {
            reporter.parse_failure(&result);
        }

        // Zero scores from failed runs count toward the average.
        aggregate.push(&result);
        results.push(result);
    }

    // A zero-run sweep never leaves Pending; anything else aggregates.
    if config.runs > 0 {
        state = BenchmarkState::Aggregated;
    }

    if config.runs > 1 {
        reporter.average_score(benchmark_name, aggregate.average);
        results_file.write_average(benchmark_name, aggregate.average)?;

        if reference.is_some() {
            reporter.average_overhead(
                benchmark_name,
                overhead_totals.average_overhead(),
                overhead_totals.average_difference(),
            );
            if let Some((overhead_file, difference_file)) = overhead_files {
                overhead_file.write_average(benchmark_name, overhead_totals.average_overhead())?;
                difference_file
                    .write_average(benchmark_name, overhead_totals.average_difference())?;
            }
        }
    }

    if !overhead_entries.is_empty() {
        state = BenchmarkState::CompletedWithOverhead;
    }

    Ok(BenchmarkOutcome { aggregate, state, results, overhead_entries })
}

fn nonzero_reference(benchmark_name: &str, reference: f64) -> Result<f64, BenchError> {
    if reference == 0.0 {
        Err(BenchError::DivisionByZeroBaseline { benchmark: benchmark_name.to_string() })
    } else {
        Ok(reference)
    }
}
