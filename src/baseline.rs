// File: src/baseline.rs
//
// Persisted reference baseline. Plain text, one entry per line:
//
//     -number-of-runs 3
//     binary-trees-z 102.45
//     mandelbrot-z 88.10
//
// Scores are recorded to 2 decimal places. Recording always overwrites the
// whole file; there is no merging with an earlier reference.

use crate::aggregate::AggregateScore;
use crate::errors::BenchError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// First-line key carrying the run count the reference was recorded with.
pub const RUN_COUNT_KEY: &str = "-number-of-runs";

#[derive(Debug, Clone)]
pub struct Baseline {
    pub run_count: usize,
    pub scores: HashMap<String, f64>,
}

impl Baseline {
    pub fn reference_for(&self, benchmark_name: &str) -> Result<f64, BenchError> {
        self.scores.get(benchmark_name).copied().ok_or_else(|| {
            BenchError::MissingBaselineEntry { benchmark: benchmark_name.to_string() }
        })
    }
}

/// Serializes the aggregates as the new reference, replacing any prior file.
pub fn record_baseline(
    path: &Path,
    aggregates: &[AggregateScore],
    run_count: usize,
) -> Result<Baseline, BenchError> {
    let mut contents = format!("{} {}\n", RUN_COUNT_KEY, run_count);
    let mut scores = HashMap::new();

    for agg in aggregates {
        contents.push_str(&format!("{} {:.2}\n", agg.benchmark_name, agg.average));
        // Store the rounded value so an immediate comparison run sees
        // exactly what a later load_baseline would.
        scores.insert(agg.benchmark_name.clone(), rounded(agg.average));
    }

    fs::write(path, contents)
        .map_err(|e| BenchError::io(format!("writing reference file '{}'", path.display()), e))?;

    Ok(Baseline { run_count, scores })
}

/// Parses a baseline file back into memory.
pub fn load_baseline(path: &Path) -> Result<Baseline, BenchError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            BenchError::MissingBaselineFile { path: path.to_path_buf() }
        } else {
            BenchError::io(format!("reading reference file '{}'", path.display()), e)
        }
    })?;

    let mut run_count = 1;
    let mut scores = HashMap::new();

    for (index, line) in contents.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (key, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                return Err(BenchError::MalformedBaselineLine {
                    line_number: index + 1,
                    line: line.to_string(),
                })
            }
        };

        if key == RUN_COUNT_KEY {
            run_count = value.parse::<usize>().map_err(|_| BenchError::MalformedBaselineLine {
                line_number: index + 1,
                line: line.to_string(),
            })?;
        } else {
            let score = value.parse::<f64>().map_err(|_| BenchError::MalformedBaselineLine {
                line_number: index + 1,
                line: line.to_string(),
            })?;
            scores.insert(key.to_string(), score);
        }
    }

    Ok(Baseline { run_count, scores })
}

fn rounded(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn agg(name: &str, total: f64, runs: usize) -> AggregateScore {
        AggregateScore {
            benchmark_name: name.to_string(),
            run_count: runs,
            total,
            average: total / runs as f64,
        }
    }

    #[test]
    fn test_round_trip_preserves_rounded_scores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("benchmark.reference");

        let aggregates =
            vec![agg("binary-trees-z", 307.333, 3), agg("mandelbrot-z", 264.30, 3)];
        record_baseline(&path, &aggregates, 3).unwrap();

        let baseline = load_baseline(&path).unwrap();
        assert_eq!(baseline.run_count, 3);
        assert_eq!(baseline.reference_for("binary-trees-z").unwrap(), 102.44);
        assert_eq!(baseline.reference_for("mandelbrot-z").unwrap(), 88.10);
    }

    #[test]
    fn test_record_overwrites_prior_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("benchmark.reference");

        record_baseline(&path, &[agg("old-bench", 50.0, 1)], 1).unwrap();
        record_baseline(&path, &[agg("new-bench", 70.0, 1)], 1).unwrap();

        let baseline = load_baseline(&path).unwrap();
        assert!(baseline.reference_for("old-bench").is_err());
        assert_eq!(baseline.reference_for("new-bench").unwrap(), 70.0);
    }

    #[test]
    fn test_missing_file_is_a_distinct_error() {
        let dir = tempdir().unwrap();
        let err = load_baseline(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, BenchError::MissingBaselineFile { .. }));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("benchmark.reference");
        fs::write(&path, "-number-of-runs 1\nmandelbrot-z not-a-number\n").unwrap();

        match load_baseline(&path).unwrap_err() {
            BenchError::MalformedBaselineLine { line_number, .. } => assert_eq!(line_number, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_line_with_extra_fields_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("benchmark.reference");
        fs::write(&path, "-number-of-runs 1\nmandelbrot-z 1.00 extra\n").unwrap();
        assert!(matches!(
            load_baseline(&path).unwrap_err(),
            BenchError::MalformedBaselineLine { .. }
        ));
    }

    #[test]
    fn test_missing_entry_lookup_fails() {
        let baseline = Baseline { run_count: 1, scores: HashMap::new() };
        assert!(matches!(
            baseline.reference_for("spectral-norm-z").unwrap_err(),
            BenchError::MissingBaselineEntry { .. }
        ));
    }
}
