// File: src/overhead.rs
//
// Overhead of a measured score relative to the recorded reference.

use crate::errors::BenchError;

/// One benchmark run's overhead against the baseline.
#[derive(Debug, Clone)]
pub struct OverheadEntry {
    pub benchmark_name: String,
    pub overhead_percentage: f64,
    pub absolute_difference: f64,
}

/// Computes the overhead of `score` against `reference`. A zero reference is
/// surfaced as an explicit error instead of letting infinity or NaN leak
/// into the report files.
pub fn compute_overhead(
    benchmark_name: &str,
    score: f64,
    reference: f64,
) -> Result<OverheadEntry, BenchError> {
    if reference == 0.0 {
        return Err(BenchError::DivisionByZeroBaseline {
            benchmark: benchmark_name.to_string(),
        });
    }

    let absolute_difference = score - reference;
    let overhead_percentage = absolute_difference / reference * 100.0;

    Ok(OverheadEntry {
        benchmark_name: benchmark_name.to_string(),
        overhead_percentage,
        absolute_difference,
    })
}

/// Running overhead totals for one benchmark across a sweep.
///
/// Only strictly positive entries are added to the totals: the metric tracks
/// regressions, and a run that came out faster than the reference does not
/// cancel out one that came out slower. The averages still divide by the
/// configured run count.
#[derive(Debug, Clone)]
pub struct OverheadAccumulator {
    run_count: usize,
    total_overhead: f64,
    total_difference: f64,
}

impl OverheadAccumulator {
    pub fn new(run_count: usize) -> Self {
        Self { run_count, total_overhead: 0.0, total_difference: 0.0 }
    }

    pub fn record(&mut self, entry: &OverheadEntry) {
        if entry.overhead_percentage > 0.0 {
            self.total_overhead += entry.overhead_percentage;
            self.total_difference += entry.absolute_difference;
        }
    }

    pub fn total_overhead(&self) -> f64 {
        self.total_overhead
    }

    pub fn average_overhead(&self) -> f64 {
        self.total_overhead / self.run_count as f64
    }

    pub fn average_difference(&self) -> f64 {
        self.total_difference / self.run_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overhead_against_reference() {
        let entry = compute_overhead("richards-z", 55.0, 50.0).unwrap();
        assert_eq!(entry.absolute_difference, 5.0);
        assert_eq!(entry.overhead_percentage, 10.0);
    }

    #[test]
    fn test_improvement_yields_negative_overhead() {
        let entry = compute_overhead("richards-z", 45.0, 50.0).unwrap();
        assert_eq!(entry.absolute_difference, -5.0);
        assert_eq!(entry.overhead_percentage, -10.0);
    }

    #[test]
    fn test_zero_reference_is_an_error() {
        let err = compute_overhead("fannkuch-redux-z", 10.0, 0.0).unwrap_err();
        assert!(matches!(err, BenchError::DivisionByZeroBaseline { .. }));
    }

    #[test]
    fn test_accumulator_sums_only_regressions() {
        let mut acc = OverheadAccumulator::new(3);
        for pct in [10.0, -5.0, 3.0] {
            acc.record(&OverheadEntry {
                benchmark_name: "n-body-z".to_string(),
                overhead_percentage: pct,
                absolute_difference: pct / 10.0,
            });
        }

        assert_eq!(acc.total_overhead(), 13.0);
        // Divides by the run count, not by the number of positive entries.
        assert!((acc.average_overhead() - 13.0 / 3.0).abs() < 1e-9);
        assert!((acc.average_difference() - 1.3 / 3.0).abs() < 1e-9);
    }
}
