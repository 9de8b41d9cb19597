// File: src/score.rs
//
// Score extraction from raw benchmark output. Each benchmark self-reports a
// throughput number on a line like "mandelbrot-z: 1234.56"; the pattern is
// matched anywhere in the captured text and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `<lowercase-and-hyphen identifier>: <decimal>`. The decimal must
/// carry a fractional part; bare integers are not scores. This format is
/// shared with the baseline files, so it must not drift.
static SCORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z\-]+: (\d+\.\d+)").unwrap());

/// One subprocess invocation of one benchmark. Immutable once built.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub benchmark_name: String,
    /// 1-based run number within the configured sweep.
    pub run_index: usize,
    pub raw_output: String,
    /// Parsed score, or 0.0 when `valid` is false. The zero participates in
    /// aggregation either way.
    pub score: f64,
    pub valid: bool,
}

impl BenchmarkResult {
    /// Builds a result from captured output, degrading to a zero score when
    /// no score line is present. A process that failed to spawn or exited
    /// nonzero with garbage output lands here too; it is not distinguished
    /// from any other unparseable output.
    pub fn from_output(benchmark_name: &str, run_index: usize, raw_output: String) -> Self {
        let (score, valid) = match extract_score(&raw_output) {
            Some(score) => (score, true),
            None => (0.0, false),
        };

        Self {
            benchmark_name: benchmark_name.to_string(),
            run_index,
            raw_output,
            score,
            valid,
        }
    }
}

/// Returns the first score found anywhere in the output, or None when the
/// text contains no score line.
pub fn extract_score(raw_output: &str) -> Option<f64> {
    SCORE_PATTERN
        .captures(raw_output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_score_with_trailing_text() {
        assert_eq!(extract_score("foo-bar: 12.34 trailing text"), Some(12.34));
    }

    #[test]
    fn test_extract_score_anywhere_in_output() {
        let output = "warming up\nsome noise\nmandelbrot-z: 1234.56\ndone";
        assert_eq!(extract_score(output), Some(1234.56));
    }

    #[test]
    fn test_extract_score_first_match_wins() {
        let output = "binary-trees-z: 10.50\nbinary-trees-z: 99.99";
        assert_eq!(extract_score(output), Some(10.50));
    }

    #[test]
    fn test_extract_score_no_match() {
        assert_eq!(extract_score("no score here"), None);
    }

    #[test]
    fn test_extract_score_requires_fractional_part() {
        assert_eq!(extract_score("pidigits-z: 1234"), None);
    }

    #[test]
    fn test_result_from_unparseable_output_scores_zero() {
        let result = BenchmarkResult::from_output("n-body-z", 1, "Exception in thread".to_string());
        assert!(!result.valid);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_result_from_valid_output() {
        let result =
            BenchmarkResult::from_output("n-body-z", 2, "n-body-z: 45.67\n".to_string());
        assert!(result.valid);
        assert_eq!(result.score, 45.67);
        assert_eq!(result.run_index, 2);
    }
}
