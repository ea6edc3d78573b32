//! Metrics from a populate operation.

use std::time::Duration;

/// Counters and timings of one `populate` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulateMetrics {
    /// Number of rows the caller asked for.
    pub rows_requested: u64,
    /// Number of rows the generator produced.
    pub rows_generated: u64,
    /// Number of rows the sink reported as inserted.
    pub rows_inserted: u64,
    /// Number of candidate rows rejected by unique constraints.
    pub discarded: u64,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting data.
    pub insert_duration: Duration,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Whether fewer rows were produced than requested.
    pub fn is_partial(&self) -> bool {
        self.rows_generated < self.rows_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_per_second() {
        let metrics = PopulateMetrics {
            rows_inserted: 100,
            total_duration: Duration::from_secs(2),
            ..Default::default()
        };
        assert!((metrics.rows_per_second() - 50.0).abs() < f64::EPSILON);
        assert_eq!(PopulateMetrics::default().rows_per_second(), 0.0);
    }

    #[test]
    fn test_is_partial() {
        let metrics = PopulateMetrics {
            rows_requested: 3,
            rows_generated: 2,
            ..Default::default()
        };
        assert!(metrics.is_partial());
    }
}
