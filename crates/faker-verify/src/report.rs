//! Round-trip report types.

use std::time::Duration;

/// Information about an instance that changed across the round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchInfo {
    /// Record schema name.
    pub record: String,
    /// Iteration that produced the instance.
    pub iteration: u64,
    /// First diverging field path.
    pub path: String,
    /// Value before encoding.
    pub expected: String,
    /// Value after decoding.
    pub actual: String,
}

/// Information about an instance that could not be built or round-tripped.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    /// Record schema name.
    pub record: String,
    /// Iteration that failed.
    pub iteration: u64,
    /// Error message.
    pub message: String,
}

/// Aggregate result of repeated round trips.
#[derive(Debug, Clone, Default)]
pub struct RoundTripReport {
    /// Codec under test.
    pub codec: String,
    /// Number of instances attempted.
    pub checked: u64,
    /// Number of instances that survived unchanged.
    pub matched: u64,
    /// Number of instances that changed.
    pub mismatched: u64,
    /// Number of instances that failed before comparison.
    pub errored: u64,
    /// Details of changed instances.
    pub mismatches: Vec<MismatchInfo>,
    /// Details of failed instances.
    pub errors: Vec<ErrorInfo>,
    /// Total verification time.
    pub total_duration: Duration,
    /// Time spent building instances.
    pub generation_duration: Duration,
    /// Time spent encoding and decoding.
    pub codec_duration: Duration,
    /// Time spent comparing.
    pub compare_duration: Duration,
}

impl RoundTripReport {
    /// Check if every instance survived the round trip.
    pub fn is_success(&self) -> bool {
        self.mismatched == 0 && self.errored == 0
    }

    /// Calculate verification rate (instances per second).
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.checked as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!(
                "Round trip PASSED ({}): {}/{} instances matched in {:?}",
                self.codec, self.matched, self.checked, self.total_duration
            )
        } else {
            format!(
                "Round trip FAILED ({}): {} mismatched, {} errored out of {} checked",
                self.codec, self.mismatched, self.errored, self.checked
            )
        }
    }
}
