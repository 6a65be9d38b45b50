use std::time::Duration;

use crate::error::MetricsError;

use super::histogram::LatencyHistogram;

/// Seed for `min_request_time`; any observed latency replaces it.
pub const MIN_REQUEST_TIME_SENTINEL: Duration = Duration::MAX;

/// Counters produced by one worker, or the merge of several.
#[derive(Debug, Clone)]
pub struct RequesterStats {
    pub num_requests: u64,
    pub num_errs: u64,
    pub tot_resp_size: u64,
    /// Sum of request latencies, not wall-clock time.
    pub tot_duration: Duration,
    pub min_request_time: Duration,
    pub max_request_time: Duration,
    pub latencies: LatencyHistogram,
}

impl Default for RequesterStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RequesterStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            num_requests: 0,
            num_errs: 0,
            tot_resp_size: 0,
            tot_duration: Duration::ZERO,
            min_request_time: MIN_REQUEST_TIME_SENTINEL,
            max_request_time: Duration::ZERO,
            latencies: LatencyHistogram::new(),
        }
    }

    /// Account for one successful request. Counters are always updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency histogram cannot record the sample.
    pub fn record_success(&mut self, latency: Duration, bytes: u64) -> Result<(), MetricsError> {
        self.num_requests = self.num_requests.saturating_add(1);
        self.tot_resp_size = self.tot_resp_size.saturating_add(bytes);
        self.tot_duration = self.tot_duration.saturating_add(latency);
        self.min_request_time = self.min_request_time.min(latency);
        self.max_request_time = self.max_request_time.max(latency);
        self.latencies.record(latency)
    }

    pub const fn record_error(&mut self) {
        self.num_errs = self.num_errs.saturating_add(1);
    }

    /// Fold `other` into `self`. Order of merges does not matter; counters are
    /// always merged even when the histogram merge fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency histograms cannot be combined.
    pub fn merge(&mut self, other: &Self) -> Result<(), MetricsError> {
        self.num_requests = self.num_requests.saturating_add(other.num_requests);
        self.num_errs = self.num_errs.saturating_add(other.num_errs);
        self.tot_resp_size = self.tot_resp_size.saturating_add(other.tot_resp_size);
        self.tot_duration = self.tot_duration.saturating_add(other.tot_duration);
        self.min_request_time = self.min_request_time.min(other.min_request_time);
        self.max_request_time = self.max_request_time.max(other.max_request_time);
        self.latencies.merge(&other.latencies)
    }
}
