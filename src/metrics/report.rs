use std::num::NonZeroUsize;
use std::time::Duration;

use super::stats::RequesterStats;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Derived figures of a run that completed at least one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub num_requests: u64,
    pub num_errs: u64,
    pub total_bytes: u64,
    /// Summed request latency divided by the number of workers.
    pub avg_worker_duration: Duration,
    pub requests_per_sec_x100: u64,
    pub bytes_per_sec: u64,
    pub avg_latency: Duration,
    pub fastest: Duration,
    pub slowest: Duration,
    pub p50: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every request failed (or none was issued); no rates are derived.
    NoStatistics { errors: u64 },
    Completed(LoadReport),
}

impl RunOutcome {
    #[must_use]
    pub fn from_stats(stats: &RequesterStats, concurrency: NonZeroUsize) -> Self {
        if stats.num_requests == 0 {
            return Self::NoStatistics {
                errors: stats.num_errs,
            };
        }

        let total_nanos = stats.tot_duration.as_nanos();
        let workers = u128::try_from(concurrency.get()).unwrap_or(u128::MAX);
        let avg_worker_nanos = total_nanos.checked_div(workers).unwrap_or(0);
        let avg_latency_nanos = total_nanos
            .checked_div(u128::from(stats.num_requests))
            .unwrap_or(0);

        let requests_per_sec_x100 = u128::from(stats.num_requests)
            .saturating_mul(100)
            .saturating_mul(NANOS_PER_SEC)
            .checked_div(avg_worker_nanos)
            .unwrap_or(0);
        let bytes_per_sec = u128::from(stats.tot_resp_size)
            .saturating_mul(NANOS_PER_SEC)
            .checked_div(avg_worker_nanos)
            .unwrap_or(0);

        let (p50, p90, p99) = stats.latencies.percentiles();
        Self::Completed(LoadReport {
            num_requests: stats.num_requests,
            num_errs: stats.num_errs,
            total_bytes: stats.tot_resp_size,
            avg_worker_duration: duration_from_nanos(avg_worker_nanos),
            requests_per_sec_x100: clamp_u64(requests_per_sec_x100),
            bytes_per_sec: clamp_u64(bytes_per_sec),
            avg_latency: duration_from_nanos(avg_latency_nanos),
            fastest: stats.min_request_time,
            slowest: stats.max_request_time,
            p50,
            p90,
            p99,
        })
    }
}

fn clamp_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::from_nanos(clamp_u64(nanos))
}
