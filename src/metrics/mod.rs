//! Per-worker statistics, their merge, and the derived run report.
mod aggregator;
mod histogram;
mod report;
mod stats;


pub use aggregator::{Aggregate, Aggregator};
pub use histogram::LatencyHistogram;
pub use report::{LoadReport, RunOutcome};
pub use stats::{MIN_REQUEST_TIME_SENTINEL, RequesterStats};
