use hdrhistogram::Histogram;
use std::time::Duration;

use crate::error::MetricsError;

/// Significant figures kept by the latency histogram.
const HISTOGRAM_SIGFIG: u8 = 3;

/// Auto-resizing microsecond latency histogram, allocated on first record so
/// workers that never succeed carry nothing.
#[derive(Debug, Clone, Default)]
pub struct LatencyHistogram {
    hist: Option<Histogram<u64>>,
}

impl LatencyHistogram {
    #[must_use]
    pub const fn new() -> Self {
        Self { hist: None }
    }

    /// Record one latency.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be allocated or resized to
    /// hold the sample.
    pub fn record(&mut self, latency: Duration) -> Result<(), MetricsError> {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX).max(1);
        if self.hist.is_none() {
            self.hist = Some(allocate()?);
        }
        match self.hist.as_mut() {
            Some(hist) => hist.record(micros).map_err(|err| MetricsError::Histogram {
                context: "record",
                source: Box::new(err),
            }),
            None => Ok(()),
        }
    }

    /// Merge another histogram into this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge fails.
    pub fn merge(&mut self, other: &Self) -> Result<(), MetricsError> {
        let Some(incoming) = other.hist.as_ref() else {
            return Ok(());
        };
        match self.hist.as_mut() {
            Some(hist) => hist.add(incoming).map_err(|err| MetricsError::Histogram {
                context: "merge",
                source: Box::new(err),
            }),
            None => {
                self.hist = Some(incoming.clone());
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.as_ref().map_or(0, Histogram::len)
    }

    /// p50, p90 and p99; zero when empty.
    #[must_use]
    pub fn percentiles(&self) -> (Duration, Duration, Duration) {
        let Some(hist) = self.hist.as_ref().filter(|hist| !hist.is_empty()) else {
            return (Duration::ZERO, Duration::ZERO, Duration::ZERO);
        };
        (
            Duration::from_micros(hist.value_at_quantile(0.5)),
            Duration::from_micros(hist.value_at_quantile(0.9)),
            Duration::from_micros(hist.value_at_quantile(0.99)),
        )
    }
}

fn allocate() -> Result<Histogram<u64>, MetricsError> {
    Histogram::<u64>::new(HISTOGRAM_SIGFIG).map_err(|err| MetricsError::Histogram {
        context: "allocate",
        source: Box::new(err),
    })
}
