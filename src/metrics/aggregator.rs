use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::MetricsError;
use crate::load::StopController;
use crate::shutdown::ShutdownReceiver;

use super::stats::RequesterStats;

/// Merged result of a whole run.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub stats: RequesterStats,
    pub responders: usize,
    pub interrupted: bool,
}

/// Waits for one terminal result per worker while relaying interrupts to the
/// stop controller.
#[derive(Debug)]
pub struct Aggregator {
    expected: NonZeroUsize,
    stop: Arc<StopController>,
}

impl Aggregator {
    #[must_use]
    pub const fn new(expected: NonZeroUsize, stop: Arc<StopController>) -> Self {
        Self { expected, stop }
    }

    /// Collects exactly `expected` results. An interrupt stops the workers but
    /// the wait continues until every worker has reported.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::WorkersLost` if all senders are gone before every
    /// worker reported.
    pub async fn collect(
        &self,
        results_rx: &mut mpsc::Receiver<RequesterStats>,
        interrupt_rx: &mut ShutdownReceiver,
    ) -> Result<Aggregate, MetricsError> {
        let expected = self.expected.get();
        let mut merged = RequesterStats::new();
        let mut responders: usize = 0;
        let mut interrupted = false;
        let mut watch_interrupt = true;

        while responders < expected {
            tokio::select! {
                signal = interrupt_rx.recv(), if watch_interrupt => match signal {
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        interrupted = true;
                        if self.stop.stop() {
                            info!("Interrupt received, stopping...");
                        }
                    }
                    Err(RecvError::Closed) => watch_interrupt = false,
                },
                received = results_rx.recv() => {
                    let Some(stats) = received else {
                        return Err(MetricsError::WorkersLost { expected, received: responders });
                    };
                    if let Err(err) = merged.merge(&stats) {
                        warn!("Failed to merge worker latencies: {}", err);
                    }
                    responders = responders.saturating_add(1);
                    debug!("Worker result {}/{} received", responders, expected);
                }
            }
        }

        Ok(Aggregate {
            stats: merged,
            responders,
            interrupted,
        })
    }
}
