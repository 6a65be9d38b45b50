use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::http::Transport;
use crate::metrics::RequesterStats;
use crate::session::{SessionConfig, WorkerAssignment};

use super::stop::StopController;

/// One closed-loop requester: issues requests back to back until the run
/// deadline passes or a stop is requested, then reports its stats once.
pub struct LoadWorker {
    session: Arc<SessionConfig>,
    assignment: WorkerAssignment,
    transport: Box<dyn Transport>,
    stop: Arc<StopController>,
}

impl LoadWorker {
    #[must_use]
    pub const fn new(
        session: Arc<SessionConfig>,
        assignment: WorkerAssignment,
        transport: Box<dyn Transport>,
        stop: Arc<StopController>,
    ) -> Self {
        Self {
            session,
            assignment,
            transport,
            stop,
        }
    }

    /// Runs the request loop and sends exactly one result on `results_tx`.
    pub async fn run(self, results_tx: mpsc::Sender<RequesterStats>) {
        let stats = self.drive().await;
        if results_tx.send(stats).await.is_err() {
            warn!("Worker {} could not report: aggregator gone", self.assignment.index);
        }
    }

    async fn drive(&self) -> RequesterStats {
        debug!("Worker {} started", self.assignment.index);
        let mut stats = RequesterStats::new();
        let started = Instant::now();
        while started.elapsed() < self.session.duration && !self.stop.is_stopped() {
            let url = self.session.target.resolve(self.assignment.server_ip);
            match self.transport.send(&url).await {
                Ok(exchange) => {
                    if let Err(err) = stats.record_success(exchange.latency, exchange.bytes) {
                        warn!("Worker {} failed to record latency: {}", self.assignment.index, err);
                    }
                }
                Err(err) => {
                    debug!("Worker {} request failed: {}", self.assignment.index, err);
                    stats.record_error();
                }
            }
        }

        debug!(
            "Worker {} finished: {} ok, {} errors",
            self.assignment.index, stats.num_requests, stats.num_errs
        );
        stats
    }
}
