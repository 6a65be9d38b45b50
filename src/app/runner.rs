use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{AppResult, MetricsError};
use crate::http::{Transport, build_transport};
use crate::load::{LoadWorker, StopController};
use crate::metrics::{Aggregate, Aggregator};
use crate::session::SessionConfig;
use crate::shutdown::ShutdownReceiver;

/// Builds one transport per worker, then runs the whole load.
///
/// Every client is built before any worker starts, so a client build failure
/// aborts the run without sending a request.
///
/// # Errors
///
/// Returns an error when a client cannot be built or workers are lost.
pub(crate) async fn run_load(
    session: Arc<SessionConfig>,
    interrupt_rx: ShutdownReceiver,
) -> AppResult<Aggregate> {
    let mut transports: Vec<Box<dyn Transport>> =
        Vec::with_capacity(session.concurrency.get());
    for index in 0..session.concurrency.get() {
        let transport = build_transport(&session, &session.assignment(index))?;
        transports.push(Box::new(transport));
    }
    Ok(run_with_transports(session, transports, interrupt_rx).await?)
}

/// Spawns a worker per transport and aggregates their results.
///
/// # Errors
///
/// Returns `MetricsError::WorkersLost` when a worker dies without reporting.
pub(crate) async fn run_with_transports(
    session: Arc<SessionConfig>,
    transports: Vec<Box<dyn Transport>>,
    mut interrupt_rx: ShutdownReceiver,
) -> Result<Aggregate, MetricsError> {
    let stop = Arc::new(StopController::new());
    let concurrency = session.concurrency;
    let (results_tx, mut results_rx) = mpsc::channel(concurrency.get());

    let mut handles = Vec::with_capacity(transports.len());
    for (index, transport) in transports.into_iter().enumerate() {
        let worker = LoadWorker::new(
            Arc::clone(&session),
            session.assignment(index),
            transport,
            Arc::clone(&stop),
        );
        handles.push(tokio::spawn(worker.run(results_tx.clone())));
    }
    drop(results_tx);

    let aggregate = Aggregator::new(concurrency, stop)
        .collect(&mut results_rx, &mut interrupt_rx)
        .await?;

    for handle in handles {
        if let Err(err) = handle.await {
            warn!("Worker task failed: {}", err);
        }
    }
    Ok(aggregate)
}
