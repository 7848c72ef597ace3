use crate::error::ServiceError;
use analytics::{BenchmarkAggregator, CorrelationMatrixBuilder, StatisticsAggregator};
use configuration::StatisticsSettings;
use events::{ComputeRequest, ComputeResponse, RequestId};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::{mpsc, oneshot};

/// The computation behind the worker.
///
/// `Send + 'static` is required because the handler is moved onto the
/// worker thread and lives there for the service's whole lifetime.
pub trait ComputeHandler: Send + 'static {
    fn handle(&mut self, request: ComputeRequest) -> Result<ComputeResponse, ServiceError>;
}

/// The production handler: runs the analytics passes.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsHandler {
    statistics: StatisticsAggregator,
    benchmarks: BenchmarkAggregator,
    correlations: CorrelationMatrixBuilder,
}

impl AnalyticsHandler {
    pub fn new(settings: &StatisticsSettings) -> Self {
        Self {
            statistics: StatisticsAggregator::new(settings.consistency_window),
            benchmarks: BenchmarkAggregator::new(),
            correlations: CorrelationMatrixBuilder::new(),
        }
    }
}

impl ComputeHandler for AnalyticsHandler {
    fn handle(&mut self, request: ComputeRequest) -> Result<ComputeResponse, ServiceError> {
        let response = match request {
            ComputeRequest::Aggregate(r) => ComputeResponse::Statistics(
                self.statistics
                    .aggregate(&r.rows, r.benchmark, r.starting_from)?,
            ),
            ComputeRequest::AggregateBenchmark(r) => ComputeResponse::BenchmarkStatistics(
                self.benchmarks
                    .aggregate(&r.quotes, r.benchmark, r.starting_from)?,
            ),
            ComputeRequest::BuildMatrix(r) => ComputeResponse::Matrix(
                self.correlations.build_matrix(&r.funds, &r.benchmarks),
            ),
        };
        Ok(response)
    }
}

/// A request queued for the worker together with the channel for its answer.
pub(crate) struct Job {
    pub id: RequestId,
    pub request: ComputeRequest,
    pub reply: oneshot::Sender<Result<ComputeResponse, ServiceError>>,
}

/// The worker loop. Runs on its dedicated thread until every sender is gone.
///
/// A panicking request is answered with `WorkerFault`; the loop keeps serving.
pub(crate) fn run<H: ComputeHandler>(mut handler: H, mut jobs: mpsc::Receiver<Job>) {
    tracing::info!("Compute worker started.");

    while let Some(job) = jobs.blocking_recv() {
        let operation = job.request.operation();
        tracing::debug!(request = %job.id, operation, "Handling request.");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(job.request)))
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                tracing::error!(request = %job.id, operation, %message, "Compute request panicked.");
                Err(ServiceError::WorkerFault { operation, message })
            });

        if let Err(e) = &outcome {
            tracing::warn!(request = %job.id, operation, error = %e, "Compute request failed.");
        }

        // The caller may have stopped waiting; that is not the worker's problem.
        if job.reply.send(outcome).is_err() {
            tracing::debug!(request = %job.id, "Caller went away before the reply.");
        }
    }

    tracing::info!("Compute worker stopped: all handles dropped.");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
