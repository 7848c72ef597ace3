use crate::error::ServiceError;
use crate::worker::{self, AnalyticsHandler, ComputeHandler, Job};
use analytics::{BenchmarkStatistics, StatisticsResult};
use chrono::NaiveDate;
use configuration::Settings;
use core_types::{Benchmark, BenchmarkQuote, BenchmarkSeries, FundObservation};
use events::{
    AggregateBenchmarkRequest, AggregateRequest, BuildMatrixRequest, ComputeRequest,
    ComputeResponse, RequestId,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tokio::sync::{mpsc, oneshot};

/// An async handle to a dedicated compute worker thread.
///
/// Calls are queued and handled one at a time, in arrival order, on the worker.
/// Awaiting a call never blocks the caller's thread. Each call is independent:
/// the worker keeps no state between requests.
#[derive(Debug)]
pub struct ComputeService {
    jobs: mpsc::Sender<Job>,
    next_id: AtomicU64,
}

impl ComputeService {
    /// Starts a worker running the analytics passes.
    pub fn spawn(settings: &Settings) -> Result<Self, ServiceError> {
        Self::spawn_with(AnalyticsHandler::new(&settings.statistics), settings)
    }

    /// Starts a worker running `handler`.
    ///
    /// The worker thread exits once this service (and every clone of its
    /// sender) has been dropped.
    pub fn spawn_with<H: ComputeHandler>(handler: H, settings: &Settings) -> Result<Self, ServiceError> {
        let (jobs, queue) = mpsc::channel(settings.service.queue_capacity);
        thread::Builder::new()
            .name(settings.service.worker_name.clone())
            .spawn(move || worker::run(handler, queue))?;

        tracing::info!(
            worker = %settings.service.worker_name,
            queue_capacity = settings.service.queue_capacity,
            "Compute service ready."
        );

        Ok(Self {
            jobs,
            next_id: AtomicU64::new(1),
        })
    }

    /// Sends a plain-data request to the worker and awaits its answer.
    pub async fn dispatch(&self, request: ComputeRequest) -> Result<ComputeResponse, ServiceError> {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (reply, answer) = oneshot::channel();

        tracing::debug!(request = %id, operation = request.operation(), "Dispatching to compute worker.");
        self.jobs
            .send(Job { id, request, reply })
            .await
            .map_err(|_| ServiceError::WorkerUnavailable)?;

        answer.await.map_err(|_| ServiceError::WorkerUnavailable)?
    }

    pub async fn aggregate(
        &self,
        rows: Vec<FundObservation>,
        benchmark: Benchmark,
        starting_from: Option<NaiveDate>,
    ) -> Result<StatisticsResult, ServiceError> {
        let request = ComputeRequest::Aggregate(AggregateRequest {
            rows,
            benchmark,
            starting_from,
        });
        match self.dispatch(request).await? {
            ComputeResponse::Statistics(result) => Ok(result),
            other => Err(unexpected("aggregate", &other)),
        }
    }

    pub async fn aggregate_benchmark(
        &self,
        quotes: Vec<BenchmarkQuote>,
        benchmark: Benchmark,
        starting_from: Option<NaiveDate>,
    ) -> Result<BenchmarkStatistics, ServiceError> {
        let request = ComputeRequest::AggregateBenchmark(AggregateBenchmarkRequest {
            quotes,
            benchmark,
            starting_from,
        });
        match self.dispatch(request).await? {
            ComputeResponse::BenchmarkStatistics(result) => Ok(result),
            other => Err(unexpected("aggregateBenchmark", &other)),
        }
    }

    pub async fn build_matrix(
        &self,
        funds: Vec<Vec<FundObservation>>,
        benchmarks: Vec<BenchmarkSeries>,
    ) -> Result<Vec<Vec<f64>>, ServiceError> {
        let request = ComputeRequest::BuildMatrix(BuildMatrixRequest { funds, benchmarks });
        match self.dispatch(request).await? {
            ComputeResponse::Matrix(matrix) => Ok(matrix),
            other => Err(unexpected("buildMatrix", &other)),
        }
    }
}

fn unexpected(expected: &'static str, actual: &ComputeResponse) -> ServiceError {
    ServiceError::UnexpectedResponse {
        expected,
        actual: actual.operation(),
    }
}
