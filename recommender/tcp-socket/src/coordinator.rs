// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::connection_handler::{ConnectionHandler, ConnectionOutcome};
use recommender_core::aggregator::Aggregator;
use recommender_core::config::Config;
use recommender_core::dataset::Dataset;
use recommender_core::partition_manager::PartitionManager;
use recommender_core::recommendation_table::RecommendationTable;
use recommender_core::CoreError;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Pause after a failed accept, e.g. when the process is out of file descriptors
pub const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Tally of one coordinator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub accepted: usize,
    pub completed: usize,
    pub terminated: usize,
    pub failed: usize,
    /// Partitions whose exchange failed and were not processed this run
    pub lost_partitions: Vec<usize>,
    /// Categories in the published table
    pub categories: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: ConnectionOutcome) {
        match outcome {
            ConnectionOutcome::Completed { .. } => self.completed += 1,
            ConnectionOutcome::Terminated => self.terminated += 1,
            ConnectionOutcome::Failed { partition, .. } => {
                self.failed += 1;
                self.lost_partitions.push(partition);
            }
        }
    }
}

/// Owns partitioning, dispatch and aggregation for one run.
///
/// State is only reachable through the partition manager, the aggregator
/// and the published recommendation table.
pub struct Coordinator {
    partitions: Arc<PartitionManager>,
    aggregator: Arc<Aggregator>,
    handler: Arc<ConnectionHandler>,
    table: RecommendationTable,
    expected_workers: usize,
}

impl Coordinator {
    pub fn new(dataset: Dataset, config: &Config) -> Result<Self, CoreError> {
        config.validate()?;

        let Dataset {
            records,
            category_index,
            ..
        } = dataset;

        let partitions = Arc::new(PartitionManager::from_records(
            records,
            config.num_partitions,
        )?);
        let table = RecommendationTable::new(config.top_k);
        let aggregator = Arc::new(Aggregator::new(Arc::new(category_index), table.clone()));
        let handler = Arc::new(ConnectionHandler::new(
            Arc::clone(&partitions),
            Arc::clone(&aggregator),
            config.worker_timeout(),
            config.max_message_bytes,
        ));

        Ok(Self {
            partitions,
            aggregator,
            handler,
            table,
            expected_workers: config.max_clients,
        })
    }

    /// Handle to the table lookups are served from
    pub fn table(&self) -> RecommendationTable {
        self.table.clone()
    }

    pub fn partitions_remaining(&self) -> usize {
        self.partitions.remaining()
    }

    /// Accept up to the expected number of workers, one task per connection,
    /// then wait for every handler before aggregating.
    ///
    /// Cancelling `shutdown` stops accepting; connections already accepted
    /// still run to completion or to their timeout.
    pub async fn run(&self, listener: TcpListener, shutdown: CancellationToken) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut handlers = JoinSet::new();

        info!(
            expected_workers = self.expected_workers,
            partitions = self.partitions.len(),
            "Waiting for workers"
        );

        while summary.accepted < self.expected_workers {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(accepted = summary.accepted, "Shutdown requested, no longer accepting workers");
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            summary.accepted += 1;
                            info!(%peer, "Worker connected");
                            let handler = Arc::clone(&self.handler);
                            handlers.spawn(async move { handler.handle(stream, peer).await });
                        }
                        Err(e) => {
                            warn!(error = %e, retry_in = ?ACCEPT_RETRY_DELAY, "Error accepting connection");
                            wait_before_retry(&shutdown).await;
                        }
                    }
                }
            }
        }

        while let Some(joined) = handlers.join_next().await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    warn!(error = %e, "Connection handler task aborted");
                    summary.failed += 1;
                }
            }
        }

        if summary.failed > 0 {
            warn!(
                failed = summary.failed,
                lost_partitions = ?summary.lost_partitions,
                "Some partitions were not processed"
            );
        }

        let table = self.aggregator.finalize();
        summary.categories = table.len();
        summary
    }
}

/// Sleep for [`ACCEPT_RETRY_DELAY`], cut short when `shutdown` fires
pub async fn wait_before_retry(shutdown: &CancellationToken) {
    tokio::select! {
        _ = shutdown.cancelled() => {}
        _ = tokio::time::sleep(ACCEPT_RETRY_DELAY) => {}
    }
}
