// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::TransportError;
use crate::line_codec::{frame, recv_frame, send_frame, FramedConnection};
use recommender_core::aggregator::Aggregator;
use recommender_core::partition_manager::{Partition, PartitionManager};
use recommender_core::result_data::ResultData;
use recommender_core::wire_message::WorkerMessage;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

/// Progress of one worker connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    AwaitingPartition,
    Dispatched,
    AwaitingResult,
    Completed,
    Terminated,
}

/// What a finished connection contributed to the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The worker returned a result for the partition and it was absorbed
    Completed { partition: usize, users: usize },
    /// No partition was left, the worker was told to stop
    Terminated,
    /// The exchange broke off, the partition is lost for this run
    Failed { partition: usize, reason: String },
}

/// Runs the dispatch/collect exchange for each accepted worker connection
pub struct ConnectionHandler {
    partitions: Arc<PartitionManager>,
    aggregator: Arc<Aggregator>,
    timeout: Option<Duration>,
    max_message_bytes: usize,
}

impl ConnectionHandler {
    pub fn new(
        partitions: Arc<PartitionManager>,
        aggregator: Arc<Aggregator>,
        timeout: Option<Duration>,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            partitions,
            aggregator,
            timeout,
            max_message_bytes,
        }
    }

    pub async fn handle(&self, stream: TcpStream, peer: SocketAddr) -> ConnectionOutcome {
        let mut connection = frame(stream, self.max_message_bytes);
        let mut state = DispatchState::AwaitingPartition;

        let Some(partition) = self.partitions.next_partition() else {
            info!(%peer, "No more partitions to assign");
            if let Err(e) = self.terminate(&mut connection).await {
                warn!(%peer, error = %e, "Error sending NO_MORE_WORK");
            }
            transition(&mut state, DispatchState::Terminated, peer);
            return ConnectionOutcome::Terminated;
        };

        let exchange = dispatch_and_collect(&mut connection, &partition, &mut state, peer);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result,
                Err(_) => Err(TransportError::Timeout(limit)),
            },
            None => exchange.await,
        };

        match result {
            Ok(result_data) => {
                let users = result_data.user_count();
                self.aggregator.absorb(result_data);
                transition(&mut state, DispatchState::Completed, peer);
                info!(%peer, partition = partition.index(), users, "Received results");
                ConnectionOutcome::Completed {
                    partition: partition.index(),
                    users,
                }
            }
            Err(e) => {
                warn!(
                    %peer,
                    partition = partition.index(),
                    state = ?state,
                    error = %e,
                    "Worker exchange failed, partition dropped for this run"
                );
                ConnectionOutcome::Failed {
                    partition: partition.index(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn terminate(&self, connection: &mut FramedConnection) -> Result<(), TransportError> {
        let message = WorkerMessage::encode_no_more_work()?;
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, send_frame(connection, message))
                .await
                .map_err(|_| TransportError::Timeout(limit))?,
            None => send_frame(connection, message).await,
        }
    }
}

async fn dispatch_and_collect(
    connection: &mut FramedConnection,
    partition: &Partition,
    state: &mut DispatchState,
    peer: SocketAddr,
) -> Result<ResultData, TransportError> {
    let payload = WorkerMessage::encode_partition(partition.records())?;
    send_frame(connection, payload).await?;
    transition(state, DispatchState::Dispatched, peer);
    info!(%peer, partition = partition.index(), records = partition.len(), "Sent partition");

    transition(state, DispatchState::AwaitingResult, peer);
    let frame = recv_frame(connection).await?;
    Ok(ResultData::decode(&frame)?)
}

fn transition(state: &mut DispatchState, next: DispatchState, peer: SocketAddr) {
    debug!(%peer, from = ?*state, to = ?next, "Connection state change");
    *state = next;
}
