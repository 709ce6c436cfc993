// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::TransportError;
use crate::line_codec::{frame, recv_frame, send_frame};
use futures::SinkExt;
use recommender_core::partition_job::PartitionJob;
use recommender_core::wire_message::WorkerMessage;
use std::sync::Arc;
use tokio::net::TcpStream;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The coordinator had no partition left
    NoMoreWork,
    Completed { records: usize, users: usize },
}

/// Fetch one partition from the coordinator, compute it and send the result back
pub async fn run_worker<J: PartitionJob>(
    address: &str,
    job: Arc<J>,
    max_message_bytes: usize,
) -> Result<WorkerOutcome, TransportError> {
    let stream = TcpStream::connect(address).await?;
    info!(address, "Connected to coordinator");
    let mut connection = frame(stream, max_message_bytes);

    let message = recv_frame(&mut connection).await?;
    let records = match WorkerMessage::decode(&message)? {
        WorkerMessage::NoMoreWork => {
            info!("No more work assigned by coordinator");
            return Ok(WorkerOutcome::NoMoreWork);
        }
        WorkerMessage::Partition(records) => records,
    };

    let record_count = records.len();
    info!(records = record_count, "Received partition");

    let result = tokio::task::spawn_blocking(move || job.compute(&records)).await?;
    let users = result.user_count();

    send_frame(&mut connection, result.encode()?).await?;
    SinkExt::<String>::close(&mut connection).await?;
    info!(users, "Sent results to coordinator");

    Ok(WorkerOutcome::Completed {
        records: record_count,
        users,
    })
}
