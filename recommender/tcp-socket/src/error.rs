// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use recommender_core::CoreError;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;
use tokio_util::codec::LinesCodecError;

/// Failures of a single coordinator/worker exchange
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Framing error: {0}")]
    Frame(#[from] LinesCodecError),

    #[error("Malformed message: {0}")]
    Message(#[from] CoreError),

    #[error("Connection closed before a complete message arrived")]
    ConnectionClosed,

    #[error("Exchange timed out after {0:?}")]
    Timeout(Duration),

    #[error("Partition computation failed: {0}")]
    Computation(#[from] JoinError),
}
