// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::TransportError;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};

/// Newline-delimited JSON over a TCP stream
pub type FramedConnection = Framed<TcpStream, LinesCodec>;

pub fn frame(stream: TcpStream, max_message_bytes: usize) -> FramedConnection {
    Framed::new(stream, LinesCodec::new_with_max_length(max_message_bytes))
}

pub async fn send_frame(
    connection: &mut FramedConnection,
    message: String,
) -> Result<(), TransportError> {
    connection.send(message).await?;
    Ok(())
}

/// Next complete frame. A trailing frame without a newline is accepted when
/// the peer closes its side right after writing it.
pub async fn recv_frame(connection: &mut FramedConnection) -> Result<String, TransportError> {
    match connection.next().await {
        Some(frame) => Ok(frame?),
        None => Err(TransportError::ConnectionClosed),
    }
}
