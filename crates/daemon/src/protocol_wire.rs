// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed JSON framing for the daemon socket.
//!
//! Every frame is a 4-byte big-endian payload length followed by that many
//! bytes of JSON. One request/response pair per connection.

use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::{Request, Response};

/// Cap on a single frame's payload. Real messages are well under a
/// kilobyte; anything near this is a corrupt or hostile peer.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Default IPC timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Framing and transport errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Timeout")]
    Timeout,
}

fn check_size(size: usize) -> Result<(), ProtocolError> {
    if size > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size,
            max: MAX_MESSAGE_SIZE,
        });
    }
    Ok(())
}

/// Serialize a message to its JSON payload (no length prefix; pair with
/// [`write_message`]).
pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, ProtocolError> {
    let payload = serde_json::to_vec(msg)?;
    check_size(payload.len())?;
    Ok(payload)
}

/// Deserialize a received payload
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Read one frame, returning its payload.
///
/// EOF on the length prefix is a clean disconnect and maps to
/// `ConnectionClosed`; EOF mid-payload stays an IO error.
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut prefix = [0u8; 4];
    if let Err(e) = reader.read_exact(&mut prefix).await {
        return Err(if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ProtocolError::ConnectionClosed
        } else {
            ProtocolError::Io(e)
        });
    }

    let len = u32::from_be_bytes(prefix) as usize;
    check_size(len)?;

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}

/// Write one frame around an already-encoded payload.
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    payload: &[u8],
) -> Result<(), ProtocolError> {
    check_size(payload.len())?;
    writer.write_all(&(payload.len() as u32).to_be_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Server side: read and decode one request within the timeout.
pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    let payload = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    decode(&payload)
}

/// Server side: encode and write one response within the timeout.
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let payload = encode(response)?;
    tokio::time::timeout(timeout, write_message(writer, &payload))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}
