//! Outbound command sink.

use async_trait::async_trait;
use slirc_proto::Command;
use tokio::sync::mpsc;

use crate::error::SinkError;

/// Transport that puts commands on the wire. Commands must be sent in the
/// order they are handed over; retries, if any, are the sink's business.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn send(&self, command: Command) -> Result<(), SinkError>;
}

#[async_trait]
impl CommandSink for mpsc::Sender<Command> {
    async fn send(&self, command: Command) -> Result<(), SinkError> {
        mpsc::Sender::send(self, command)
            .await
            .map_err(|_| SinkError::Closed)
    }
}
