//! Model gateway port.
//!
//! Defines how the turn loop communicates with model providers.
//! Adapters normalize their wire formats into [`StreamEvent`]s at this
//! boundary, so provider-specific response shapes never reach the
//! application layer.

use async_trait::async_trait;
use scribe_domain::{StreamEvent, ToolOutcome};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors from the model transport itself (not tool-call-specific).
///
/// Adapters must sanitize messages before constructing these; API keys
/// and other secrets never appear in a user-visible error (see
/// `scribe_domain::util::redact_secrets`).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("timeout")]
    Timeout,

    #[error("transport closed")]
    TransportClosed,

    /// Cancellation-induced abort; a normal cancellation path, not an
    /// error to report.
    #[error("transport aborted")]
    Aborted,
}

impl GatewayError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, GatewayError::Aborted)
    }
}

/// Input for one round of a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundInput {
    /// The opening round: the user's message.
    UserMessage(String),
    /// A follow-up round: outcomes for every tool call of the previous
    /// round, in request order.
    ToolOutcomes(Vec<ToolOutcome>),
}

/// Handle over one in-flight model call.
///
/// Owns the normalized event stream and an abort token wired into the
/// underlying transport: [`abort`](Self::abort) cancels the request
/// itself, it does not merely stop reading.
pub struct ModelStream {
    receiver: mpsc::Receiver<StreamEvent>,
    abort: CancellationToken,
}

impl ModelStream {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>, abort: CancellationToken) -> Self {
        Self { receiver, abort }
    }

    /// Next normalized event, or `None` once the transport closes.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Cancel the underlying transport.
    pub fn abort(&self) {
        self.abort.cancel();
    }

    /// Consume the stream and collect all text. Convenience for tests
    /// and non-streaming callers.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.next_event().await {
            match event {
                StreamEvent::TextDelta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed => return Ok(full_text),
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
                StreamEvent::ToolCallRequest(_) => {}
            }
        }
        Ok(full_text)
    }
}

/// Gateway for model communication.
///
/// One implementation per provider lives outside the application layer;
/// each returns the same normalized stream shape.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Start one model call for the given round input.
    async fn start_round(&self, input: &RoundInput) -> Result<ModelStream, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_text_joins_deltas() {
        let (tx, rx) = mpsc::channel(8);
        let stream = ModelStream::new(rx, CancellationToken::new());
        tx.send(StreamEvent::TextDelta("hello ".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::TextDelta("world".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Completed).await.unwrap();

        assert_eq!(stream.collect_text().await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_collect_text_surfaces_stream_error() {
        let (tx, rx) = mpsc::channel(8);
        let stream = ModelStream::new(rx, CancellationToken::new());
        tx.send(StreamEvent::Error("boom".to_string()))
            .await
            .unwrap();

        assert!(matches!(
            stream.collect_text().await,
            Err(GatewayError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_abort_cancels_transport_token() {
        let (_tx, rx) = mpsc::channel::<StreamEvent>(1);
        let abort = CancellationToken::new();
        let stream = ModelStream::new(rx, abort.clone());
        stream.abort();
        assert!(abort.is_cancelled());
    }
}
