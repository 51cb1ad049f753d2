//! The turn coordinator.
//!
//! One turn starts with a user message and runs model rounds until a
//! round produces no tool calls, the round limit trips, or the turn is
//! cancelled. Each round streams text into the editor through the
//! [`StreamingResponseSink`] while tool call requests accumulate; after
//! the stream ends, all of the round's calls run through the consent
//! pipeline concurrently and their outcomes (in request order) seed the
//! next round.

use crate::config::TurnConfig;
use crate::ports::approval::ApprovalPort;
use crate::ports::capability::CapabilityRegistry;
use crate::ports::editor::EditorPort;
use crate::ports::model_gateway::{GatewayError, ModelGateway, ModelStream, RoundInput};
use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use crate::use_cases::orchestrate_tool::ToolOrchestrator;
use crate::use_cases::shared::check_cancelled;
use crate::use_cases::stream_sink::{SinkReport, StreamingResponseSink};
use scribe_domain::{CallId, StreamEvent, ToolRequest};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Error type for a whole turn.
#[derive(Debug, Error)]
pub enum TurnError {
    /// The user stopped the turn; in-flight work was aborted.
    #[error("turn cancelled")]
    Cancelled,

    /// The model kept requesting tools past the configured bound.
    #[error("round limit exceeded after {rounds} model rounds")]
    RoundLimitExceeded { rounds: usize },

    /// The model transport failed.
    #[error("model gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The model broke the tool-call contract (e.g. a reused call id).
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl TurnError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TurnError::Cancelled)
    }
}

/// What a completed turn amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutput {
    /// Model rounds consumed (1 = no tool calls at all).
    pub rounds: usize,
    /// Characters flushed into the editor across all rounds.
    pub chars_streamed: usize,
}

/// Handle over a running turn.
pub struct TurnHandle {
    token: CancellationToken,
    join: JoinHandle<Result<TurnOutput, TurnError>>,
}

impl TurnHandle {
    /// Request cancellation. Streaming stops at the next flush boundary
    /// and pending gates resolve as denials.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub async fn wait(self) -> Result<TurnOutput, TurnError> {
        self.join
            .await
            .map_err(|e| TurnError::Internal(e.to_string()))?
    }
}

/// Runs turns against a model gateway, an approval surface, a capability
/// registry, and an editor.
pub struct TurnCoordinator {
    gateway: Arc<dyn ModelGateway>,
    approval: Arc<dyn ApprovalPort>,
    capabilities: Arc<CapabilityRegistry>,
    editor: Arc<dyn EditorPort>,
    config: TurnConfig,
    progress: Arc<dyn TurnProgressNotifier>,
}

impl TurnCoordinator {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        approval: Arc<dyn ApprovalPort>,
        capabilities: Arc<CapabilityRegistry>,
        editor: Arc<dyn EditorPort>,
    ) -> Self {
        Self {
            gateway,
            approval,
            capabilities,
            editor,
            config: TurnConfig::default(),
            progress: Arc::new(NoTurnProgress),
        }
    }

    pub fn with_config(mut self, config: TurnConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn TurnProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Spawn the turn and return a handle for stopping and awaiting it.
    pub fn start(self, message: impl Into<String>) -> TurnHandle {
        let token = CancellationToken::new();
        let run_token = token.clone();
        let message = message.into();
        let join = tokio::spawn(async move { self.run(message, run_token).await });
        TurnHandle { token, join }
    }

    /// Run one turn to completion on the current task.
    pub async fn run(
        &self,
        message: String,
        token: CancellationToken,
    ) -> Result<TurnOutput, TurnError> {
        let mut seen_call_ids: HashSet<CallId> = HashSet::new();
        let mut input = RoundInput::UserMessage(message);
        let mut chars_streamed = 0usize;
        let mut rounds = 0usize;

        loop {
            check_cancelled(&token)?;
            rounds += 1;
            self.progress.on_round_started(rounds);
            info!(round = rounds, "model round started");

            let stream = self.gateway.start_round(&input).await.map_err(|e| {
                if e.is_aborted() {
                    TurnError::Cancelled
                } else {
                    TurnError::Gateway(e)
                }
            })?;

            let (requests, report) = self
                .drain_round(stream, &token, &mut seen_call_ids)
                .await?;
            chars_streamed += report.chars_flushed;
            if report.cancelled {
                return Err(TurnError::Cancelled);
            }

            if requests.is_empty() {
                info!(rounds, chars_streamed, "turn completed");
                return Ok(TurnOutput {
                    rounds,
                    chars_streamed,
                });
            }

            // The round limit counts model calls. Tool calls arriving in
            // a round past the limit terminate the turn; they are never
            // gated or executed.
            if rounds > self.config.max_rounds {
                warn!(rounds, limit = self.config.max_rounds, "round limit exceeded");
                return Err(TurnError::RoundLimitExceeded { rounds });
            }

            let orchestrator =
                ToolOrchestrator::new(self.approval.clone(), self.capabilities.clone())
                    .with_cancellation(token.clone());
            let outcomes = futures::future::join_all(
                requests
                    .into_iter()
                    .map(|request| orchestrator.run(request, self.progress.as_ref())),
            )
            .await;
            check_cancelled(&token)?;

            input = RoundInput::ToolOutcomes(outcomes);
        }
    }

    /// Consume one model stream: text deltas go to a sink task, tool
    /// call requests accumulate. Returns the requests in arrival order
    /// plus the sink report.
    async fn drain_round(
        &self,
        mut stream: ModelStream,
        token: &CancellationToken,
        seen_call_ids: &mut HashSet<CallId>,
    ) -> Result<(Vec<ToolRequest>, SinkReport), TurnError> {
        let (text_tx, text_rx) = mpsc::channel(64);
        let sink = StreamingResponseSink::new(self.editor.clone(), &self.config)
            .with_cancellation(token.clone());
        let sink_task = tokio::spawn(async move { sink.consume(text_rx).await });

        let mut requests: Vec<ToolRequest> = Vec::new();
        let mut failure: Option<TurnError> = None;

        loop {
            let event = tokio::select! {
                _ = token.cancelled() => {
                    stream.abort();
                    failure = Some(TurnError::Cancelled);
                    break;
                }
                event = stream.next_event() => event,
            };
            match event {
                Some(StreamEvent::TextDelta(chunk)) => {
                    // The sink only goes away when cancellation is
                    // already in flight.
                    if text_tx.send(chunk).await.is_err() {
                        stream.abort();
                        failure = Some(TurnError::Cancelled);
                        break;
                    }
                }
                Some(StreamEvent::ToolCallRequest(request)) => {
                    if !seen_call_ids.insert(request.call_id.clone()) {
                        stream.abort();
                        failure = Some(TurnError::ProtocolViolation(format!(
                            "call id reused within turn: {}",
                            request.call_id
                        )));
                        break;
                    }
                    requests.push(request);
                }
                Some(StreamEvent::Error(message)) => {
                    // The transport may still be live after an error
                    // event; shut it down rather than leaving it
                    // half-open.
                    stream.abort();
                    failure = Some(TurnError::Gateway(GatewayError::RequestFailed(message)));
                    break;
                }
                Some(StreamEvent::Completed) | None => break,
            }
        }

        drop(text_tx);
        let report = sink_task
            .await
            .map_err(|e| TurnError::Internal(e.to_string()))?;
        match failure {
            Some(error) => Err(error),
            None => Ok((requests, report)),
        }
    }
}
