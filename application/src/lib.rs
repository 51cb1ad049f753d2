//! Application layer for scribe-agent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{InsertMode, TurnConfig, DEFAULT_FLUSH_INTERVAL, DEFAULT_MAX_ROUNDS};
pub use ports::{
    approval::{ApprovalError, ApprovalPort, AutoApproveApproval, AutoDenyApproval},
    approval_gate::{approval_gate, GateHandle, PendingDecision},
    capability::{CapabilityOutput, CapabilityPort, CapabilityRegistry, DEFAULT_MAX_CONCURRENT},
    editor::{EditorPort, MemoryEditor, Selection},
    model_gateway::{GatewayError, ModelGateway, ModelStream, RoundInput},
    progress::{NoTurnProgress, TurnProgressNotifier},
};
pub use use_cases::orchestrate_tool::ToolOrchestrator;
pub use use_cases::run_turn::{TurnCoordinator, TurnError, TurnHandle, TurnOutput};
pub use use_cases::stream_sink::{SinkReport, StreamingResponseSink};
