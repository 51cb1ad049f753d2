//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod orchestrate_tool;
pub mod run_turn;
pub mod stream_sink;
pub(crate) mod shared;
