//! Tool call domain model: requests, candidates, decisions, outcomes.

pub mod call_state;
pub mod candidate;
pub mod decision;
pub mod error;
pub mod outcome;
pub mod request;
pub mod selection;
