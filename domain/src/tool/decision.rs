//! Approval decisions returned by the two consent gates.

use crate::tool::candidate::CandidateResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Decision of the execute gate: may this tool run at all.
///
/// Carries no selection data; it is produced and consumed within one
/// orchestration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteDecision {
    pub approved: bool,
}

impl ExecuteDecision {
    pub fn approve() -> Self {
        Self { approved: true }
    }

    pub fn deny() -> Self {
        Self { approved: false }
    }
}

/// Decision of the results gate: which candidate ids may be released.
///
/// A denied decision always carries an empty id set; the constructors
/// maintain that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsDecision {
    pub approved: bool,
    pub released_ids: BTreeSet<String>,
}

impl ResultsDecision {
    pub fn approve(released_ids: BTreeSet<String>) -> Self {
        Self {
            approved: true,
            released_ids,
        }
    }

    /// Approve with every candidate released.
    pub fn approve_all(candidates: &[CandidateResult]) -> Self {
        Self::approve(candidates.iter().map(|c| c.id.clone()).collect())
    }

    pub fn deny() -> Self {
        Self {
            approved: false,
            released_ids: BTreeSet::new(),
        }
    }

    /// Drop any id that does not belong to this call's candidate set,
    /// restoring the `released_ids ⊆ candidates` invariant.
    pub fn sanitize(mut self, candidates: &[CandidateResult]) -> Self {
        if !self.approved {
            self.released_ids.clear();
            return self;
        }
        self.released_ids
            .retain(|id| candidates.iter().any(|c| &c.id == id));
        self
    }
}
