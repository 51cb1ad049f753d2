//! Per-item share flags backing the results approval dialog.

use crate::tool::candidate::CandidateResult;
use std::collections::BTreeSet;

/// Selection state for one call's candidate set.
///
/// Holds one boolean "share" flag per candidate id, in candidate order.
/// The selector never owns candidate data; it is a view the approval
/// surface mutates while the candidates themselves stay untouched.
#[derive(Debug, Clone, Default)]
pub struct ResultSelector {
    entries: Vec<SelectionEntry>,
}

#[derive(Debug, Clone)]
struct SelectionEntry {
    id: String,
    share: bool,
}

impl ResultSelector {
    /// Create a selector with every candidate initially shared.
    pub fn for_candidates(candidates: &[CandidateResult]) -> Self {
        Self {
            entries: candidates
                .iter()
                .map(|c| SelectionEntry {
                    id: c.id.clone(),
                    share: true,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn select_all(&mut self) {
        for entry in &mut self.entries {
            entry.share = true;
        }
    }

    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.share = false;
        }
    }

    /// Flip one item's share flag. Returns the new state, or `None` if
    /// the id is unknown.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.share = !entry.share;
        Some(entry.share)
    }

    pub fn is_shared(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id && e.share)
    }

    pub fn shared_count(&self) -> usize {
        self.entries.iter().filter(|e| e.share).count()
    }

    /// Ids currently marked for release.
    pub fn shared_ids(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|e| e.share)
            .map(|e| e.id.clone())
            .collect()
    }
}
