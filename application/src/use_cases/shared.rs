//! Shared utilities for use cases.

use crate::use_cases::run_turn::TurnError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(TurnError::Cancelled)` if the token is cancelled.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), TurnError> {
    if token.is_cancelled() {
        return Err(TurnError::Cancelled);
    }
    Ok(())
}
