//! Capability port and registry.
//!
//! One executor per tool kind turns validated parameters into candidate
//! results. The [`CapabilityRegistry`] dispatches by kind, bounds
//! concurrent executions with a counting limiter, and enforces the
//! result caps regardless of executor behavior.

use async_trait::async_trait;
use scribe_domain::{CandidateResult, ExecutionError, ResultCaps, ToolKind, ToolParams};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Default bound on concurrently running capability executions.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Raw output of one capability execution, before cap enforcement.
#[derive(Debug, Clone, Default)]
pub struct CapabilityOutput {
    pub candidates: Vec<CandidateResult>,
    /// How many items the execution actually found, which may exceed
    /// the number of candidates returned.
    pub total_found: usize,
}

impl CapabilityOutput {
    pub fn new(candidates: Vec<CandidateResult>, total_found: usize) -> Self {
        Self {
            candidates,
            total_found,
        }
    }
}

/// Port implemented by each capability executor.
///
/// Executors are pure with respect to the pipeline: parameters in,
/// candidate list out, typed [`ExecutionError`] on failure. They never
/// present UI and never see approval decisions.
#[async_trait]
pub trait CapabilityPort: Send + Sync {
    /// The single tool kind this executor serves.
    fn kind(&self) -> ToolKind;

    async fn execute(
        &self,
        params: &ToolParams,
        caps: &ResultCaps,
    ) -> Result<CapabilityOutput, ExecutionError>;
}

/// Registry of capability executors keyed by tool kind.
pub struct CapabilityRegistry {
    executors: HashMap<ToolKind, Arc<dyn CapabilityPort>>,
    limiter: Arc<Semaphore>,
    caps: ResultCaps,
}

impl CapabilityRegistry {
    pub fn new(caps: ResultCaps, max_concurrent: usize) -> Self {
        Self {
            executors: HashMap::new(),
            limiter: Arc::new(Semaphore::new(max_concurrent.max(1))),
            caps: caps.clamped(),
        }
    }

    pub fn register(mut self, executor: Arc<dyn CapabilityPort>) -> Self {
        self.executors.insert(executor.kind(), executor);
        self
    }

    pub fn caps(&self) -> ResultCaps {
        self.caps
    }

    pub fn supports(&self, kind: ToolKind) -> bool {
        self.executors.contains_key(&kind)
    }

    /// Execute the matching capability under the concurrency limiter
    /// and enforce the result caps on its output: candidate count is
    /// silently truncated (the true count survives in `total_found`)
    /// and every preview is re-clamped.
    pub async fn execute(&self, params: &ToolParams) -> Result<CapabilityOutput, ExecutionError> {
        let kind = params.kind();
        let executor = self.executors.get(&kind).ok_or_else(|| {
            ExecutionError::not_found(format!("no executor registered for {}", kind))
        })?;

        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| ExecutionError::io("capability limiter closed"))?;

        let mut output = executor.execute(params, &self.caps).await?;

        if output.total_found < output.candidates.len() {
            output.total_found = output.candidates.len();
        }
        output.candidates.truncate(self.caps.max_results);
        for candidate in &mut output.candidates {
            candidate.clamp_preview(self.caps.preview_chars);
        }

        debug!(
            kind = %kind,
            found = output.total_found,
            returned = output.candidates.len(),
            "capability executed"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_domain::ExecutionErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Test executor returning a fixed number of oversized candidates.
    struct FixedSearch {
        count: usize,
    }

    #[async_trait]
    impl CapabilityPort for FixedSearch {
        fn kind(&self) -> ToolKind {
            ToolKind::CorpusSearch
        }

        async fn execute(
            &self,
            _params: &ToolParams,
            _caps: &ResultCaps,
        ) -> Result<CapabilityOutput, ExecutionError> {
            let candidates = (0..self.count)
                .map(|i| {
                    // Deliberately ignores the preview cap.
                    CandidateResult::with_preview(
                        format!("notes/{}.md", i),
                        format!("{}", i),
                        &"long preview ".repeat(100),
                        "raw",
                        10_000,
                    )
                })
                .collect();
            Ok(CapabilityOutput::new(candidates, self.count))
        }
    }

    fn search_params() -> ToolParams {
        ToolParams::CorpusSearch {
            query: "typescript".to_string(),
            scope: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_truncates_to_cap_and_records_total() {
        let registry = CapabilityRegistry::new(ResultCaps::new(10, 200), 2)
            .register(Arc::new(FixedSearch { count: 15 }));

        let output = registry.execute(&search_params()).await.unwrap();
        assert_eq!(output.candidates.len(), 10);
        assert_eq!(output.total_found, 15);
    }

    #[tokio::test]
    async fn test_previews_reclamped() {
        let registry = CapabilityRegistry::new(ResultCaps::new(10, 200), 2)
            .register(Arc::new(FixedSearch { count: 3 }));

        let output = registry.execute(&search_params()).await.unwrap();
        for candidate in &output.candidates {
            assert!(candidate.preview.chars().count() <= 200);
        }
    }

    #[tokio::test]
    async fn test_unregistered_kind_fails_typed() {
        let registry = CapabilityRegistry::new(ResultCaps::default(), 2);
        let err = registry.execute(&search_params()).await.unwrap_err();
        assert_eq!(err.kind, ExecutionErrorKind::NotFound);
    }

    /// Test executor that holds its permit across a sleep and records
    /// how many executions overlapped.
    struct SlowSearch {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        completed: AtomicUsize,
    }

    #[async_trait]
    impl CapabilityPort for SlowSearch {
        fn kind(&self) -> ToolKind {
            ToolKind::CorpusSearch
        }

        async fn execute(
            &self,
            _params: &ToolParams,
            _caps: &ResultCaps,
        ) -> Result<CapabilityOutput, ExecutionError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(CapabilityOutput::default())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_bounds_concurrent_executions() {
        let slow = Arc::new(SlowSearch {
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        });
        let registry = Arc::new(
            CapabilityRegistry::new(ResultCaps::default(), 2).register(slow.clone()),
        );

        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.execute(&search_params()).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(slow.completed.load(Ordering::SeqCst), 6);
        assert!(slow.max_in_flight.load(Ordering::SeqCst) <= 2);
        assert_eq!(slow.in_flight.load(Ordering::SeqCst), 0);
    }
}
