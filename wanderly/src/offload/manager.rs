//! OffloadManager implementation for background task execution.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use smol_str::SmolStr;
use tokio::task::JoinHandle;
use tracing::{Instrument, info_span};

#[cfg(feature = "metrics")]
use std::time::Instant;

#[cfg(feature = "metrics")]
use crate::metrics::{OFFLOAD_TASK_DURATION, OFFLOAD_TASKS_ACTIVE, OFFLOAD_TASKS_COMPLETED, OFFLOAD_TASKS_SPAWNED};

/// Internal state shared across clones.
#[derive(Debug, Default)]
struct OffloadManagerInner {
    tasks: DashMap<u64, JoinHandle<()>>,
    task_counter: AtomicU64,
}

/// Manager for offloading tasks to background execution.
///
/// Every spawned task is tracked until it completes, so callers can await
/// quiescence or cancel outstanding work. Tasks run to completion with no
/// timeout: the only task kind spawned by the fetcher is a single cache
/// write, bounded by the store client's own timeouts.
#[derive(Clone, Debug, Default)]
pub struct OffloadManager {
    inner: Arc<OffloadManagerInner>,
}

impl OffloadManager {
    /// Create a new OffloadManager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task to be executed in the background.
    ///
    /// The kind is used for tracing spans and metrics labels.
    ///
    /// # Example
    /// ```ignore
    /// manager.spawn("cache_write", async { /* ... */ });
    /// ```
    pub fn spawn<F>(&self, kind: impl Into<SmolStr>, task: F) -> u64
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let kind = kind.into();
        let id = self.inner.task_counter.fetch_add(1, Ordering::Relaxed);
        let inner = self.inner.clone();

        let span = info_span!("offload_task", kind = %kind, id);

        #[cfg(feature = "metrics")]
        {
            metrics::counter!(*OFFLOAD_TASKS_SPAWNED, "kind" => kind.to_string()).increment(1);
            metrics::gauge!(*OFFLOAD_TASKS_ACTIVE, "kind" => kind.to_string()).increment(1.0);
        }

        let handle = tokio::spawn(
            async move {
                #[cfg(feature = "metrics")]
                let start = Instant::now();
                task.await;
                inner.tasks.remove(&id);
                #[cfg(feature = "metrics")]
                Self::record_completion(start, &kind);
            }
            .instrument(span),
        );
        self.inner.tasks.insert(id, handle);
        id
    }

    /// Get the number of currently active tasks.
    pub fn active_task_count(&self) -> usize {
        self.inner.tasks.iter().filter(|e| !e.is_finished()).count()
    }

    /// Clean up finished task handles.
    pub fn cleanup_finished(&self) {
        self.inner.tasks.retain(|_, handle| !handle.is_finished());
    }

    /// Cancel all running tasks.
    ///
    /// An aborted cache write is indistinguishable from a failed one: the
    /// entry is simply absent and the next miss refetches it.
    pub fn cancel_all(&self) {
        for entry in self.inner.tasks.iter() {
            entry.abort();
        }
    }

    /// Wait for all currently tracked tasks to complete.
    ///
    /// This polls active tasks until all are finished, with a small yield
    /// between checks to avoid busy-waiting.
    pub async fn wait_all(&self) {
        loop {
            self.cleanup_finished();

            if self.inner.tasks.is_empty() {
                break;
            }

            // Yield to allow tasks to make progress
            tokio::task::yield_now().await;
        }
    }

    /// Wait for all tasks with a timeout.
    ///
    /// Returns `true` if all tasks completed within the timeout,
    /// `false` if the timeout was reached.
    pub async fn wait_all_timeout(&self, timeout: std::time::Duration) -> bool {
        tokio::time::timeout(timeout, self.wait_all()).await.is_ok()
    }

    #[cfg(feature = "metrics")]
    fn record_completion(start: Instant, kind: &SmolStr) {
        let duration = start.elapsed().as_secs_f64();
        metrics::counter!(*OFFLOAD_TASKS_COMPLETED, "kind" => kind.to_string()).increment(1);
        metrics::gauge!(*OFFLOAD_TASKS_ACTIVE, "kind" => kind.to_string()).decrement(1.0);
        metrics::histogram!(*OFFLOAD_TASK_DURATION, "kind" => kind.to_string()).record(duration);
    }
}

impl wanderly_core::Offload for OffloadManager {
    fn spawn<F>(&self, kind: impl Into<SmolStr>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        OffloadManager::spawn(self, kind, future);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    #[tokio::test]
    async fn test_spawned_task_runs_to_completion() {
        let manager = OffloadManager::new();
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();

        manager.spawn("cache_write", async move {
            flag.store(true, Ordering::SeqCst);
        });

        manager.wait_all().await;
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(manager.active_task_count(), 0);
    }

    #[tokio::test]
    async fn test_wait_all_timeout_reports_stuck_tasks() {
        let manager = OffloadManager::new();
        manager.spawn("cache_write", async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });

        let finished = manager
            .wait_all_timeout(std::time::Duration::from_millis(50))
            .await;
        assert!(!finished);
        manager.cancel_all();
    }
}
