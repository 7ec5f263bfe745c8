//! Offload trait for background task execution.
//!
//! This module provides the [`Offload`] trait which abstracts over
//! different implementations for spawning background tasks.

use std::future::Future;

use smol_str::SmolStr;

/// Trait for spawning background tasks.
///
/// The read-through fetcher uses this to detach its best-effort cache
/// writes from the request path: the caller's response is never gated on
/// the persistence side effect.
///
/// # Implementations
///
/// The primary implementation is `OffloadManager` in the `wanderly` crate,
/// which tracks spawned tasks so tests can await quiescence.
///
/// # Clone bound
///
/// Implementors should use `Arc` internally so that all cloned instances
/// share the same state.
pub trait Offload: Send + Sync + Clone {
    /// Spawn a future to be executed in the background.
    ///
    /// # Arguments
    ///
    /// * `kind` - A label categorizing the task type (e.g. "cache_write").
    ///   Used for metrics and tracing.
    /// * `future` - The future to execute in the background. Must be
    ///   `Send + 'static` as it may be executed on a different thread.
    fn spawn<F>(&self, kind: impl Into<SmolStr>, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// An [`Offload`] implementation that drops every task without running it.
///
/// Useful in tests that assert the caller-visible behavior of the fetcher
/// is independent of whether persistence ever happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOffload;

impl Offload for DisabledOffload {
    fn spawn<F>(&self, _kind: impl Into<SmolStr>, _future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
    }
}
