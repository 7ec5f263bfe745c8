//! Metrics declaration and initialization.

use std::time::Duration;

use crate::context::CacheContext;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    // Cache status metrics

    /// Track number of cache hit events.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "wanderly_cache_hit_total",
            "Total number of cache hit events."
        );
        "wanderly_cache_hit_total"
    };
    /// Track number of cache miss events.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "wanderly_cache_miss_total",
            "Total number of cache miss events."
        );
        "wanderly_cache_miss_total"
    };

    // Latency metrics

    /// Histogram of fetch-through request duration.
    pub static ref CACHE_REQUEST_DURATION: &'static str = {
        metrics::describe_histogram!(
            "wanderly_request_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of fetch-through requests in seconds."
        );
        "wanderly_request_duration_seconds"
    };
    /// Histogram of upstream provider call duration.
    pub static ref CACHE_UPSTREAM_DURATION: &'static str = {
        metrics::describe_histogram!(
            "wanderly_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of upstream provider calls in seconds."
        );
        "wanderly_upstream_duration_seconds"
    };

    // Offload manager metrics

    /// Track number of offload tasks spawned.
    pub static ref OFFLOAD_TASKS_SPAWNED: &'static str = {
        metrics::describe_counter!(
            "wanderly_offload_tasks_spawned_total",
            "Total number of offload tasks spawned."
        );
        "wanderly_offload_tasks_spawned_total"
    };
    /// Track number of offload tasks completed.
    pub static ref OFFLOAD_TASKS_COMPLETED: &'static str = {
        metrics::describe_counter!(
            "wanderly_offload_tasks_completed_total",
            "Total number of offload tasks completed."
        );
        "wanderly_offload_tasks_completed_total"
    };
    /// Gauge of currently active offload tasks.
    pub static ref OFFLOAD_TASKS_ACTIVE: &'static str = {
        metrics::describe_gauge!(
            "wanderly_offload_tasks_active",
            "Number of currently active offload tasks."
        );
        "wanderly_offload_tasks_active"
    };
    /// Histogram of offload task duration.
    pub static ref OFFLOAD_TASK_DURATION: &'static str = {
        metrics::describe_histogram!(
            "wanderly_offload_task_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of offload tasks in seconds."
        );
        "wanderly_offload_task_duration_seconds"
    };
}

/// Record metrics from a CacheContext after a fetch-through operation.
///
/// # Arguments
/// * `ctx` - The cache context describing where the response came from
/// * `duration` - Duration of the fetch-through request
///
/// When the `metrics` feature is disabled, this function is a no-op
/// and will be eliminated by the compiler.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_fetch_metrics(ctx: &CacheContext, duration: Duration) {
    let status = ctx.status.as_str();
    let source = ctx.source.as_str();

    metrics::histogram!(
        *CACHE_REQUEST_DURATION,
        "status" => status,
        "source" => source.to_string()
    )
    .record(duration.as_secs_f64());

    let counter = match ctx.status {
        crate::context::CacheStatus::Hit => *CACHE_HIT_COUNTER,
        crate::context::CacheStatus::Miss => *CACHE_MISS_COUNTER,
    };
    metrics::counter!(counter, "source" => source.to_string()).increment(1);
}

/// No-op version when metrics feature is disabled.
/// The compiler will eliminate this empty function call.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_fetch_metrics(_ctx: &CacheContext, _duration: Duration) {}

/// Record the duration of an upstream provider call.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_upstream_duration(duration: Duration) {
    metrics::histogram!(*CACHE_UPSTREAM_DURATION).record(duration.as_secs_f64());
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_upstream_duration(_duration: Duration) {}
