//! Telemetry metric name constants.
//!
//! Centralised metric names for munin operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `munin_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `status`: outcome ("ok", "not_found", "upstream_error", "parse_error")
//! - `operation`: always "extract" for now; kept as a label so additional
//!   pipelines can share the same metric names

/// Total extraction requests served by the gateway.
///
/// Labels: `status` ("ok" | "not_found" | "upstream_error" | "parse_error").
pub const REQUESTS_TOTAL: &str = "munin_requests_total";

/// Upstream transform duration in seconds (cache misses only).
pub const TRANSFORM_DURATION_SECONDS: &str = "munin_transform_duration_seconds";

/// Total cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "munin_cache_hits_total";

/// Total cache misses.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "munin_cache_misses_total";
