//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Vote-level counters are pushed by the orchestrator as each
//! vote and side effect executes.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts,
    Registry, TextEncoder,
};

use likes_core::Direction;

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    votes_total: IntCounterVec,
    activities_sent_total: IntCounter,
    activities_retracted_total: IntCounter,
    follows_total: IntCounterVec,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

fn sum_counters(vec: &IntCounterVec) -> u64 {
    vec.collect()
        .iter()
        .flat_map(|mf| mf.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("likes_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "likes_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("likes_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let votes_total = IntCounterVec::new(
            Opts::new("likes_votes_total", "Votes recorded, by direction"),
            &["direction"],
        )
        .expect("metric can be created");

        let activities_sent_total = IntCounter::new(
            "likes_activities_sent_total",
            "Activity entries sent by likes",
        )
        .expect("metric can be created");

        let activities_retracted_total = IntCounter::new(
            "likes_activities_retracted_total",
            "Activity entries deleted by unlikes",
        )
        .expect("metric can be created");

        let follows_total = IntCounterVec::new(
            Opts::new("likes_follows_total", "Follow operations, by kind"),
            &["op"],
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(votes_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(activities_sent_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(activities_retracted_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(follows_total.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                votes_total,
                activities_sent_total,
                activities_retracted_total,
                follows_total,
            }),
        }
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counters(&self.inner.http_requests_total)
    }

    /// Total 4xx/5xx count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counters(&self.inner.http_errors_total)
    }

    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    pub fn record_vote(&self, direction: Direction) {
        self.inner
            .votes_total
            .with_label_values(&[direction.as_str()])
            .inc();
    }

    pub fn votes(&self, direction: Direction) -> u64 {
        self.inner
            .votes_total
            .with_label_values(&[direction.as_str()])
            .get()
    }

    pub fn record_activity_sent(&self) {
        self.inner.activities_sent_total.inc();
    }

    pub fn record_activities_retracted(&self, count: usize) {
        self.inner.activities_retracted_total.inc_by(count as u64);
    }

    pub fn activities_sent(&self) -> u64 {
        self.inner.activities_sent_total.get()
    }

    pub fn activities_retracted(&self) -> u64 {
        self.inner.activities_retracted_total.get()
    }

    /// `op` is one of `stream_follow`, `stream_unfollow`, `create`, `remove`.
    pub fn record_follow_op(&self, op: &str) {
        self.inner.follows_total.with_label_values(&[op]).inc();
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `path` label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Route template the request matched, e.g. `/v1/votes/:content_type/:direction`.
///
/// Raw paths carry caller-chosen segments and must not become label values.
fn route_label(matched: Option<&MatchedPath>) -> String {
    matched
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string())
}

/// Middleware that records HTTP request metrics via Prometheus.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = route_label(request.extensions().get::<MatchedPath>());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        m.record_request(&method, &path, response.status().as_u16(), duration);
    }

    response
}
