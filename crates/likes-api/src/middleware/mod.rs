//! # Middleware Stack
//!
//! - [`metrics`]: Prometheus request metrics and vote counters.
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly; see
//! [`crate::app`].

pub mod metrics;
