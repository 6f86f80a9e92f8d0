//! Lightweight in-process guard metrics.
//!
//! Counters and histograms are stored as atomics keyed by sorted label sets
//! and rendered in Prometheus text exposition format by `GuardMetrics::render`.

pub mod metrics;
