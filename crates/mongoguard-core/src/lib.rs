//! mongoguard core: driver-agnostic guard primitives, error types, and config.
//!
//! This crate defines the explain command shape, the projection that pulls the
//! examined-document count out of an explain response, the threshold policy,
//! and the error surface shared by the session layer. It carries no driver or
//! runtime dependencies so the decoding and policy rules can be tested without
//! a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every malformed explain response surfaces as a `GuardError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod error;
pub mod explain;
pub mod policy;

/// Shared result type.
pub use error::{ErrorCode, GuardError, Result};
pub use config::{with_threshold, GuardConfig, GuardOption, DEFAULT_THRESHOLD};
pub use explain::CostEstimate;
pub use policy::PolicyDecision;

// Re-exported so callers build filters with the same `bson` version.
pub use bson;
