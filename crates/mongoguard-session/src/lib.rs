//! mongoguard session library entry.
//!
//! This crate wires the core explain/policy rules onto a database driver: the
//! `GuardedSession` builder, the driver seam (`GuardDatabase` /
//! `GuardCollection`, implemented for the `mongodb` crate), the caller's
//! cancellation context, and optional in-process metrics.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod backend;
pub mod context;
pub mod obs;
pub mod session;

pub use backend::{GuardCollection, GuardDatabase};
pub use context::QueryContext;
pub use obs::metrics::GuardMetrics;
pub use session::GuardedSession;
pub use mongodb;
