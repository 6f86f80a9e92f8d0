//! Top-level facade crate for mongoguard.
//!
//! Re-exports the core guard rules and the session library so users can depend
//! on a single crate.
//!
//! ```no_run
//! use mongoguard::{with_threshold, GuardedSession, QueryContext};
//! use mongoguard::core::bson::doc;
//!
//! # async fn run(db: mongoguard::session::mongodb::Database) -> mongoguard::Result<()> {
//! let cursor = GuardedSession::new([with_threshold(10)])
//!     .with_database(db)
//!     .with_collection("users")?
//!     .find(&QueryContext::background(), doc! { "name": "Ada" }, None)
//!     .await?;
//! # drop(cursor);
//! # Ok(())
//! # }
//! ```

pub mod core {
    pub use mongoguard_core::*;
}

pub mod session {
    pub use mongoguard_session::*;
}

pub use mongoguard_core::{with_threshold, GuardConfig, GuardError, GuardOption, Result};
pub use mongoguard_session::{GuardMetrics, GuardedSession, QueryContext};
