//! Guarded session: target binding plus the explain-then-query pipeline.
//!
//! A session is an immutable builder. `with_database` and `with_collection`
//! consume the session and hand back a new one, so a fully bound session can
//! be cloned into as many tasks as needed; the read paths only take `&self`.
//!
//! Every guarded read runs explain on the same target and filter first. The
//! delegated query never runs when explain fails, its reply cannot be
//! projected, or the examined-document count exceeds the threshold.

use std::sync::Arc;
use std::time::Instant;

use bson::Document;
use mongodb::options::{FindOneOptions, FindOptions, ReadPreference, SelectionCriteria};
use tracing::{debug, warn};

use mongoguard_core::error::{GuardError, Result};
use mongoguard_core::explain::{decode_cost, explain_command, CostEstimate, EXPLAIN_FIND};
use mongoguard_core::policy::{self, PolicyDecision};
use mongoguard_core::{GuardConfig, GuardOption};

use crate::backend::{GuardCollection, GuardDatabase};
use crate::context::QueryContext;
use crate::obs::metrics::GuardMetrics;

type CursorOf<D> = <<D as GuardDatabase>::Collection as GuardCollection>::Cursor;
type ItemOf<D> = <<D as GuardDatabase>::Collection as GuardCollection>::Item;

#[derive(Clone)]
struct Target<C> {
    name: String,
    handle: C,
}

/// Chainable guard over one database and collection.
#[derive(Clone)]
pub struct GuardedSession<D: GuardDatabase = mongodb::Database> {
    config: GuardConfig,
    database: Option<D>,
    target: Option<Target<D::Collection>>,
    metrics: Option<Arc<GuardMetrics>>,
}

impl<D: GuardDatabase> GuardedSession<D> {
    /// New unbound session; `opts` are applied in order to the default config.
    pub fn new<I>(opts: I) -> Self
    where
        I: IntoIterator<Item = GuardOption>,
    {
        Self::from_config(GuardConfig::with_options(opts))
    }

    pub fn from_config(config: GuardConfig) -> Self {
        Self {
            config,
            database: None,
            target: None,
            metrics: None,
        }
    }

    /// Bind the target database. An already bound collection name is
    /// re-resolved against the new database.
    pub fn with_database(self, database: D) -> Self {
        let target = self.target.map(|t| Target {
            handle: database.collection(&t.name),
            name: t.name,
        });
        Self {
            database: Some(database),
            target,
            ..self
        }
    }

    /// Resolve `name` against the bound database.
    ///
    /// Fails with a config error when no database has been bound yet.
    pub fn with_collection(self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let Some(database) = &self.database else {
            return Err(GuardError::Config(format!(
                "collection '{name}' bound before a database; call with_database first"
            )));
        };
        let handle = database.collection(&name);
        Ok(Self {
            target: Some(Target { name, handle }),
            ..self
        })
    }

    pub fn with_metrics(self, metrics: Arc<GuardMetrics>) -> Self {
        Self {
            metrics: Some(metrics),
            ..self
        }
    }

    pub fn threshold(&self) -> i64 {
        self.config.threshold
    }

    pub fn config(&self) -> GuardConfig {
        self.config
    }

    pub fn collection_name(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.name.as_str())
    }

    /// Guarded find: explain, enforce the threshold, then delegate with
    /// `filter` and `options` unchanged.
    pub async fn find(
        &self,
        ctx: &QueryContext,
        filter: Document,
        options: impl Into<Option<FindOptions>>,
    ) -> Result<CursorOf<D>> {
        let options = options.into();
        let (database, target) = self.bound()?;

        self.guard(ctx, database, &target.name, EXPLAIN_FIND, &filter)
            .await?;

        debug!(collection = %target.name, "guard passed, running find");
        ctx.run("find", async {
            target
                .handle
                .find(filter, options)
                .await
                .map_err(GuardError::Query)
        })
        .await
    }

    /// Guarded find_one, checked with the same `find` explain command.
    pub async fn find_one(
        &self,
        ctx: &QueryContext,
        filter: Document,
        options: impl Into<Option<FindOneOptions>>,
    ) -> Result<Option<ItemOf<D>>> {
        let options = options.into();
        let (database, target) = self.bound()?;

        self.guard(ctx, database, &target.name, EXPLAIN_FIND, &filter)
            .await?;

        debug!(collection = %target.name, "guard passed, running find_one");
        ctx.run("find", async {
            target
                .handle
                .find_one(filter, options)
                .await
                .map_err(GuardError::Query)
        })
        .await
    }

    /// Estimate only: run explain for `filter` without applying the policy.
    pub async fn explain(&self, ctx: &QueryContext, filter: &Document) -> Result<CostEstimate> {
        let (database, target) = self.bound()?;
        self.estimate(ctx, database, &target.name, EXPLAIN_FIND, filter)
            .await
    }

    fn bound(&self) -> Result<(&D, &Target<D::Collection>)> {
        match (&self.database, &self.target) {
            (Some(database), Some(target)) => Ok((database, target)),
            (None, _) => Err(GuardError::Config("no database bound".into())),
            (Some(_), None) => Err(GuardError::Config("no collection bound".into())),
        }
    }

    async fn guard(
        &self,
        ctx: &QueryContext,
        database: &D,
        collection: &str,
        operation: &str,
        filter: &Document,
    ) -> Result<()> {
        let estimate = match self
            .estimate(ctx, database, collection, operation, filter)
            .await
        {
            Ok(estimate) => estimate,
            Err(e) => {
                self.record(collection, operation, "error");
                return Err(e);
            }
        };

        let decision = policy::evaluate(estimate, self.config.threshold);
        self.record(collection, operation, decision.as_str());

        if let PolicyDecision::Reject { examined, threshold } = decision {
            warn!(
                collection,
                operation,
                examined,
                threshold,
                "query rejected: too many documents examined"
            );
        }

        policy::enforce(estimate, self.config.threshold, operation, filter)
    }

    async fn estimate(
        &self,
        ctx: &QueryContext,
        database: &D,
        collection: &str,
        operation: &str,
        filter: &Document,
    ) -> Result<CostEstimate> {
        let command = explain_command(operation, collection, filter);
        let criteria = SelectionCriteria::ReadPreference(ReadPreference::Primary);

        let started = Instant::now();
        let raw = ctx
            .run("explain", async {
                database
                    .run_command(command, criteria)
                    .await
                    .map_err(GuardError::Explain)
            })
            .await?;
        let elapsed = started.elapsed();

        if let Some(metrics) = &self.metrics {
            metrics.record_explain(collection, elapsed);
        }

        let estimate = decode_cost(&raw)?;
        debug!(
            collection,
            operation,
            examined = estimate.documents_examined,
            threshold = self.config.threshold,
            elapsed_us = elapsed.as_micros() as u64,
            "explain estimate"
        );
        Ok(estimate)
    }

    fn record(&self, collection: &str, operation: &str, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(collection, operation, outcome);
        }
    }
}
