//! Driver seam.
//!
//! The guard only needs three things from a database client: resolve a
//! collection by name, run an administrative command with a read preference,
//! and run a filtered read. These traits capture exactly that, and are
//! implemented for the `mongodb` crate below.

use async_trait::async_trait;
use bson::Document;
use mongodb::options::{FindOneOptions, FindOptions, SelectionCriteria};
use serde::de::DeserializeOwned;

use mongoguard_core::error::BoxError;

/// Database handle the guard runs explain against.
#[async_trait]
pub trait GuardDatabase: Clone + Send + Sync + 'static {
    type Collection: GuardCollection;

    /// Resolve a collection handle by name.
    fn collection(&self, name: &str) -> Self::Collection;

    /// Run a command and decode the reply into a generic document.
    async fn run_command(
        &self,
        command: Document,
        criteria: SelectionCriteria,
    ) -> Result<Document, BoxError>;
}

/// Collection handle the guarded read is delegated to.
#[async_trait]
pub trait GuardCollection: Clone + Send + Sync + 'static {
    /// Lazy cursor over matching documents.
    type Cursor: Send;
    /// Decoded document type.
    type Item: Send;

    async fn find(
        &self,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Self::Cursor, BoxError>;

    async fn find_one(
        &self,
        filter: Document,
        options: Option<FindOneOptions>,
    ) -> Result<Option<Self::Item>, BoxError>;
}

#[async_trait]
impl GuardDatabase for mongodb::Database {
    type Collection = mongodb::Collection<Document>;

    fn collection(&self, name: &str) -> Self::Collection {
        mongodb::Database::collection::<Document>(self, name)
    }

    async fn run_command(
        &self,
        command: Document,
        criteria: SelectionCriteria,
    ) -> Result<Document, BoxError> {
        let reply = mongodb::Database::run_command(self, command)
            .selection_criteria(criteria)
            .await?;
        Ok(reply)
    }
}

#[async_trait]
impl<T> GuardCollection for mongodb::Collection<T>
where
    T: DeserializeOwned + Send + Sync + Unpin + 'static,
{
    type Cursor = mongodb::Cursor<T>;
    type Item = T;

    async fn find(
        &self,
        filter: Document,
        options: Option<FindOptions>,
    ) -> Result<Self::Cursor, BoxError> {
        let cursor = mongodb::Collection::find(self, filter)
            .with_options(options)
            .await?;
        Ok(cursor)
    }

    async fn find_one(
        &self,
        filter: Document,
        options: Option<FindOneOptions>,
    ) -> Result<Option<Self::Item>, BoxError> {
        let found = mongodb::Collection::find_one(self, filter)
            .with_options(options)
            .await?;
        Ok(found)
    }
}
