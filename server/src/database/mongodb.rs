use std::ops::Deref;

use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, Result, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::error;

use super::DatabaseError;
use crate::utils::error::AppError;

/// MongoDB server error code for unique index violations
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation
#[derive(Clone)]
pub struct MongoDb(pub ::mongodb::Client, pub String);

impl Deref for MongoDb {
    type Target = mongodb::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MongoDb {
    /// Get the application database
    pub fn db(&self) -> mongodb::Database {
        self.database(&self.1)
    }

    /// Get a collection by its name
    pub fn col<T: Send + Sync>(&self, collection: &str) -> mongodb::Collection<T> {
        self.db().collection(collection)
    }

    /// Find documents matching `filter` in `sort` order.
    ///
    /// A `limit` of 0 returns every match.
    pub async fn find_sorted<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        collection: &'static str,
        filter: Document,
        sort: Document,
        limit: i64,
    ) -> Result<Vec<T>> {
        self.col::<T>(collection)
            .find(filter)
            .sort(sort)
            .limit(limit)
            .await?
            .try_collect()
            .await
    }

    /// Ensure the indexes both collections rely on
    pub async fn sync_indexes(&self) -> std::result::Result<(), DatabaseError> {
        let unique_slug = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.col::<Document>("events")
            .create_index(unique_slug)
            .await
            .map_err(|source| DatabaseError::Index {
                collection: "events",
                source,
            })?;

        let by_event = IndexModel::builder().keys(doc! { "eventId": 1 }).build();

        self.col::<Document>("bookings")
            .create_index(by_event)
            .await
            .map_err(|source| DatabaseError::Index {
                collection: "bookings",
                source,
            })?;

        Ok(())
    }
}

/// Just a string ID struct
#[derive(Deserialize)]
pub struct DocumentId {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Log a driver error and replace it with an opaque [`AppError`]
pub fn database_error(
    operation: &'static str,
    collection: &'static str,
) -> impl FnOnce(mongodb::error::Error) -> AppError {
    move |err| {
        error!(operation, collection, error = %err, "MongoDB operation failed");
        AppError::DatabaseError {
            operation,
            collection,
        }
    }
}

pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}
