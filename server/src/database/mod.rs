mod connection;
mod mongodb;
mod reference;

pub use self::connection::*;
pub use self::mongodb::*;
pub use self::reference::*;

use ::mongodb::bson::doc;
use thiserror::Error;
use tracing::info;

use crate::models::{AbstractBookings, AbstractEvents};

/// Failure to establish a database handle
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to MongoDB: {0}")]
    Connect(#[source] ::mongodb::error::Error),

    #[error("failed to create indexes on {collection}: {source}")]
    Index {
        collection: &'static str,
        #[source]
        source: ::mongodb::error::Error,
    },
}

/// Database information to use to create a client
#[derive(Clone)]
pub enum DatabaseInfo {
    /// Use the in-memory reference database
    Reference,
    /// Connect to MongoDB
    MongoDb { uri: String, database_name: String },
}

/// Database
#[derive(Clone)]
pub enum Database {
    /// In-memory database
    Reference(ReferenceDb),
    /// MongoDB database
    MongoDb(MongoDb),
}

impl DatabaseInfo {
    /// Create a database client from the given database information
    pub async fn connect(self) -> Result<Database, DatabaseError> {
        match self {
            DatabaseInfo::Reference => {
                info!("Using in-memory reference database");
                Ok(Database::Reference(Default::default()))
            }
            DatabaseInfo::MongoDb { uri, database_name } => {
                let client = ::mongodb::Client::with_uri_str(&uri)
                    .await
                    .map_err(DatabaseError::Connect)?;

                // The driver connects lazily; ping so a bad URI fails here
                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 })
                    .await
                    .map_err(DatabaseError::Connect)?;

                let db = MongoDb(client, database_name);
                db.sync_indexes().await?;

                info!(database = %db.1, "Connected to MongoDB");
                Ok(Database::MongoDb(db))
            }
        }
    }
}

impl std::fmt::Debug for DatabaseInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseInfo::Reference => f.write_str("Reference"),
            // The URI may carry credentials
            DatabaseInfo::MongoDb { database_name, .. } => f
                .debug_struct("MongoDb")
                .field("database_name", database_name)
                .finish_non_exhaustive(),
        }
    }
}

pub trait AbstractDatabase: Sync + Send + AbstractEvents + AbstractBookings {}

impl AbstractDatabase for ReferenceDb {}
impl AbstractDatabase for MongoDb {}

impl std::ops::Deref for Database {
    type Target = dyn AbstractDatabase;

    fn deref(&self) -> &Self::Target {
        match &self {
            Database::Reference(dummy) => dummy,
            Database::MongoDb(mongo) => mongo,
        }
    }
}
