use std::future::Future;

use once_cell::sync::Lazy;
use tokio::sync::OnceCell;
use tracing::debug;

use super::{Database, DatabaseError, DatabaseInfo};

/// Process-wide connection, established on first use
static CONNECTION: Lazy<ConnectionCache> = Lazy::new(ConnectionCache::new);

/// Memoized database handle.
///
/// The first caller starts connecting; callers arriving while that attempt is
/// in flight wait on it instead of opening their own. A failed attempt leaves
/// the cache empty so the next caller tries again.
#[derive(Default)]
pub struct ConnectionCache {
    cell: OnceCell<Database>,
}

impl ConnectionCache {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached handle, running `connect` only if none exists yet
    pub async fn get_or_connect<F, Fut>(&self, connect: F) -> Result<Database, DatabaseError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Database, DatabaseError>>,
    {
        if let Some(db) = self.cell.get() {
            debug!("Reusing cached database connection");
            return Ok(db.clone());
        }

        self.cell.get_or_try_init(connect).await.cloned()
    }

    /// Handle if a connection has already been established
    pub fn get(&self) -> Option<&Database> {
        self.cell.get()
    }
}

/// Connect using `info`, or reuse the connection made by an earlier call
pub async fn connect_to_database(info: DatabaseInfo) -> Result<Database, DatabaseError> {
    CONNECTION.get_or_connect(|| info.connect()).await
}
