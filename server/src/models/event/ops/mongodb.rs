use ::mongodb::bson::doc;

use crate::database::{database_error, is_duplicate_key, DocumentId, MongoDb};
use crate::models::Event;
use crate::utils::error::{AppError, Result};

use super::AbstractEvents;

pub(crate) static COL: &str = "events";

#[async_trait]
impl AbstractEvents for MongoDb {
    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()> {
        match self.col::<Event>(COL).insert_one(event).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(AppError::Conflict(format!(
                "An event with slug '{}' already exists",
                event.slug
            ))),
            Err(err) => Err(database_error("insert_one", COL)(err)),
        }
    }

    /// Fetch an event by its id
    async fn fetch_event(&self, id: &str) -> Result<Event> {
        self.col::<Event>(COL)
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error("find_one", COL))?
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' was not found", id)))
    }

    /// Fetch an event by its slug
    async fn fetch_event_by_slug(&self, slug: &str) -> Result<Event> {
        self.col::<Event>(COL)
            .find_one(doc! { "slug": slug })
            .await
            .map_err(database_error("find_one", COL))?
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' was not found", slug)))
    }

    /// Fetch up to `limit` events, newest first
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>> {
        // The driver reads a zero limit as "no limit"
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.find_sorted(COL, doc! {}, doc! { "_id": -1 }, limit as i64)
            .await
            .map_err(database_error("find", COL))
    }

    /// Check whether an event with this id exists without loading it
    async fn event_exists(&self, id: &str) -> Result<bool> {
        self.col::<DocumentId>(COL)
            .find_one(doc! { "_id": id })
            .projection(doc! { "_id": 1 })
            .await
            .map(|found| found.is_some())
            .map_err(database_error("find_one", COL))
    }
}
