use crate::database::ReferenceDb;
use crate::models::Event;
use crate::utils::error::{AppError, Result};

use super::AbstractEvents;

#[async_trait]
impl AbstractEvents for ReferenceDb {
    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.lock().await;
        if events.contains_key(&event.id) {
            return Err(AppError::DatabaseError {
                operation: "insert",
                collection: "events",
            });
        }

        if events.values().any(|existing| existing.slug == event.slug) {
            return Err(AppError::Conflict(format!(
                "An event with slug '{}' already exists",
                event.slug
            )));
        }

        events.insert(event.id.clone(), event.clone());
        Ok(())
    }

    /// Fetch an event by its id
    async fn fetch_event(&self, id: &str) -> Result<Event> {
        let events = self.events.lock().await;
        events
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' was not found", id)))
    }

    /// Fetch an event by its slug
    async fn fetch_event_by_slug(&self, slug: &str) -> Result<Event> {
        let events = self.events.lock().await;
        events
            .values()
            .find(|event| event.slug == slug)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Event '{}' was not found", slug)))
    }

    /// Fetch up to `limit` events, newest first
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>> {
        let events = self.events.lock().await;
        let mut list: Vec<Event> = events.values().cloned().collect();
        // Same-instant ties fall back to ObjectId order
        list.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        list.truncate(limit);
        Ok(list)
    }

    /// Check whether an event with this id exists without loading it
    async fn event_exists(&self, id: &str) -> Result<bool> {
        let events = self.events.lock().await;
        Ok(events.contains_key(id))
    }
}
