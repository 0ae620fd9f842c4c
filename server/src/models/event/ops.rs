use crate::models::Event;
use crate::utils::error::Result;

mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractEvents: Sync + Send {
    /// Insert a new event into the database
    async fn insert_event(&self, event: &Event) -> Result<()>;

    /// Fetch an event by its id
    async fn fetch_event(&self, id: &str) -> Result<Event>;

    /// Fetch an event by its slug
    async fn fetch_event_by_slug(&self, slug: &str) -> Result<Event>;

    /// Fetch up to `limit` events, newest first; a `limit` of 0 yields none
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>>;

    /// Check whether an event with this id exists without loading it
    async fn event_exists(&self, id: &str) -> Result<bool>;
}
