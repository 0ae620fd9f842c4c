use crate::models::Booking;
use crate::utils::error::Result;

mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractBookings: Sync + Send {
    /// Insert a new booking into the database
    async fn insert_booking(&self, booking: &Booking) -> Result<()>;

    /// Fetch a booking by its id
    async fn fetch_booking(&self, id: &str) -> Result<Booking>;

    /// Fetch all bookings for an event, oldest first
    async fn fetch_bookings_by_event(&self, event_id: &str) -> Result<Vec<Booking>>;

    /// Count bookings for an event
    async fn count_bookings_by_event(&self, event_id: &str) -> Result<u64>;
}
