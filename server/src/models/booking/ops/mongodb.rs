use ::mongodb::bson::doc;

use crate::database::{database_error, MongoDb};
use crate::models::Booking;
use crate::utils::error::{AppError, Result};

use super::AbstractBookings;

pub(crate) static COL: &str = "bookings";

#[async_trait]
impl AbstractBookings for MongoDb {
    /// Insert a new booking into the database
    async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        self.col::<Booking>(COL)
            .insert_one(booking)
            .await
            .map(|_| ())
            .map_err(database_error("insert_one", COL))
    }

    /// Fetch a booking by its id
    async fn fetch_booking(&self, id: &str) -> Result<Booking> {
        self.col::<Booking>(COL)
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error("find_one", COL))?
            .ok_or_else(|| AppError::NotFound(format!("Booking '{}' was not found", id)))
    }

    /// Fetch all bookings for an event, oldest first
    async fn fetch_bookings_by_event(&self, event_id: &str) -> Result<Vec<Booking>> {
        self.find_sorted(COL, doc! { "eventId": event_id }, doc! { "_id": 1 }, 0)
            .await
            .map_err(database_error("find", COL))
    }

    /// Count bookings for an event
    async fn count_bookings_by_event(&self, event_id: &str) -> Result<u64> {
        self.col::<Booking>(COL)
            .count_documents(doc! { "eventId": event_id })
            .await
            .map_err(database_error("count_documents", COL))
    }
}
