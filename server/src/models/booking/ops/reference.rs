use crate::database::ReferenceDb;
use crate::models::Booking;
use crate::utils::error::{AppError, Result};

use super::AbstractBookings;

#[async_trait]
impl AbstractBookings for ReferenceDb {
    /// Insert a new booking into the database
    async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        let mut bookings = self.bookings.lock().await;
        if bookings.contains_key(&booking.id) {
            Err(AppError::DatabaseError {
                operation: "insert",
                collection: "bookings",
            })
        } else {
            bookings.insert(booking.id.clone(), booking.clone());
            Ok(())
        }
    }

    /// Fetch a booking by its id
    async fn fetch_booking(&self, id: &str) -> Result<Booking> {
        let bookings = self.bookings.lock().await;
        bookings
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Booking '{}' was not found", id)))
    }

    /// Fetch all bookings for an event, oldest first
    async fn fetch_bookings_by_event(&self, event_id: &str) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().await;
        let mut list: Vec<Booking> = bookings
            .values()
            .filter(|booking| booking.event_id == event_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    /// Count bookings for an event
    async fn count_bookings_by_event(&self, event_id: &str) -> Result<u64> {
        let bookings = self.bookings.lock().await;
        Ok(bookings
            .values()
            .filter(|booking| booking.event_id == event_id)
            .count() as u64)
    }
}
