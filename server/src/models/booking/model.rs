use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::database::Database;
use crate::models::ValidationError;
use crate::utils::error::Result;
use crate::utils::iso_bson_chrono;

/// Pragmatic `local@domain.tld` shape, not full RFC 5322
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Reservation linking an email address to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    /// Id of the booked event
    pub event_id: String,
    pub email: String,
    #[serde(with = "crate::utils::iso_bson_chrono")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::iso_bson_chrono")]
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted when creating a booking.
///
/// Missing or non-string fields arrive as empty strings and fail validation
/// like any other malformed value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub event_id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub email: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl NewBooking {
    /// Checks that need no database access: email shape and id syntax.
    fn validate_fields(&self) -> Result<(String, String), ValidationError> {
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        let event_id = self.event_id.trim();
        if ObjectId::parse_str(event_id).is_err() {
            return Err(ValidationError::InvalidEventId);
        }

        Ok((event_id.to_owned(), email.to_owned()))
    }
}

impl Booking {
    /// Validate and persist a booking.
    ///
    /// The referenced event is looked up exactly once, right before the
    /// insert. Nothing ties the two operations together, so an event removed
    /// in between still leaves the booking in place.
    pub async fn create(db: &Database, data: NewBooking) -> Result<Booking> {
        let (event_id, email) = data.validate_fields()?;

        if !db.event_exists(&event_id).await? {
            debug!(event_id = %event_id, "Booking references a missing event");
            return Err(ValidationError::EventNotFound.into());
        }

        let now = iso_bson_chrono::now();
        let booking = Booking {
            id: ObjectId::new().to_hex(),
            event_id,
            email,
            created_at: now,
            updated_at: now,
        };

        db.insert_booking(&booking).await?;
        info!(booking_id = %booking.id, event_id = %booking.event_id, "Booking created");
        Ok(booking)
    }
}
