use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::Database;
use crate::models::validation::{required, ValidationError};
use crate::utils::error::Result;
use crate::utils::iso_bson_chrono;

/// Maximum length of an event title
pub const MAX_TITLE_LEN: usize = 100;

/// How attendees take part in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
    Hybrid,
}

impl EventMode {
    pub fn label(&self) -> &'static str {
        match self {
            EventMode::Online => "Online",
            EventMode::Offline => "In person",
            EventMode::Hybrid => "Hybrid",
        }
    }
}

/// Listed hackathon, meetup or conference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    /// Poster image shown on the event card
    pub image: String,
    pub location: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24-hour clock
    pub time: String,
    pub mode: EventMode,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "crate::utils::iso_bson_chrono")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::iso_bson_chrono")]
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted when creating an event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub image: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub mode: EventMode,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Turn a title into a URL slug.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and strips dashes from both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn normalise_date(value: &str) -> Result<String, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| ValidationError::InvalidFormat {
            field: "date",
            reason: "expected YYYY-MM-DD",
        })
}

fn normalise_time(value: &str) -> Result<String, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|time| time.format("%H:%M").to_string())
        .map_err(|_| ValidationError::InvalidFormat {
            field: "time",
            reason: "expected HH:MM",
        })
}

impl NewEvent {
    /// Check and normalise the payload into a storable event.
    pub fn validate(self, now: DateTime<Utc>) -> Result<Event, ValidationError> {
        let title = required("title", &self.title)?;
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "title",
                reason: "must contain at least one letter or digit",
            });
        }

        Ok(Event {
            id: ObjectId::new().to_hex(),
            slug,
            title,
            description: required("description", &self.description)?,
            image: required("image", &self.image)?,
            location: required("location", &self.location)?,
            date: normalise_date(&self.date)?,
            time: normalise_time(&self.time)?,
            mode: self.mode,
            tags: self
                .tags
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl Event {
    /// Validate and persist a new event
    pub async fn create(db: &Database, data: NewEvent) -> Result<Event> {
        let event = data.validate(iso_bson_chrono::now())?;
        db.insert_event(&event).await?;
        info!(event_id = %event.id, slug = %event.slug, "Event created");
        Ok(event)
    }

    /// Path of the event's detail page
    pub fn href(&self) -> String {
        format!("/events/{}", self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseInfo;
    use crate::models::fixtures::new_event as sample;
    use crate::utils::error::AppError;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("RustConf 2026"), "rustconf-2026");
        assert_eq!(slugify("  Hack -- the  Planet!! "), "hack-the-planet");
        assert_eq!(slugify("C++ & Rust: Interop"), "c-rust-interop");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn validate_normalises_fields() {
        let event = sample("  Rust Berlin Meetup ").validate(Utc::now()).unwrap();
        assert_eq!(event.title, "Rust Berlin Meetup");
        assert_eq!(event.slug, "rust-berlin-meetup");
        assert_eq!(event.tags, vec!["rust", "web"]);
        assert_eq!(event.created_at, event.updated_at);
        assert!(ObjectId::parse_str(&event.id).is_ok());
        assert_eq!(event.href(), "/events/rust-berlin-meetup");
    }

    #[test]
    fn validate_rejects_bad_input() {
        let mut data = sample("Meetup");
        data.date = "20/11/2026".into();
        assert!(matches!(
            data.validate(Utc::now()),
            Err(ValidationError::InvalidFormat { field: "date", .. })
        ));

        let mut data = sample("Meetup");
        data.time = "25:00".into();
        assert!(matches!(
            data.validate(Utc::now()),
            Err(ValidationError::InvalidFormat { field: "time", .. })
        ));

        let data = sample(&"x".repeat(MAX_TITLE_LEN + 1));
        assert_eq!(
            data.validate(Utc::now()),
            Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN
            })
        );

        let mut data = sample("Meetup");
        data.location = " ".into();
        assert_eq!(
            data.validate(Utc::now()),
            Err(ValidationError::Empty { field: "location" })
        );
    }

    #[tokio::test]
    async fn fetch_events_honours_limit() {
        let db = DatabaseInfo::Reference.connect().await.unwrap();
        for title in ["First Meetup", "Second Meetup", "Third Meetup"] {
            Event::create(&db, sample(title)).await.unwrap();
        }

        assert!(db.fetch_events(0).await.unwrap().is_empty());
        assert_eq!(db.fetch_events(2).await.unwrap().len(), 2);
        assert_eq!(db.fetch_events(10).await.unwrap().len(), 3);
    }

    #[test]
    fn timestamps_are_stored_as_bson_dates() {
        let event = sample("Rust Meetup").validate(iso_bson_chrono::now()).unwrap();
        let raw = mongodb::bson::to_raw_document_buf(&event).unwrap();

        for field in ["createdAt", "updatedAt"] {
            assert!(matches!(
                raw.get(field).unwrap(),
                Some(mongodb::bson::RawBsonRef::DateTime(_))
            ));
        }
        assert!(matches!(
            raw.get("date").unwrap(),
            Some(mongodb::bson::RawBsonRef::String("2026-11-20"))
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_slug() {
        let db = DatabaseInfo::Reference.connect().await.unwrap();
        Event::create(&db, sample("Rust Meetup")).await.unwrap();

        let err = Event::create(&db, sample("rust   meetup!")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
