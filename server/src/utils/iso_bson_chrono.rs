//! Timestamps stored as BSON dates and rendered as ISO 8601 in JSON.
//!
//! Use with `#[serde(with = "crate::utils::iso_bson_chrono")]`.

use std::fmt;

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, SubsecRound, Utc};
use serde::de::{Error as DeError, MapAccess, Visitor};
use serde::{Deserializer, Serialize, Serializer};

/// Current time at the millisecond precision a BSON date can hold
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if serializer.is_human_readable() {
        value.serialize(serializer)
    } else {
        // MongoDB writes go through the raw BSON serializer
        chrono_datetime_as_bson_datetime::serialize(value, serializer)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DateTimeFallbackVisitor)
}

struct DateTimeFallbackVisitor;

impl<'de> Visitor<'de> for DateTimeFallbackVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an ISO 8601 string or a BSON date")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        value.parse::<DateTime<Utc>>().map_err(DeError::custom)
    }

    fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        // `{ "$date": ... }` as handed out by the BSON deserializers
        chrono_datetime_as_bson_datetime::deserialize(
            serde::de::value::MapAccessDeserializer::new(map),
        )
    }
}
