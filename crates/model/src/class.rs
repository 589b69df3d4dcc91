use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Class {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub details: String,
    /// Drives the featured ranking. Written at creation, read by the
    /// featured query.
    // TODO: bump this from the booking flow once a booking records its class.
    #[serde(default)]
    pub total_bookings: i64,
    #[serde(default)]
    pub version: u64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Class {
    pub fn new(name: String, image: String, details: String) -> Class {
        Class {
            id: ObjectId::new(),
            name,
            image,
            details,
            total_bookings: 0,
            version: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_class_starts_unbooked() {
        let class = Class::new(
            "Yoga".to_owned(),
            "https://img.example.com/yoga.png".to_owned(),
            "Slow flow".to_owned(),
        );
        assert_eq!(class.total_bookings, 0);
        assert_eq!(class.version, 0);
    }
}
