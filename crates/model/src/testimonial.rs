use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub review: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn new(name: String, review: String, role: Option<String>) -> Testimonial {
        Testimonial {
            id: ObjectId::new(),
            name,
            review,
            role,
            created_at: Utc::now(),
        }
    }
}
