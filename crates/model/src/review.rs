use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Hex id of the reviewed trainer. Stored as the string clients send,
    /// never resolved to an ObjectId.
    pub trainer_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        trainer_id: String,
        user_name: Option<String>,
        user_email: Option<String>,
        rating: Option<i32>,
        comment: Option<String>,
    ) -> Review {
        Review {
            id: ObjectId::new(),
            trainer_id,
            user_name,
            user_email,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }
}
