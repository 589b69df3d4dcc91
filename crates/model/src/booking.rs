use std::collections::HashMap;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::trainer::Trainer;

/// Bookings are recorded only after the payment went through, so this is the
/// only status a stored document can carry.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Success,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_email: String,
    /// Hex id of the booked trainer, stored as sent by the client.
    pub trainer_id: String,
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub status: BookingStatus,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        user_email: String,
        trainer_id: String,
        slot: Option<String>,
        price: Option<f64>,
    ) -> Booking {
        Booking {
            id: ObjectId::new(),
            user_email,
            trainer_id,
            slot,
            price,
            status: BookingStatus::Success,
            created_at: Utc::now(),
        }
    }
}

/// A booking with the referenced trainer resolved. `trainer` stays `None`
/// when the stored id is malformed or the trainer no longer exists.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub trainer: Option<Trainer>,
}

/// Distinct trainer ids referenced by `bookings`. Ids that do not parse as
/// object ids are skipped; the join leaves those bookings unresolved.
pub fn referenced_trainer_ids(bookings: &[Booking]) -> Vec<ObjectId> {
    let mut seen = Vec::new();
    for booking in bookings {
        if let Ok(id) = ObjectId::parse_str(&booking.trainer_id) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
    }
    seen
}

/// Attaches each booking's trainer, keeping the order of `bookings`.
pub fn join_trainers(bookings: Vec<Booking>, trainers: Vec<Trainer>) -> Vec<BookingDetails> {
    let by_id: HashMap<ObjectId, Trainer> =
        trainers.into_iter().map(|t| (t.id, t)).collect();
    bookings
        .into_iter()
        .map(|booking| {
            let trainer = ObjectId::parse_str(&booking.trainer_id)
                .ok()
                .and_then(|id| by_id.get(&id).cloned());
            BookingDetails { booking, trainer }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::TrainerStatus;

    fn booking(trainer_id: &str) -> Booking {
        Booking::new(
            "member@example.com".to_owned(),
            trainer_id.to_owned(),
            Some("morning".to_owned()),
            Some(40.0),
        )
    }

    fn trainer(id: ObjectId) -> Trainer {
        Trainer {
            id,
            name: "Sasha".to_owned(),
            email: "sasha@example.com".to_owned(),
            age: 31,
            image: String::new(),
            experience: 7,
            details: String::new(),
            expertise: vec![],
            available_days: vec![],
            available_slots: vec![],
            socials: HashMap::new(),
            status: TrainerStatus::Approved,
            feedback: None,
            version: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_booking_is_success() {
        assert_eq!(booking("any").status, BookingStatus::Success);
    }

    #[test]
    fn test_referenced_ids_dedup_and_skip_garbage() {
        let id = ObjectId::new();
        let hex = id.to_hex();
        let bookings = vec![booking(&hex), booking("not-an-id"), booking(&hex)];
        assert_eq!(referenced_trainer_ids(&bookings), vec![id]);
    }

    #[test]
    fn test_join_resolves_by_hex_id() {
        let id = ObjectId::new();
        let details = join_trainers(vec![booking(&id.to_hex())], vec![trainer(id)]);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].trainer.as_ref().unwrap().id, id);
    }

    #[test]
    fn test_join_leaves_missing_trainer_unresolved() {
        let details = join_trainers(
            vec![booking(&ObjectId::new().to_hex()), booking("garbage")],
            vec![],
        );
        assert_eq!(details.len(), 2);
        assert!(details.iter().all(|d| d.trainer.is_none()));
    }

    #[test]
    fn test_join_keeps_booking_order() {
        let first = ObjectId::new();
        let second = ObjectId::new();
        let details = join_trainers(
            vec![booking(&second.to_hex()), booking(&first.to_hex())],
            vec![trainer(first), trainer(second)],
        );
        assert_eq!(details[0].trainer.as_ref().unwrap().id, second);
        assert_eq!(details[1].trainer.as_ref().unwrap().id, first);
    }
}
