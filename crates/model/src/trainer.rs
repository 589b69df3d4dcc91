use std::collections::HashMap;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::user::{Role, User};

/// Feedback written on rejection when the reviewer supplies none.
pub const DEFAULT_REJECTION_FEEDBACK: &str =
    "Your application does not meet our current requirements.";

/// Lifecycle discriminator. Applications and active trainers share one
/// collection; this field is the only thing that tells them apart.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainerStatus {
    Pending,
    Approved,
    Rejected,
}

/// A bookable entry in a trainer's availability list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub label: String,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Trainer {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub image: String,
    /// Years of experience.
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub available_days: Vec<String>,
    #[serde(default)]
    pub available_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub socials: HashMap<String, String>,
    pub status: TrainerStatus,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub version: u64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Trainer {
    /// Removes the slot at `index`, returning it, or `None` when the index is
    /// past the end of the list.
    pub fn remove_slot_at(&mut self, index: usize) -> Option<TimeSlot> {
        if index < self.available_slots.len() {
            Some(self.available_slots.remove(index))
        } else {
            None
        }
    }

    /// The user document a demoted trainer turns into.
    pub fn to_member(&self) -> User {
        let image = if self.image.is_empty() {
            None
        } else {
            Some(self.image.clone())
        };
        User {
            id: ObjectId::new(),
            name: Some(self.name.clone()),
            email: self.email.clone(),
            image,
            role: Some(Role::Member),
            version: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trainer_with_slots(slots: Vec<TimeSlot>) -> Trainer {
        Trainer {
            id: ObjectId::new(),
            name: "Sasha".to_owned(),
            email: "sasha@example.com".to_owned(),
            age: 31,
            image: "https://img.example.com/sasha.png".to_owned(),
            experience: 7,
            details: "Strength and conditioning".to_owned(),
            expertise: vec!["crossfit".to_owned()],
            available_days: vec!["Mon".to_owned(), "Wed".to_owned()],
            available_slots: slots,
            socials: HashMap::new(),
            status: TrainerStatus::Approved,
            feedback: None,
            version: 3,
            created_at: Utc::now(),
        }
    }

    fn slot(label: &str) -> TimeSlot {
        TimeSlot {
            label: label.to_owned(),
            time: "06:00 - 08:00".to_owned(),
        }
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            TrainerStatus::Pending,
            TrainerStatus::Approved,
            TrainerStatus::Rejected,
        ] {
            let parsed: TrainerStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!("archived".parse::<TrainerStatus>().is_err());
    }

    #[test]
    fn test_remove_slot_at_keeps_order() {
        let mut trainer =
            trainer_with_slots(vec![slot("morning"), slot("noon"), slot("evening")]);
        let removed = trainer.remove_slot_at(1).unwrap();
        assert_eq!(removed.label, "noon");
        let labels: Vec<_> = trainer
            .available_slots
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, ["morning", "evening"]);
    }

    #[test]
    fn test_remove_slot_past_end() {
        let mut trainer = trainer_with_slots(vec![slot("morning")]);
        assert!(trainer.remove_slot_at(1).is_none());
        assert_eq!(trainer.available_slots.len(), 1);
    }

    #[test]
    fn test_demoted_trainer_becomes_member() {
        let trainer = trainer_with_slots(vec![]);
        let user = trainer.to_member();
        assert_eq!(user.email, trainer.email);
        assert_eq!(user.name.as_deref(), Some("Sasha"));
        assert_eq!(user.role, Some(Role::Member));
        assert_eq!(user.image.as_deref(), Some("https://img.example.com/sasha.png"));
    }

    #[test]
    fn test_demoted_trainer_without_image() {
        let mut trainer = trainer_with_slots(vec![]);
        trainer.image = String::new();
        assert!(trainer.to_member().image.is_none());
    }
}
