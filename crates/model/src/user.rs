use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Member,
    Trainer,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Missing on documents registered before roles existed; back-filled to
    /// `member` when such a user registers again.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub version: u64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: Option<String>, email: String, image: Option<String>) -> User {
        User {
            id: ObjectId::new(),
            name,
            email,
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

    #[test]
    fn test_role_parse_round_trip() {
        for role in [Role::Member, Role::Trainer, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            bson::to_bson(&Role::Member).unwrap(),
            bson::Bson::String("member".to_owned())
        );
        assert_eq!(
            bson::to_bson(&Role::Admin).unwrap(),
            bson::Bson::String("admin".to_owned())
        );
    }

    #[test]
    fn test_new_user_is_member() {
        let user = User::new(Some("Lena".to_owned()), "lena@example.com".to_owned(), None);
        assert_eq!(user.role, Some(Role::Member));
        assert_eq!(user.version, 0);
    }
}
