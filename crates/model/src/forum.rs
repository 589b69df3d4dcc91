use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::user::Role;

/// Direction of a forum vote as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    /// Field the vote lands in.
    pub fn counter(&self) -> &'static str {
        match self {
            VoteKind::Up => "upvotes",
            VoteKind::Down => "downvotes",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForumPost {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_role: Option<Role>,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub version: u64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ForumPost {
    pub fn new(
        title: String,
        content: String,
        author: Option<String>,
        author_role: Option<Role>,
    ) -> ForumPost {
        ForumPost {
            id: ObjectId::new(),
            title,
            content,
            author,
            author_role,
            upvotes: 0,
            downvotes: 0,
            version: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_parse() {
        assert_eq!("up".parse::<VoteKind>().unwrap(), VoteKind::Up);
        assert_eq!("down".parse::<VoteKind>().unwrap(), VoteKind::Down);
        assert!("sideways".parse::<VoteKind>().is_err());
    }

    #[test]
    fn test_vote_counter_field() {
        assert_eq!(VoteKind::Up.counter(), "upvotes");
        assert_eq!(VoteKind::Down.counter(), "downvotes");
    }

    #[test]
    fn test_new_post_starts_unvoted() {
        let post = ForumPost::new(
            "Stretching".to_owned(),
            "How often?".to_owned(),
            Some("maria".to_owned()),
            Some(Role::Member),
        );
        assert_eq!(post.upvotes, 0);
        assert_eq!(post.downvotes, 0);
    }
}
