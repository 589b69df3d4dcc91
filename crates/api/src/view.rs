use std::collections::HashMap;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use model::booking::{BookingDetails, BookingStatus};
use model::class::Class;
use model::forum::ForumPost;
use model::review::Review;
use model::subscriber::Subscriber;
use model::testimonial::Testimonial;
use model::trainer::{TimeSlot, Trainer, TrainerStatus};
use model::user::{Role, User};
use serde::Serialize;

/// Response body of every create route except user registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub inserted_id: ObjectId,
}

impl InsertedView {
    pub fn new(inserted_id: ObjectId) -> Self {
        InsertedView { inserted_id }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub image: String,
    pub experience: u32,
    pub details: String,
    pub expertise: Vec<String>,
    pub available_days: Vec<String>,
    pub available_slots: Vec<TimeSlot>,
    pub socials: HashMap<String, String>,
    pub status: TrainerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Trainer> for TrainerView {
    fn from(trainer: Trainer) -> Self {
        TrainerView {
            id: trainer.id,
            name: trainer.name,
            email: trainer.email,
            age: trainer.age,
            image: trainer.image,
            experience: trainer.experience,
            details: trainer.details,
            expertise: trainer.expertise,
            available_days: trainer.available_days,
            available_slots: trainer.available_slots,
            socials: trainer.socials,
            status: trainer.status,
            feedback: trainer.feedback,
            created_at: trainer.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub image: String,
    pub details: String,
    pub total_bookings: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Class> for ClassView {
    fn from(class: Class) -> Self {
        ClassView {
            id: class.id,
            name: class.name,
            image: class.image,
            details: class.details,
            total_bookings: class.total_bookings,
            created_at: class.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPostView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub author_role: Option<Role>,
    pub upvotes: i64,
    pub downvotes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ForumPost> for ForumPostView {
    fn from(post: ForumPost) -> Self {
        ForumPostView {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            author_role: post.author_role,
            upvotes: post.upvotes,
            downvotes: post.downvotes,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub trainer_id: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        ReviewView {
            id: review.id,
            trainer_id: review.trainer_id,
            user_name: review.user_name,
            user_email: review.user_email,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// A booking joined with its trainer; `trainer` is `null` when the stored
/// reference does not resolve.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub user_email: String,
    pub trainer_id: String,
    pub slot: Option<String>,
    pub price: Option<f64>,
    pub status: BookingStatus,
    pub trainer: Option<TrainerView>,
    pub created_at: DateTime<Utc>,
}

impl From<BookingDetails> for BookingView {
    fn from(details: BookingDetails) -> Self {
        let booking = details.booking;
        BookingView {
            id: booking.id,
            user_email: booking.user_email,
            trainer_id: booking.trainer_id,
            slot: booking.slot,
            price: booking.price,
            status: booking.status,
            trainer: details.trainer.map(TrainerView::from),
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub review: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for TestimonialView {
    fn from(testimonial: Testimonial) -> Self {
        TestimonialView {
            id: testimonial.id,
            name: testimonial.name,
            review: testimonial.review,
            role: testimonial.role,
            created_at: testimonial.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberView {
    #[serde(serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Subscriber> for SubscriberView {
    fn from(subscriber: Subscriber) -> Self {
        SubscriberView {
            id: subscriber.id,
            name: subscriber.name,
            email: subscriber.email,
            created_at: subscriber.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_view_serializes_hex_id_and_camel_case() {
        let user = User::new(
            Some("Maria".to_owned()),
            "maria@example.com".to_owned(),
            None,
        );
        let id = user.id;
        let value = serde_json::to_value(UserView::from(user)).unwrap();
        assert_eq!(value["id"], serde_json::json!(id.to_hex()));
        assert_eq!(value["role"], serde_json::json!("member"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_inserted_view_shape() {
        let id = ObjectId::new();
        let value = serde_json::to_value(InsertedView::new(id)).unwrap();
        assert_eq!(value, serde_json::json!({ "insertedId": id.to_hex() }));
    }

    #[test]
    fn test_booking_view_null_trainer() {
        let booking = model::booking::Booking::new(
            "member@example.com".to_owned(),
            "garbage".to_owned(),
            None,
            None,
        );
        let details = BookingDetails {
            booking,
            trainer: None,
        };
        let value = serde_json::to_value(BookingView::from(details)).unwrap();
        assert_eq!(value["trainer"], serde_json::Value::Null);
        assert_eq!(value["status"], serde_json::json!("success"));
    }
}
