use std::sync::Arc;

use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::booking::{Booking, BookingStatus};
use model::session::Session;
use mongodb::IndexModel;
use mongodb::{bson::doc, Collection, Database};

const COLLECTION: &str = "bookings";

#[derive(Clone)]
pub struct BookingStore {
    bookings: Arc<Collection<Booking>>,
}

impl BookingStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let bookings = db.collection(COLLECTION);
        bookings
            .create_index(IndexModel::builder().keys(doc! { "user_email": 1 }).build())
            .await?;
        bookings
            .create_index(IndexModel::builder().keys(doc! { "trainer_id": 1 }).build())
            .await?;
        Ok(BookingStore {
            bookings: Arc::new(bookings),
        })
    }

    pub async fn insert(&self, session: &mut Session, booking: &Booking) -> Result<()> {
        info!("Inserting booking: {:?}", booking);
        self.bookings
            .insert_one(booking)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    /// Successful bookings made by the user, newest first.
    pub async fn find_by_user(&self, session: &mut Session, email: &str) -> Result<Vec<Booking>> {
        let mut cursor = self
            .bookings
            .find(doc! {
                "user_email": email,
                "status": BookingStatus::Success.to_string(),
            })
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    /// Every booking referencing the trainer id string, newest first.
    pub async fn find_by_trainer(
        &self,
        session: &mut Session,
        trainer_id: &str,
    ) -> Result<Vec<Booking>> {
        let mut cursor = self
            .bookings
            .find(doc! { "trainer_id": trainer_id })
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }
}
