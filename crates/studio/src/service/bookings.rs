use model::booking::{self, Booking, BookingDetails};
use model::errors::StudioError;
use model::session::Session;
use mongodb::bson::oid::ObjectId;
use storage::booking::BookingStore;
use storage::trainer::TrainerStore;

#[derive(Clone)]
pub struct Bookings {
    store: BookingStore,
    trainers: TrainerStore,
}

impl Bookings {
    pub(crate) fn new(store: BookingStore, trainers: TrainerStore) -> Self {
        Bookings { store, trainers }
    }

    pub async fn create(
        &self,
        session: &mut Session,
        booking: Booking,
    ) -> Result<ObjectId, StudioError> {
        self.store.insert(session, &booking).await?;
        Ok(booking.id)
    }

    /// Successful bookings of the user, each carrying its trainer document.
    pub async fn for_user(
        &self,
        session: &mut Session,
        email: &str,
    ) -> Result<Vec<BookingDetails>, StudioError> {
        let bookings = self.store.find_by_user(session, email).await?;
        self.resolve(session, bookings).await
    }

    /// Every booking referencing the trainer id string, trainer attached.
    pub async fn for_trainer(
        &self,
        session: &mut Session,
        trainer_id: &str,
    ) -> Result<Vec<BookingDetails>, StudioError> {
        let bookings = self.store.find_by_trainer(session, trainer_id).await?;
        self.resolve(session, bookings).await
    }

    /// Batch-fetches the referenced trainers with one `$in` query and joins
    /// them to the bookings in memory.
    async fn resolve(
        &self,
        session: &mut Session,
        bookings: Vec<Booking>,
    ) -> Result<Vec<BookingDetails>, StudioError> {
        let ids = booking::referenced_trainer_ids(&bookings);
        let trainers = if ids.is_empty() {
            Vec::new()
        } else {
            self.trainers.find_by_ids(session, &ids).await?
        };
        Ok(booking::join_trainers(bookings, trainers))
    }
}
