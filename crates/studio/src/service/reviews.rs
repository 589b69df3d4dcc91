use model::errors::StudioError;
use model::review::Review;
use model::session::Session;
use mongodb::bson::oid::ObjectId;
use storage::review::ReviewStore;

#[derive(Clone)]
pub struct Reviews {
    store: ReviewStore,
}

impl Reviews {
    pub(crate) fn new(store: ReviewStore) -> Self {
        Reviews { store }
    }

    pub async fn create(&self, session: &mut Session, review: Review) -> Result<ObjectId, StudioError> {
        self.store.insert(session, &review).await?;
        Ok(review.id)
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<Review>, StudioError> {
        Ok(self.store.all(session).await?)
    }

    pub async fn for_trainer(
        &self,
        session: &mut Session,
        trainer_id: &str,
    ) -> Result<Vec<Review>, StudioError> {
        Ok(self.store.find_by_trainer(session, trainer_id).await?)
    }
}
