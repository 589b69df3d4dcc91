use std::sync::Arc;

use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::review::Review;
use model::session::Session;
use mongodb::IndexModel;
use mongodb::{bson::doc, Collection, Database};

const COLLECTION: &str = "reviews";

#[derive(Clone)]
pub struct ReviewStore {
    reviews: Arc<Collection<Review>>,
}

impl ReviewStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let reviews = db.collection(COLLECTION);
        reviews
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "trainer_id": 1 })
                    .build(),
            )
            .await?;
        Ok(ReviewStore {
            reviews: Arc::new(reviews),
        })
    }

    pub async fn insert(&self, session: &mut Session, review: &Review) -> Result<()> {
        info!("Inserting review: {:?}", review);
        self.reviews
            .insert_one(review)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<Review>> {
        let mut cursor = self
            .reviews
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    /// Reviews referencing the given trainer id string. The id is matched
    /// verbatim, the way it was stored.
    pub async fn find_by_trainer(
        &self,
        session: &mut Session,
        trainer_id: &str,
    ) -> Result<Vec<Review>> {
        let mut cursor = self
            .reviews
            .find(doc! { "trainer_id": trainer_id })
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }
}
