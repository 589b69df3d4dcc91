use std::sync::Arc;

use bson::to_document;
use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::session::Session;
use model::subscriber::Subscriber;
use mongodb::options::{IndexOptions, UpdateOptions};
use mongodb::IndexModel;
use mongodb::{bson::doc, Collection, Database};

const COLLECTION: &str = "subscribers";

#[derive(Clone)]
pub struct SubscriberStore {
    subscribers: Arc<Collection<Subscriber>>,
}

impl SubscriberStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let subscribers = db.collection(COLLECTION);
        subscribers
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;
        Ok(SubscriberStore {
            subscribers: Arc::new(subscribers),
        })
    }

    /// Inserts unless the email is already subscribed. Returns `true` when a
    /// new document was created.
    pub async fn insert(&self, session: &mut Session, subscriber: &Subscriber) -> Result<bool> {
        info!("Inserting subscriber: {:?}", subscriber);
        let result = self
            .subscribers
            .update_one(
                doc! { "email": &subscriber.email },
                doc! { "$setOnInsert": to_document(subscriber)? },
            )
            .session(&mut *session)
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await?;
        Ok(result.upserted_id.is_some())
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<Subscriber>> {
        let mut cursor = self
            .subscribers
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }
}
