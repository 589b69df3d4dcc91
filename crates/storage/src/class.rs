use std::sync::Arc;

use bson::Document;
use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::class::Class;
use model::session::Session;
use mongodb::IndexModel;
use mongodb::{bson::doc, Collection, Database};

const COLLECTION: &str = "classes";

pub const FEATURED_LIMIT: i64 = 6;

#[derive(Clone)]
pub struct ClassStore {
    classes: Arc<Collection<Class>>,
}

impl ClassStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let classes = db.collection(COLLECTION);
        classes
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "total_bookings": -1 })
                    .build(),
            )
            .await?;
        Ok(ClassStore {
            classes: Arc::new(classes),
        })
    }

    pub async fn insert(&self, session: &mut Session, class: &Class) -> Result<()> {
        info!("Inserting class: {:?}", class);
        self.classes
            .insert_one(class)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    pub async fn find_page(
        &self,
        session: &mut Session,
        search: Option<&str>,
        limit: i64,
        offset: u64,
    ) -> Result<Vec<Class>> {
        let mut cursor = self
            .classes
            .find(search_filter(search))
            .sort(doc! { "created_at": -1 })
            .skip(offset)
            .limit(limit)
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    pub async fn count(&self, session: &mut Session, search: Option<&str>) -> Result<u64> {
        Ok(self
            .classes
            .count_documents(search_filter(search))
            .session(&mut *session)
            .await?)
    }

    pub async fn featured(&self, session: &mut Session) -> Result<Vec<Class>> {
        let mut cursor = self
            .classes
            .find(doc! {})
            .sort(doc! { "total_bookings": -1 })
            .limit(FEATURED_LIMIT)
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }
}

fn search_filter(search: Option<&str>) -> Document {
    match search {
        Some(name) => doc! { "name": { "$regex": name, "$options": "i" } },
        None => doc! {},
    }
}
