use std::sync::Arc;

use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::session::Session;
use model::testimonial::Testimonial;
use mongodb::{bson::doc, Collection, Database};

const COLLECTION: &str = "testimonials";

#[derive(Clone)]
pub struct TestimonialStore {
    testimonials: Arc<Collection<Testimonial>>,
}

impl TestimonialStore {
    pub(crate) fn new(db: &Database) -> Self {
        TestimonialStore {
            testimonials: Arc::new(db.collection(COLLECTION)),
        }
    }

    pub async fn insert(&self, session: &mut Session, testimonial: &Testimonial) -> Result<()> {
        info!("Inserting testimonial: {:?}", testimonial);
        self.testimonials
            .insert_one(testimonial)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<Testimonial>> {
        let mut cursor = self
            .testimonials
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }
}
