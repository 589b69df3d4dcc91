use model::errors::StudioError;
use model::session::Session;
use model::testimonial::Testimonial;
use mongodb::bson::oid::ObjectId;
use storage::testimonial::TestimonialStore;

#[derive(Clone)]
pub struct Testimonials {
    store: TestimonialStore,
}

impl Testimonials {
    pub(crate) fn new(store: TestimonialStore) -> Self {
        Testimonials { store }
    }

    pub async fn create(
        &self,
        session: &mut Session,
        testimonial: Testimonial,
    ) -> Result<ObjectId, StudioError> {
        self.store.insert(session, &testimonial).await?;
        Ok(testimonial.id)
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<Testimonial>, StudioError> {
        Ok(self.store.all(session).await?)
    }
}
