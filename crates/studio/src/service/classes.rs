use model::class::Class;
use model::errors::StudioError;
use model::session::Session;
use mongodb::bson::oid::ObjectId;
use storage::class::ClassStore;

#[derive(Clone)]
pub struct Classes {
    store: ClassStore,
}

impl Classes {
    pub(crate) fn new(store: ClassStore) -> Self {
        Classes { store }
    }

    pub async fn create(&self, session: &mut Session, class: Class) -> Result<ObjectId, StudioError> {
        self.store.insert(session, &class).await?;
        Ok(class.id)
    }

    /// One page of classes plus the total match count for the same filter.
    pub async fn list(
        &self,
        session: &mut Session,
        search: Option<&str>,
        limit: i64,
        offset: u64,
    ) -> Result<(Vec<Class>, u64), StudioError> {
        let classes = self.store.find_page(session, search, limit, offset).await?;
        let total = self.store.count(session, search).await?;
        Ok((classes, total))
    }

    pub async fn featured(&self, session: &mut Session) -> Result<Vec<Class>, StudioError> {
        Ok(self.store.featured(session).await?)
    }
}
