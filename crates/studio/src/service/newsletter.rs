use model::errors::StudioError;
use model::session::Session;
use model::subscriber::Subscriber;
use storage::subscriber::SubscriberStore;

#[derive(Clone)]
pub struct Newsletter {
    store: SubscriberStore,
}

impl Newsletter {
    pub(crate) fn new(store: SubscriberStore) -> Self {
        Newsletter { store }
    }

    /// Subscribes the email. The store insert is an upsert keyed on email;
    /// a repeat subscription reports a duplicate.
    pub async fn subscribe(
        &self,
        session: &mut Session,
        subscriber: Subscriber,
    ) -> Result<Subscriber, StudioError> {
        if !self.store.insert(session, &subscriber).await? {
            return Err(StudioError::AlreadySubscribed(subscriber.email));
        }
        Ok(subscriber)
    }

    pub async fn subscribers(&self, session: &mut Session) -> Result<Vec<Subscriber>, StudioError> {
        Ok(self.store.all(session).await?)
    }
}
