use model::errors::StudioError;
use model::forum::{ForumPost, VoteKind};
use model::session::Session;
use mongodb::bson::oid::ObjectId;
use storage::forum::ForumStore;

#[derive(Clone)]
pub struct Forum {
    store: ForumStore,
}

impl Forum {
    pub(crate) fn new(store: ForumStore) -> Self {
        Forum { store }
    }

    pub async fn create(&self, session: &mut Session, post: ForumPost) -> Result<ObjectId, StudioError> {
        self.store.insert(session, &post).await?;
        Ok(post.id)
    }

    pub async fn list(
        &self,
        session: &mut Session,
        limit: i64,
        offset: u64,
    ) -> Result<(Vec<ForumPost>, u64), StudioError> {
        let posts = self.store.find_page(session, limit, offset).await?;
        let total = self.store.count(session).await?;
        Ok((posts, total))
    }

    /// Counts the vote and returns the post as it stands afterwards. Votes
    /// are anonymous; nothing stops the same caller voting twice.
    pub async fn vote(
        &self,
        session: &mut Session,
        id: ObjectId,
        vote: VoteKind,
    ) -> Result<ForumPost, StudioError> {
        if !self.store.vote(session, id, vote).await? {
            return Err(StudioError::PostNotFound(id));
        }
        self.store
            .get(session, id)
            .await?
            .ok_or(StudioError::PostNotFound(id))
    }
}
