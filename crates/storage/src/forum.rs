use std::sync::Arc;

use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::forum::{ForumPost, VoteKind};
use model::session::Session;
use mongodb::IndexModel;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};

const COLLECTION: &str = "forum_posts";

#[derive(Clone)]
pub struct ForumStore {
    posts: Arc<Collection<ForumPost>>,
}

impl ForumStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let posts = db.collection(COLLECTION);
        posts
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "created_at": -1 })
                    .build(),
            )
            .await?;
        Ok(ForumStore {
            posts: Arc::new(posts),
        })
    }

    pub async fn insert(&self, session: &mut Session, post: &ForumPost) -> Result<()> {
        info!("Inserting forum post: {:?}", post);
        self.posts.insert_one(post).session(&mut *session).await?;
        Ok(())
    }

    pub async fn get(&self, session: &mut Session, id: ObjectId) -> Result<Option<ForumPost>> {
        Ok(self
            .posts
            .find_one(doc! { "_id": id })
            .session(&mut *session)
            .await?)
    }

    pub async fn find_page(
        &self,
        session: &mut Session,
        limit: i64,
        offset: u64,
    ) -> Result<Vec<ForumPost>> {
        let mut cursor = self
            .posts
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(offset)
            .limit(limit)
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    pub async fn count(&self, session: &mut Session) -> Result<u64> {
        Ok(self
            .posts
            .count_documents(doc! {})
            .session(&mut *session)
            .await?)
    }

    /// Bumps the counter for `vote`. Returns `false` when the post is gone.
    pub async fn vote(&self, session: &mut Session, id: ObjectId, vote: VoteKind) -> Result<bool> {
        info!("Voting {} on forum post {}", vote, id);
        let result = self
            .posts
            .update_one(
                doc! { "_id": id },
                doc! { "$inc": { vote.counter(): 1i64, "version": 1 } },
            )
            .session(&mut *session)
            .await?;
        Ok(result.matched_count > 0)
    }
}
