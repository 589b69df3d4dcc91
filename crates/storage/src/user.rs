use std::sync::Arc;

use bson::to_document;
use eyre::{Error, Result};
use futures_util::stream::TryStreamExt;
use log::info;
use model::session::Session;
use model::user::{Role, User};
use mongodb::options::UpdateOptions;
use mongodb::IndexModel;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserStore {
    users: Arc<Collection<User>>,
}

impl UserStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let users = db.collection(COLLECTION);
        users
            .create_index(IndexModel::builder().keys(doc! { "email": 1 }).build())
            .await?;
        Ok(UserStore {
            users: Arc::new(users),
        })
    }

    pub async fn get(&self, session: &mut Session, id: ObjectId) -> Result<Option<User>> {
        Ok(self
            .users
            .find_one(doc! { "_id": id })
            .session(&mut *session)
            .await?)
    }

    pub async fn find_by_email(&self, session: &mut Session, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .find_one(doc! { "email": email })
            .session(&mut *session)
            .await?)
    }

    /// Inserts the user unless a document with the same email already exists.
    /// Returns `true` when a new document was created.
    pub async fn insert(&self, session: &mut Session, user: &User) -> Result<bool, Error> {
        info!("Inserting user: {:?}", user);
        let result = self
            .users
            .update_one(
                doc! { "email": &user.email },
                doc! { "$setOnInsert": to_document(user)? },
            )
            .session(&mut *session)
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await?;
        Ok(result.upserted_id.is_some())
    }

    pub async fn set_role(&self, session: &mut Session, id: ObjectId, role: Role) -> Result<()> {
        info!("Setting role for user {}: {}", id, role);
        let result = self
            .users
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "role": role.to_string() }, "$inc": { "version": 1 } },
            )
            .session(&mut *session)
            .await?;
        if result.matched_count == 0 {
            return Err(Error::msg("User not found"));
        }
        Ok(())
    }

    pub async fn all(&self, session: &mut Session) -> Result<Vec<User>> {
        let mut cursor = self
            .users
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }
}
