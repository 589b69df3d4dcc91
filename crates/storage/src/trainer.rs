use std::sync::Arc;

use bson::to_document;
use eyre::Result;
use futures_util::stream::TryStreamExt;
use log::info;
use model::session::Session;
use model::trainer::{TimeSlot, Trainer, TrainerStatus};
use mongodb::IndexModel;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};

const COLLECTION: &str = "trainers";

/// One collection backs both pending applications and the approved roster;
/// `status` tells them apart.
#[derive(Clone)]
pub struct TrainerStore {
    trainers: Arc<Collection<Trainer>>,
}

impl TrainerStore {
    pub(crate) async fn new(db: &Database) -> Result<Self> {
        let trainers = db.collection(COLLECTION);
        trainers
            .create_index(IndexModel::builder().keys(doc! { "email": 1 }).build())
            .await?;
        trainers
            .create_index(IndexModel::builder().keys(doc! { "status": 1 }).build())
            .await?;
        trainers
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "created_at": -1 })
                    .build(),
            )
            .await?;
        Ok(TrainerStore {
            trainers: Arc::new(trainers),
        })
    }

    pub async fn insert(&self, session: &mut Session, trainer: &Trainer) -> Result<()> {
        info!("Inserting trainer: {:?}", trainer);
        self.trainers
            .insert_one(trainer)
            .session(&mut *session)
            .await?;
        Ok(())
    }

    pub async fn get(&self, session: &mut Session, id: ObjectId) -> Result<Option<Trainer>> {
        Ok(self
            .trainers
            .find_one(doc! { "_id": id })
            .session(&mut *session)
            .await?)
    }

    pub async fn find_by_email(
        &self,
        session: &mut Session,
        email: &str,
    ) -> Result<Option<Trainer>> {
        Ok(self
            .trainers
            .find_one(doc! { "email": email })
            .session(&mut *session)
            .await?)
    }

    pub async fn find_by_status(
        &self,
        session: &mut Session,
        status: TrainerStatus,
    ) -> Result<Vec<Trainer>> {
        let mut cursor = self
            .trainers
            .find(doc! { "status": status.to_string() })
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    /// Every document in the collection regardless of status, optionally
    /// narrowed to one applicant email. Newest first.
    pub async fn all(&self, session: &mut Session, email: Option<&str>) -> Result<Vec<Trainer>> {
        let mut filter = doc! {};
        if let Some(email) = email {
            filter.insert("email", email);
        }
        let mut cursor = self
            .trainers
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    pub async fn find_by_ids(
        &self,
        session: &mut Session,
        ids: &[ObjectId],
    ) -> Result<Vec<Trainer>> {
        let mut cursor = self
            .trainers
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .session(&mut *session)
            .await?;
        Ok(cursor.stream(&mut *session).try_collect().await?)
    }

    /// Flips the document into the approved state unless it is already
    /// there. Returns `false` when nothing matched, including a repeat
    /// approve of the same application.
    pub async fn approve(&self, session: &mut Session, id: ObjectId) -> Result<bool> {
        info!("Approving trainer application: {}", id);
        let result = self
            .trainers
            .update_one(
                doc! { "_id": id, "status": { "$ne": TrainerStatus::Approved.to_string() } },
                doc! {
                    "$set": {
                        "status": TrainerStatus::Approved.to_string(),
                        "created_at": bson::DateTime::now(),
                    },
                    "$unset": { "feedback": "" },
                    "$inc": { "version": 1 },
                },
            )
            .session(&mut *session)
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn reject(&self, session: &mut Session, id: ObjectId, feedback: &str) -> Result<bool> {
        info!("Rejecting trainer application: {}", id);
        let result = self
            .trainers
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "status": TrainerStatus::Rejected.to_string(),
                        "feedback": feedback,
                    },
                    "$inc": { "version": 1 },
                },
            )
            .session(&mut *session)
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn push_slot(
        &self,
        session: &mut Session,
        id: ObjectId,
        slot: &TimeSlot,
    ) -> Result<bool> {
        info!("Adding slot for trainer {}: {:?}", id, slot);
        let result = self
            .trainers
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$push": { "available_slots": to_document(slot)? },
                    "$inc": { "version": 1 },
                },
            )
            .session(&mut *session)
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Replaces the whole slot list, but only if the document still carries
    /// the version the caller read. Returns `false` on a lost race.
    pub async fn set_slots(
        &self,
        session: &mut Session,
        id: ObjectId,
        version: u64,
        slots: &[TimeSlot],
    ) -> Result<bool> {
        info!("Replacing slots for trainer {} at version {}", id, version);
        let slots = slots
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let result = self
            .trainers
            .update_one(
                doc! { "_id": id, "version": version as i64 },
                doc! {
                    "$set": { "available_slots": slots },
                    "$inc": { "version": 1 },
                },
            )
            .session(&mut *session)
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Pulls every slot carrying `label`. Atomic at the store.
    pub async fn pull_slot(
        &self,
        session: &mut Session,
        id: ObjectId,
        label: &str,
    ) -> Result<bool> {
        info!("Removing slot {:?} for trainer {}", label, id);
        let result = self
            .trainers
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$pull": { "available_slots": { "label": label } },
                    "$inc": { "version": 1 },
                },
            )
            .session(&mut *session)
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn delete(&self, session: &mut Session, id: ObjectId) -> Result<bool> {
        info!("Deleting trainer: {}", id);
        let result = self
            .trainers
            .delete_one(doc! { "_id": id })
            .session(&mut *session)
            .await?;
        Ok(result.deleted_count > 0)
    }
}
