use model::errors::StudioError;
use model::session::Session;
use model::trainer::{TimeSlot, Trainer, TrainerStatus, DEFAULT_REJECTION_FEEDBACK};
use mongodb::bson::oid::ObjectId;
use storage::trainer::TrainerStore;

/// Application review and roster management over the shared `trainers`
/// collection.
#[derive(Clone)]
pub struct Trainers {
    store: TrainerStore,
}

impl Trainers {
    pub(crate) fn new(store: TrainerStore) -> Self {
        Trainers { store }
    }

    pub async fn add(&self, session: &mut Session, trainer: Trainer) -> Result<ObjectId, StudioError> {
        self.store.insert(session, &trainer).await?;
        Ok(trainer.id)
    }

    pub async fn roster(&self, session: &mut Session) -> Result<Vec<Trainer>, StudioError> {
        Ok(self
            .store
            .find_by_status(session, TrainerStatus::Approved)
            .await?)
    }

    pub async fn get(&self, session: &mut Session, id: ObjectId) -> Result<Trainer, StudioError> {
        self.store
            .get(session, id)
            .await?
            .ok_or(StudioError::TrainerNotFound(id))
    }

    pub async fn get_by_email(
        &self,
        session: &mut Session,
        email: &str,
    ) -> Result<Trainer, StudioError> {
        self.store
            .find_by_email(session, email)
            .await?
            .ok_or_else(|| StudioError::TrainerNotFoundByEmail(email.to_owned()))
    }

    pub async fn applications(
        &self,
        session: &mut Session,
        email: Option<&str>,
    ) -> Result<Vec<Trainer>, StudioError> {
        Ok(self.store.all(session, email).await?)
    }

    pub async fn pending(&self, session: &mut Session) -> Result<Vec<Trainer>, StudioError> {
        Ok(self
            .store
            .find_by_status(session, TrainerStatus::Pending)
            .await?)
    }

    pub async fn with_status(
        &self,
        session: &mut Session,
        status: TrainerStatus,
    ) -> Result<Vec<Trainer>, StudioError> {
        Ok(self.store.find_by_status(session, status).await?)
    }

    pub async fn get_application(
        &self,
        session: &mut Session,
        id: ObjectId,
    ) -> Result<Trainer, StudioError> {
        self.store
            .get(session, id)
            .await?
            .ok_or(StudioError::ApplicationNotFound(id))
    }

    /// Moves the application into the roster. A document that is already
    /// approved (or gone) misses the store guard and reads as not found.
    pub async fn approve(&self, session: &mut Session, id: ObjectId) -> Result<Trainer, StudioError> {
        if !self.store.approve(session, id).await? {
            return Err(StudioError::ApplicationNotFound(id));
        }
        self.get_application(session, id).await
    }

    pub async fn reject(
        &self,
        session: &mut Session,
        id: ObjectId,
        feedback: Option<String>,
    ) -> Result<Trainer, StudioError> {
        let feedback = feedback.unwrap_or_else(|| DEFAULT_REJECTION_FEEDBACK.to_owned());
        if !self.store.reject(session, id, &feedback).await? {
            return Err(StudioError::ApplicationNotFound(id));
        }
        self.get_application(session, id).await
    }

    pub async fn add_slot(
        &self,
        session: &mut Session,
        id: ObjectId,
        slot: TimeSlot,
    ) -> Result<Trainer, StudioError> {
        if !self.store.push_slot(session, id, &slot).await? {
            return Err(StudioError::TrainerNotFound(id));
        }
        self.get(session, id).await
    }

    /// Removes the slot at `index` with a version-guarded write: the list is
    /// read, spliced and written back only if the document still carries the
    /// version that was read. A concurrent change misses the guard and the
    /// call reports a conflict.
    pub async fn remove_slot_at(
        &self,
        session: &mut Session,
        id: ObjectId,
        index: usize,
    ) -> Result<Trainer, StudioError> {
        let mut trainer = self.get(session, id).await?;
        let len = trainer.available_slots.len();
        if trainer.remove_slot_at(index).is_none() {
            return Err(StudioError::SlotIndexOutOfRange {
                trainer_id: id,
                index,
                len,
            });
        }
        let updated = self
            .store
            .set_slots(session, id, trainer.version, &trainer.available_slots)
            .await?;
        if !updated {
            return Err(StudioError::VersionConflict(id));
        }
        trainer.version += 1;
        Ok(trainer)
    }

    pub async fn remove_slot(
        &self,
        session: &mut Session,
        id: ObjectId,
        label: &str,
    ) -> Result<Trainer, StudioError> {
        if !self.store.pull_slot(session, id, label).await? {
            return Err(StudioError::TrainerNotFound(id));
        }
        self.get(session, id).await
    }

    pub(crate) async fn delete(&self, session: &mut Session, id: ObjectId) -> Result<(), StudioError> {
        if !self.store.delete(session, id).await? {
            return Err(StudioError::TrainerNotFound(id));
        }
        Ok(())
    }
}
