use bson::oid::ObjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Common error: {0}")]
    Eyre(#[from] eyre::Error),
    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid vote: {0}")]
    InvalidVote(String),
    #[error("Slot index {index} out of range: trainer {trainer_id} has {len} slots")]
    SlotIndexOutOfRange {
        trainer_id: ObjectId,
        index: usize,
        len: usize,
    },
    #[error("Trainer not found: {0}")]
    TrainerNotFound(ObjectId),
    #[error("Trainer not found: {0}")]
    TrainerNotFoundByEmail(String),
    #[error("Application not found: {0}")]
    ApplicationNotFound(ObjectId),
    #[error("Post not found: {0}")]
    PostNotFound(ObjectId),
    #[error("Already subscribed: {0}")]
    AlreadySubscribed(String),
    #[error("Version conflict: {0}")]
    VersionConflict(ObjectId),
}
