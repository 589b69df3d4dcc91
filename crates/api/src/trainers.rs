use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use bson::oid::ObjectId;
use chrono::Utc;
use model::errors::StudioError;
use model::trainer::{TimeSlot, Trainer, TrainerStatus};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};

use crate::error::ApiError;
use crate::view::{InsertedView, TrainerView, UserView};
use crate::{parse_id, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trainers", get(roster).post(add))
        .route("/trainers/apply", post(apply))
        .route("/trainers/applications", get(applications))
        .route("/trainers/applications/pending", get(pending))
        .route("/trainers/applications/status/filter", get(by_status))
        .route("/trainers/applications/{id}", get(application))
        .route("/trainers/applications/{id}/confirm", patch(confirm))
        .route("/trainers/applications/{id}/reject", patch(reject))
        .route("/trainers/email/{email}", get(by_email))
        .route("/trainers/{id}", get(get_one))
        .route("/trainers/{id}/remove-trainer", patch(demote))
        .route("/trainers/{id}/slots", post(add_slot).delete(remove_slot))
        .route("/trainers/{id}/remove-slot", patch(remove_slot_at))
}

/// Application and roster-add bodies as clients actually send them:
/// `age`/`experience` arrive as numbers or numeric strings (anything else
/// coerces to 0), lists and the socials map fall back to empty when the
/// value has the wrong shape.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrainerPayload {
    name: Option<String>,
    email: Option<String>,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    age: u32,
    image: Option<String>,
    #[serde_as(as = "DefaultOnError<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    experience: u32,
    details: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    expertise: Vec<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    available_days: Vec<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    available_slots: Vec<TimeSlot>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    socials: HashMap<String, String>,
}

impl TrainerPayload {
    fn into_trainer(self, status: TrainerStatus) -> Result<Trainer, StudioError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(StudioError::MissingField("name"))?;
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or(StudioError::MissingField("email"))?;
        Ok(Trainer {
            id: ObjectId::new(),
            name,
            email,
            age: self.age,
            image: self.image.unwrap_or_default(),
            experience: self.experience,
            details: self.details.unwrap_or_default(),
            expertise: self.expertise,
            available_days: self.available_days,
            available_slots: self.available_slots,
            socials: self.socials,
            status,
            feedback: None,
            version: 0,
            created_at: Utc::now(),
        })
    }
}

async fn roster(State(state): State<AppState>) -> Result<Json<Vec<TrainerView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let trainers = state.studio.trainers.roster(&mut session).await?;
    Ok(Json(trainers.into_iter().map(TrainerView::from).collect()))
}

/// Admin shortcut: lands in the roster directly, skipping review.
async fn add(
    State(state): State<AppState>,
    Json(payload): Json<TrainerPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let trainer = payload.into_trainer(TrainerStatus::Approved)?;
    let mut session = state.studio.db.start_session().await?;
    let id = state.studio.trainers.add(&mut session, trainer).await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}

async fn apply(
    State(state): State<AppState>,
    Json(payload): Json<TrainerPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let trainer = payload.into_trainer(TrainerStatus::Pending)?;
    let mut session = state.studio.db.start_session().await?;
    let id = state.studio.trainers.add(&mut session, trainer).await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}

#[derive(Debug, Deserialize)]
struct ApplicationsQuery {
    email: Option<String>,
}

async fn applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationsQuery>,
) -> Result<Json<Vec<TrainerView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let trainers = state
        .studio
        .trainers
        .applications(&mut session, query.email.as_deref())
        .await?;
    Ok(Json(trainers.into_iter().map(TrainerView::from).collect()))
}

async fn pending(State(state): State<AppState>) -> Result<Json<Vec<TrainerView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let trainers = state.studio.trainers.pending(&mut session).await?;
    Ok(Json(trainers.into_iter().map(TrainerView::from).collect()))
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

fn parse_status(query: StatusQuery) -> Result<TrainerStatus, StudioError> {
    let status = query.status.ok_or(StudioError::MissingField("status"))?;
    status
        .parse()
        .map_err(|_| StudioError::InvalidStatus(status))
}

async fn by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<TrainerView>>, ApiError> {
    let status = parse_status(query)?;
    let mut session = state.studio.db.start_session().await?;
    let trainers = state
        .studio
        .trainers
        .with_status(&mut session, status)
        .await?;
    Ok(Json(trainers.into_iter().map(TrainerView::from).collect()))
}

async fn application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let mut session = state.studio.db.start_session().await?;
    let trainer = state
        .studio
        .trainers
        .get_application(&mut session, id)
        .await?;
    Ok(Json(trainer.into()))
}

async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let mut session = state.studio.db.start_session().await?;
    let trainer = state.studio.trainers.approve(&mut session, id).await?;
    Ok(Json(trainer.into()))
}

#[derive(Debug, Deserialize)]
struct RejectPayload {
    feedback: Option<String>,
}

async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<RejectPayload>>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let feedback = payload.and_then(|Json(p)| p.feedback);
    let mut session = state.studio.db.start_session().await?;
    let trainer = state
        .studio
        .trainers
        .reject(&mut session, id, feedback)
        .await?;
    Ok(Json(trainer.into()))
}

async fn by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<TrainerView>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let trainer = state
        .studio
        .trainers
        .get_by_email(&mut session, &email)
        .await?;
    Ok(Json(trainer.into()))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let mut session = state.studio.db.start_session().await?;
    let trainer = state.studio.trainers.get(&mut session, id).await?;
    Ok(Json(trainer.into()))
}

async fn demote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let id = parse_id(id)?;
    let mut session = state.studio.db.start_session().await?;
    let user = state.studio.demote_trainer(&mut session, id).await?;
    Ok(Json(user.into()))
}

#[derive(Debug, Deserialize)]
struct SlotPayload {
    label: Option<String>,
    time: Option<String>,
}

async fn add_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SlotPayload>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let label = payload
        .label
        .filter(|l| !l.trim().is_empty())
        .ok_or(StudioError::MissingField("label"))?;
    let time = payload
        .time
        .filter(|t| !t.trim().is_empty())
        .ok_or(StudioError::MissingField("time"))?;
    let mut session = state.studio.db.start_session().await?;
    let trainer = state
        .studio
        .trainers
        .add_slot(&mut session, id, TimeSlot { label, time })
        .await?;
    Ok(Json(trainer.into()))
}

#[derive(Debug, Deserialize)]
struct SlotIndexPayload {
    index: Option<usize>,
}

async fn remove_slot_at(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SlotIndexPayload>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let index = payload.index.ok_or(StudioError::MissingField("index"))?;
    let mut session = state.studio.db.start_session().await?;
    let trainer = state
        .studio
        .trainers
        .remove_slot_at(&mut session, id, index)
        .await?;
    Ok(Json(trainer.into()))
}

async fn remove_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SlotPayload>,
) -> Result<Json<TrainerView>, ApiError> {
    let id = parse_id(id)?;
    let label = payload
        .label
        .filter(|l| !l.trim().is_empty())
        .ok_or(StudioError::MissingField("label"))?;
    let mut session = state.studio.db.start_session().await?;
    let trainer = state
        .studio
        .trainers
        .remove_slot(&mut session, id, &label)
        .await?;
    Ok(Json(trainer.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_accepts_numeric_strings() {
        let payload: TrainerPayload = serde_json::from_value(json!({
            "name": "Sasha",
            "email": "sasha@example.com",
            "age": "31",
            "experience": "7"
        }))
        .unwrap();
        assert_eq!(payload.age, 31);
        assert_eq!(payload.experience, 7);
    }

    #[test]
    fn test_payload_coerces_garbage_numbers_to_zero() {
        let payload: TrainerPayload = serde_json::from_value(json!({
            "name": "Sasha",
            "email": "sasha@example.com",
            "age": "unknown",
            "experience": 7.5
        }))
        .unwrap();
        assert_eq!(payload.age, 0);
        assert_eq!(payload.experience, 0);
    }

    #[test]
    fn test_payload_defaults_badly_shaped_collections() {
        let payload: TrainerPayload = serde_json::from_value(json!({
            "name": "Sasha",
            "email": "sasha@example.com",
            "expertise": "crossfit",
            "availableDays": 3,
            "socials": ["not", "a", "map"]
        }))
        .unwrap();
        assert!(payload.expertise.is_empty());
        assert!(payload.available_days.is_empty());
        assert!(payload.socials.is_empty());
    }

    #[test]
    fn test_payload_parses_slots() {
        let payload: TrainerPayload = serde_json::from_value(json!({
            "name": "Sasha",
            "email": "sasha@example.com",
            "availableSlots": [{ "label": "morning", "time": "06:00 - 08:00" }]
        }))
        .unwrap();
        assert_eq!(payload.available_slots.len(), 1);
        assert_eq!(payload.available_slots[0].label, "morning");
    }

    #[test]
    fn test_into_trainer_requires_name_and_email() {
        let payload: TrainerPayload =
            serde_json::from_value(json!({ "email": "sasha@example.com" })).unwrap();
        let err = payload.into_trainer(TrainerStatus::Pending).unwrap_err();
        assert!(matches!(err, StudioError::MissingField("name")));

        let payload: TrainerPayload =
            serde_json::from_value(json!({ "name": "Sasha", "email": "  " })).unwrap();
        let err = payload.into_trainer(TrainerStatus::Pending).unwrap_err();
        assert!(matches!(err, StudioError::MissingField("email")));
    }

    #[test]
    fn test_into_trainer_keeps_status() {
        let payload: TrainerPayload = serde_json::from_value(json!({
            "name": "Sasha",
            "email": "sasha@example.com"
        }))
        .unwrap();
        let trainer = payload.into_trainer(TrainerStatus::Approved).unwrap();
        assert_eq!(trainer.status, TrainerStatus::Approved);
        assert!(trainer.feedback.is_none());
        assert_eq!(trainer.version, 0);
    }

    #[test]
    fn test_parse_status_filter() {
        let status = parse_status(StatusQuery {
            status: Some("rejected".to_owned()),
        })
        .unwrap();
        assert_eq!(status, TrainerStatus::Rejected);

        let err = parse_status(StatusQuery { status: None }).unwrap_err();
        assert!(matches!(err, StudioError::MissingField("status")));

        let err = parse_status(StatusQuery {
            status: Some("archived".to_owned()),
        })
        .unwrap_err();
        assert!(matches!(err, StudioError::InvalidStatus(_)));
    }
}
