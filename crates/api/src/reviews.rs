use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use model::errors::StudioError;
use model::review::Review;
use serde::Deserialize;

use crate::error::ApiError;
use crate::view::{InsertedView, ReviewView};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list).post(create))
        .route("/reviews/trainer/{id}", get(by_trainer))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<ReviewView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let reviews = state.studio.reviews.all(&mut session).await?;
    Ok(Json(reviews.into_iter().map(ReviewView::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewPayload {
    trainer_id: Option<String>,
    user_name: Option<String>,
    user_email: Option<String>,
    rating: Option<i32>,
    comment: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ReviewPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let trainer_id = payload
        .trainer_id
        .filter(|t| !t.trim().is_empty())
        .ok_or(StudioError::MissingField("trainerId"))?;
    let review = Review::new(
        trainer_id,
        payload.user_name,
        payload.user_email,
        payload.rating,
        payload.comment,
    );
    let mut session = state.studio.db.start_session().await?;
    let id = state.studio.reviews.create(&mut session, review).await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}

/// The path segment is matched against the stored string, it is not
/// required to be a well-formed object id.
async fn by_trainer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ReviewView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let reviews = state.studio.reviews.for_trainer(&mut session, &id).await?;
    Ok(Json(reviews.into_iter().map(ReviewView::from).collect()))
}
