use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use model::errors::StudioError;
use model::testimonial::Testimonial;
use serde::Deserialize;

use crate::error::ApiError;
use crate::view::{InsertedView, TestimonialView};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/testimonials", get(list).post(create))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<TestimonialView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let testimonials = state.studio.testimonials.all(&mut session).await?;
    Ok(Json(
        testimonials.into_iter().map(TestimonialView::from).collect(),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TestimonialPayload {
    name: Option<String>,
    review: Option<String>,
    role: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(StudioError::MissingField("name"))?;
    let review = payload
        .review
        .filter(|r| !r.trim().is_empty())
        .ok_or(StudioError::MissingField("review"))?;
    let mut session = state.studio.db.start_session().await?;
    let id = state
        .studio
        .testimonials
        .create(&mut session, Testimonial::new(name, review, payload.role))
        .await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}
