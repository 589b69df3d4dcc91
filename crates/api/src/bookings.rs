use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use model::booking::Booking;
use model::errors::StudioError;
use serde::Deserialize;

use crate::error::ApiError;
use crate::view::{BookingView, InsertedView};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create))
        .route("/bookings/user/{email}", get(for_user))
        .route("/bookings/trainer/{trainerId}", get(for_trainer))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentPayload {
    user_email: Option<String>,
    trainer_id: Option<String>,
    slot: Option<String>,
    price: Option<f64>,
}

/// There is no payment gateway behind this route; every booking is recorded
/// as successful.
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PaymentPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let user_email = payload
        .user_email
        .filter(|e| !e.trim().is_empty())
        .ok_or(StudioError::MissingField("userEmail"))?;
    let trainer_id = payload
        .trainer_id
        .filter(|t| !t.trim().is_empty())
        .ok_or(StudioError::MissingField("trainerId"))?;
    let booking = Booking::new(user_email, trainer_id, payload.slot, payload.price);
    let mut session = state.studio.db.start_session().await?;
    let id = state.studio.bookings.create(&mut session, booking).await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}

async fn for_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let bookings = state.studio.bookings.for_user(&mut session, &email).await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}

async fn for_trainer(
    State(state): State<AppState>,
    Path(trainer_id): Path<String>,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let bookings = state
        .studio
        .bookings
        .for_trainer(&mut session, &trainer_id)
        .await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}
