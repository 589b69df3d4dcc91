use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use model::errors::StudioError;
use model::subscriber::Subscriber;
use serde::Deserialize;

use crate::error::ApiError;
use crate::view::{InsertedView, SubscriberView};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/newsletter/subscribe", post(subscribe))
        .route("/newsletter/subscribers", get(subscribers))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscribePayload {
    name: Option<String>,
    email: Option<String>,
}

async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribePayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(StudioError::MissingField("name"))?;
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(StudioError::MissingField("email"))?;
    let mut session = state.studio.db.start_session().await?;
    let subscriber = state
        .studio
        .newsletter
        .subscribe(&mut session, Subscriber::new(name, email))
        .await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(subscriber.id))))
}

async fn subscribers(State(state): State<AppState>) -> Result<Json<Vec<SubscriberView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let subscribers = state.studio.newsletter.subscribers(&mut session).await?;
    Ok(Json(
        subscribers.into_iter().map(SubscriberView::from).collect(),
    ))
}
