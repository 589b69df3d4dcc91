use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use model::errors::StudioError;
use serde::Deserialize;
use studio::service::users::Registration;

use crate::error::ApiError;
use crate::view::UserView;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list).post(register))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let users = state.studio.users.all(&mut session).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterPayload {
    name: Option<String>,
    email: Option<String>,
    image: Option<String>,
}

/// 201 with the new account, or 200 with the stored one when the email is
/// already registered.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or(StudioError::MissingField("email"))?;
    let mut session = state.studio.db.start_session().await?;
    let registration = state
        .studio
        .users
        .register(&mut session, payload.name, email, payload.image)
        .await?;
    Ok(match registration {
        Registration::Created(user) => (StatusCode::CREATED, Json(user.into())),
        Registration::Existing(user) => (StatusCode::OK, Json(user.into())),
    })
}
