use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use model::class::Class;
use model::errors::StudioError;
use serde::Deserialize;

use crate::error::ApiError;
use crate::view::{ClassView, InsertedView, ListView};
use crate::{AppState, Pagination};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(list).post(create))
        .route("/classes/featured", get(featured))
}

#[derive(Debug, Deserialize)]
struct ClassQuery {
    page: Option<u64>,
    limit: Option<i64>,
    search: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ClassQuery>,
) -> Result<Json<ListView<ClassView>>, ApiError> {
    let pagination = Pagination {
        page: query.page,
        limit: query.limit,
    };
    let search = query
        .search
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    let mut session = state.studio.db.start_session().await?;
    let (classes, total) = state
        .studio
        .classes
        .list(&mut session, search, pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(ListView {
        items: classes.into_iter().map(ClassView::from).collect(),
        total,
        current_page: pagination.page(),
        total_pages: pagination.total_pages(total),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassPayload {
    name: Option<String>,
    image: Option<String>,
    details: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ClassPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let name = payload
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or(StudioError::MissingField("name"))?;
    let image = payload
        .image
        .filter(|i| !i.trim().is_empty())
        .ok_or(StudioError::MissingField("image"))?;
    let details = payload
        .details
        .filter(|d| !d.trim().is_empty())
        .ok_or(StudioError::MissingField("details"))?;
    let mut session = state.studio.db.start_session().await?;
    let id = state
        .studio
        .classes
        .create(&mut session, Class::new(name, image, details))
        .await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}

async fn featured(State(state): State<AppState>) -> Result<Json<Vec<ClassView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let classes = state.studio.classes.featured(&mut session).await?;
    Ok(Json(classes.into_iter().map(ClassView::from).collect()))
}
