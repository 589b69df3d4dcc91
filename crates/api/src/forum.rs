use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use model::errors::StudioError;
use model::forum::{ForumPost, VoteKind};
use model::user::Role;
use serde::Deserialize;

use crate::error::ApiError;
use crate::view::{ForumPostView, InsertedView, ListView};
use crate::{parse_id, AppState, Pagination};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/forum", get(list).post(create))
        .route("/forum/{id}/vote", patch(vote))
}

async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ListView<ForumPostView>>, ApiError> {
    let mut session = state.studio.db.start_session().await?;
    let (posts, total) = state
        .studio
        .forum
        .list(&mut session, pagination.limit(), pagination.offset())
        .await?;
    Ok(Json(ListView {
        items: posts.into_iter().map(ForumPostView::from).collect(),
        total,
        current_page: pagination.page(),
        total_pages: pagination.total_pages(total),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostPayload {
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    role: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PostPayload>,
) -> Result<(StatusCode, Json<InsertedView>), ApiError> {
    let title = payload
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(StudioError::MissingField("title"))?;
    let content = payload
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(StudioError::MissingField("content"))?;
    // An unrecognized role is dropped, not rejected.
    let author_role = payload.role.and_then(|r| r.parse::<Role>().ok());
    let mut session = state.studio.db.start_session().await?;
    let id = state
        .studio
        .forum
        .create(
            &mut session,
            ForumPost::new(title, content, payload.author, author_role),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(InsertedView::new(id))))
}

#[derive(Debug, Deserialize)]
struct VotePayload {
    vote: Option<String>,
}

fn parse_vote(payload: VotePayload) -> Result<VoteKind, StudioError> {
    let vote = payload.vote.ok_or(StudioError::MissingField("vote"))?;
    vote.parse().map_err(|_| StudioError::InvalidVote(vote))
}

async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<VotePayload>,
) -> Result<Json<ForumPostView>, ApiError> {
    let id = parse_id(id)?;
    let vote = parse_vote(payload)?;
    let mut session = state.studio.db.start_session().await?;
    let post = state.studio.forum.vote(&mut session, id, vote).await?;
    Ok(Json(post.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote_directions() {
        let up = parse_vote(VotePayload {
            vote: Some("up".to_owned()),
        })
        .unwrap();
        assert_eq!(up, VoteKind::Up);
        let down = parse_vote(VotePayload {
            vote: Some("down".to_owned()),
        })
        .unwrap();
        assert_eq!(down, VoteKind::Down);
    }

    #[test]
    fn test_parse_vote_missing() {
        let err = parse_vote(VotePayload { vote: None }).unwrap_err();
        assert!(matches!(err, StudioError::MissingField("vote")));
    }

    #[test]
    fn test_parse_vote_unknown() {
        let err = parse_vote(VotePayload {
            vote: Some("sideways".to_owned()),
        })
        .unwrap_err();
        assert!(matches!(err, StudioError::InvalidVote(_)));
    }
}
