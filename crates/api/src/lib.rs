use axum::routing::get;
use axum::Router;
use eyre::{Context as _, Result};
use serde::Deserialize;
use studio::Studio;
use tower_http::cors::CorsLayer;

pub mod bookings;
pub mod classes;
pub mod error;
pub mod forum;
pub mod newsletter;
pub mod reviews;
pub mod testimonials;
pub mod trainers;
pub mod users;
pub mod view;

#[derive(Clone)]
pub struct AppState {
    pub studio: Studio,
}

pub fn router(studio: Studio) -> Router {
    Router::new()
        .route("/", get(live))
        .merge(users::routes())
        .merge(testimonials::routes())
        .merge(classes::routes())
        .merge(trainers::routes())
        .merge(forum::routes())
        .merge(reviews::routes())
        .merge(newsletter::routes())
        .merge(bookings::routes())
        .layer(CorsLayer::permissive())
        .with_state(AppState { studio })
}

async fn live() -> &'static str {
    "Fitness studio API is running"
}

/// Path and body ids arrive as strings; a malformed one is the caller's
/// mistake, not a server fault.
pub(crate) fn parse_id(id: String) -> Result<bson::oid::ObjectId, model::errors::StudioError> {
    bson::oid::ObjectId::parse_str(&id).map_err(|_| model::errors::StudioError::InvalidId(id))
}

pub async fn serve(studio: Studio, addr: &str) -> Result<()> {
    let app = router(studio);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

const DEFAULT_PAGE_SIZE: i64 = 6;

/// `?page=&limit=` query pair shared by the paginated list routes.
/// Out-of-range values are clamped rather than rejected.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub(crate) page: Option<u64>,
    pub(crate) limit: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit() as u64
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        let limit = self.limit() as u64;
        total.div_ceil(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: Option<u64>, limit: Option<i64>) -> Pagination {
        Pagination { page, limit }
    }

    #[test]
    fn test_pagination_defaults() {
        let p = pagination(None, None);
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 6);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_offset() {
        let p = pagination(Some(3), Some(10));
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn test_pagination_clamps_zero() {
        let p = pagination(Some(0), Some(0));
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let p = pagination(None, Some(6));
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(6), 1);
        assert_eq!(p.total_pages(7), 2);
        assert_eq!(p.total_pages(12), 2);
        assert_eq!(p.total_pages(13), 3);
    }
}
