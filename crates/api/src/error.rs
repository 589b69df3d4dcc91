use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use model::errors::StudioError;
use serde_json::json;

/// Service-layer error carried to the HTTP boundary. Responses are a JSON
/// object with a single `error` field; 500s get a fixed message and the
/// cause goes to the log only.
pub struct ApiError(pub StudioError);

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        ApiError(err)
    }
}

impl From<eyre::Error> for ApiError {
    fn from(err: eyre::Error) -> Self {
        ApiError(StudioError::Eyre(err))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            StudioError::MissingField(_)
            | StudioError::InvalidId(_)
            | StudioError::InvalidStatus(_)
            | StudioError::InvalidVote(_)
            | StudioError::SlotIndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
            StudioError::TrainerNotFound(_)
            | StudioError::TrainerNotFoundByEmail(_)
            | StudioError::ApplicationNotFound(_)
            | StudioError::PostNotFound(_) => StatusCode::NOT_FOUND,
            StudioError::AlreadySubscribed(_) | StudioError::VersionConflict(_) => {
                StatusCode::CONFLICT
            }
            StudioError::Eyre(_) | StudioError::MongoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {:?}", self.0);
            "internal error".to_owned()
        } else {
            self.0.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use eyre::eyre;

    fn status_of(err: StudioError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(status_of(StudioError::MissingField("email")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(StudioError::InvalidId("nope".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StudioError::InvalidStatus("archived".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StudioError::InvalidVote("sideways".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StudioError::SlotIndexOutOfRange {
                trainer_id: ObjectId::new(),
                index: 5,
                len: 2,
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_missing_documents_are_not_found() {
        assert_eq!(
            status_of(StudioError::TrainerNotFound(ObjectId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StudioError::TrainerNotFoundByEmail("a@b.c".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StudioError::ApplicationNotFound(ObjectId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StudioError::PostNotFound(ObjectId::new())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflicts() {
        assert_eq!(
            status_of(StudioError::AlreadySubscribed("a@b.c".to_owned())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StudioError::VersionConflict(ObjectId::new())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_errors_are_opaque() {
        let response = ApiError(StudioError::Eyre(eyre!("connection reset"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
