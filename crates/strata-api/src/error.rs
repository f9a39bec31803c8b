use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strata_core::{AdminError, RequestOutcome};
use thiserror::Error;

/// Error returned by admin HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Admin(AdminError::Unsupported { .. }) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Admin(AdminError::InvalidRequest(_)) | ApiError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Admin(AdminError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn outcome(&self) -> RequestOutcome {
        match self {
            ApiError::Admin(e) => RequestOutcome::from(e),
            ApiError::InvalidRequest(_) | ApiError::NotFound(_) => RequestOutcome::Invalid,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::AdminOp;
    use strata_model::NodeRole;

    #[test]
    fn unsupported_maps_to_not_implemented() {
        let e = ApiError::from(AdminError::Unsupported {
            op: AdminOp::LostWorkers,
            role: NodeRole::Worker,
        });
        assert_eq!(e.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(e.outcome(), RequestOutcome::Unsupported);
        assert_eq!(
            e.to_string(),
            "operation `lostWorkers` is not supported on worker"
        );
    }

    #[test]
    fn request_errors_map_to_bad_request() {
        assert_eq!(
            ApiError::InvalidRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AdminError::InvalidRequest("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AdminError::Internal("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
