use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::access::RoleMismatch;
use crate::application::use_cases::applications::apply_to_job::ApplyError;
use crate::application::use_cases::applications::list_job_applicants::ListJobApplicantsError;
use crate::application::use_cases::applications::list_my_applications::ListMyApplicationsError;
use crate::application::use_cases::auth::refresh::RefreshError;
use crate::application::use_cases::auth::signin::SigninError;
use crate::application::use_cases::auth::signup::SignupError;
use crate::application::use_cases::jobs::post_job::PostJobError;

/// Request-boundary error. Every failure leaves the service as
/// `{"error": "<message>"}` with the status from the taxonomy:
/// 400 validation/conflict, 401 credentials/tokens, 403 role, 404 lookup.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".into(),
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<RoleMismatch> for ApiError {
    fn from(err: RoleMismatch) -> Self {
        ApiError::forbidden(err.to_string())
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::MissingFields | SignupError::UnknownRole => {
                ApiError::validation(err.to_string())
            }
            // Duplicate email reports 400 like any other rejected signup input.
            SignupError::EmailTaken => ApiError::validation(err.to_string()),
            SignupError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<SigninError> for ApiError {
    fn from(err: SigninError) -> Self {
        match err {
            SigninError::MissingFields => ApiError::validation(err.to_string()),
            SigninError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            SigninError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(err: RefreshError) -> Self {
        match err {
            RefreshError::Revoked => ApiError::unauthorized(err.to_string()),
            RefreshError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<PostJobError> for ApiError {
    fn from(err: PostJobError) -> Self {
        match err {
            PostJobError::Forbidden(e) => e.into(),
            PostJobError::MissingFields => ApiError::validation(err.to_string()),
            PostJobError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<ApplyError> for ApiError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::Forbidden(e) => e.into(),
            ApplyError::JobNotFound => ApiError::not_found(err.to_string()),
            ApplyError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<ListMyApplicationsError> for ApiError {
    fn from(err: ListMyApplicationsError) -> Self {
        match err {
            ListMyApplicationsError::Forbidden(e) => e.into(),
            ListMyApplicationsError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<ListJobApplicantsError> for ApiError {
    fn from(err: ListJobApplicantsError) -> Self {
        match err {
            ListJobApplicantsError::Forbidden(e) => e.into(),
            ListJobApplicantsError::JobNotFound => ApiError::not_found(err.to_string()),
            ListJobApplicantsError::Repo(e) => ApiError::internal(e),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(err)
    }
}
