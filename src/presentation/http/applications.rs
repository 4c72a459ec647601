use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::application_repository::ApplicationRecord;
use crate::application::use_cases::applications::apply_to_job::{ApplyOutcome, ApplyToJob};
use crate::application::use_cases::applications::list_job_applicants::ListJobApplicants;
use crate::application::use_cases::applications::list_my_applications::ListMyApplications;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::Bearer;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::{Json, Path};
use crate::presentation::http::jobs::{JobResponse, UserResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub candidate: UserResponse,
    pub job: JobResponse,
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(a: ApplicationRecord) -> Self {
        Self {
            id: a.id,
            candidate: a.candidate.into(),
            job: a.job.into(),
            applied_at: a.applied_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplyResponse {
    pub status: &'static str,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/jobs/:id/apply", post(apply_to_job))
        .route("/jobs/:id/applicants", get(list_job_applicants))
        .route("/applications", get(list_my_applications))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/jobs/{id}/apply", tag = "Applications",
    params(("id" = Uuid, Path, description = "Job id")),
    responses((status = 200, body = ApplyResponse)))]
pub async fn apply_to_job(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let caller = crate::presentation::http::auth::authenticate(&ctx, bearer).await?;

    let jobs = ctx.job_repo();
    let applications = ctx.application_repo();
    let outcome = ApplyToJob {
        jobs: jobs.as_ref(),
        applications: applications.as_ref(),
        mailer: ctx.mailer(),
    }
    .execute(&caller, job_id)
    .await?;

    let status = match outcome {
        ApplyOutcome::Applied => "applied",
        ApplyOutcome::AlreadyApplied => "already_applied",
    };
    Ok(Json(ApplyResponse { status }))
}

#[utoipa::path(get, path = "/api/applications", tag = "Applications", responses(
    (status = 200, body = Vec<ApplicationResponse>)
))]
pub async fn list_my_applications(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let caller = crate::presentation::http::auth::authenticate(&ctx, bearer).await?;

    let applications = ctx.application_repo();
    let rows = ListMyApplications {
        applications: applications.as_ref(),
    }
    .execute(&caller)
    .await?;
    Ok(Json(rows.into_iter().map(ApplicationResponse::from).collect()))
}

#[utoipa::path(get, path = "/api/jobs/{id}/applicants", tag = "Applications",
    params(("id" = Uuid, Path, description = "Job id")),
    responses((status = 200, body = Vec<ApplicationResponse>)))]
pub async fn list_job_applicants(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let caller = crate::presentation::http::auth::authenticate(&ctx, bearer).await?;

    let jobs = ctx.job_repo();
    let applications = ctx.application_repo();
    let rows = ListJobApplicants {
        jobs: jobs.as_ref(),
        applications: applications.as_ref(),
    }
    .execute(&caller, job_id)
    .await?;
    Ok(Json(rows.into_iter().map(ApplicationResponse::from).collect()))
}
