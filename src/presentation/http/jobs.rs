use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::job_repository::JobRecord;
use crate::application::ports::user_repository::UserSummary;
use crate::application::use_cases::jobs::list_jobs::ListJobs;
use crate::application::use_cases::jobs::post_job::{PostJob, PostJobRequest};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::Role;
use crate::presentation::http::auth::Bearer;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::Json;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub user_type: Role,
}

impl From<UserSummary> for UserResponse {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            user_type: u.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub posted_by: UserResponse,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<JobRecord> for JobResponse {
    fn from(j: JobRecord) -> Self {
        Self {
            id: j.id,
            title: j.title,
            description: j.description,
            posted_by: j.posted_by.into(),
            created_at: j.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostJobBody {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostJobResponse {
    pub status: &'static str,
    pub job_id: Uuid,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/post", post(post_job))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/jobs", tag = "Jobs", responses(
    (status = 200, body = Vec<JobResponse>)
))]
pub async fn list_jobs(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    crate::presentation::http::auth::authenticate(&ctx, bearer).await?;

    let repo = ctx.job_repo();
    let jobs = ListJobs {
        repo: repo.as_ref(),
    }
    .execute()
    .await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

#[utoipa::path(post, path = "/api/jobs/post", tag = "Jobs", request_body = PostJobBody, responses(
    (status = 200, body = PostJobResponse)
))]
pub async fn post_job(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(body): Json<PostJobBody>,
) -> Result<Json<PostJobResponse>, ApiError> {
    let caller = crate::presentation::http::auth::authenticate(&ctx, bearer).await?;

    let repo = ctx.job_repo();
    let job_id = PostJob {
        repo: repo.as_ref(),
    }
    .execute(
        &caller,
        &PostJobRequest {
            title: body.title,
            description: body.description,
        },
    )
    .await?;
    Ok(Json(PostJobResponse {
        status: "job_posted",
        job_id,
    }))
}
