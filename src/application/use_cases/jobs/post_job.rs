use uuid::Uuid;

use crate::application::access::{Caller, RoleMismatch, require_role};
use crate::application::ports::job_repository::JobRepository;
use crate::domain::users::Role;

pub struct PostJob<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone, Default)]
pub struct PostJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum PostJobError {
    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),
    #[error("Missing fields")]
    MissingFields,
    #[error("failed to create job")]
    Repo(#[source] anyhow::Error),
}

impl<'a, R: JobRepository + ?Sized> PostJob<'a, R> {
    pub async fn execute(&self, caller: &Caller, req: &PostJobRequest) -> Result<Uuid, PostJobError> {
        require_role(caller, Role::Recruiter)?;

        let title = req.title.as_deref().map(str::trim).unwrap_or_default();
        let description = req.description.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || description.is_empty() {
            return Err(PostJobError::MissingFields);
        }

        self.repo
            .create_job(title, description, caller.id)
            .await
            .map_err(PostJobError::Repo)
    }
}
