use uuid::Uuid;

use crate::application::access::{Caller, RoleMismatch, require_role};
use crate::application::ports::application_repository::{
    ApplicationRecord, ApplicationRepository,
};
use crate::application::ports::job_repository::JobRepository;
use crate::domain::users::Role;

/// Applications for one job, visible only to the recruiter who posted it.
/// A job that exists but belongs to someone else reads as not found, so the
/// listing never leaks other recruiters' postings.
pub struct ListJobApplicants<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub jobs: &'a J,
    pub applications: &'a A,
}

#[derive(thiserror::Error, Debug)]
pub enum ListJobApplicantsError {
    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),
    #[error("job not found")]
    JobNotFound,
    #[error("failed to list applicants")]
    Repo(#[source] anyhow::Error),
}

impl<'a, J, A> ListJobApplicants<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub async fn execute(
        &self,
        caller: &Caller,
        job_id: Uuid,
    ) -> Result<Vec<ApplicationRecord>, ListJobApplicantsError> {
        require_role(caller, Role::Recruiter)?;

        self.jobs
            .find_owned_job(job_id, caller.id)
            .await
            .map_err(ListJobApplicantsError::Repo)?
            .ok_or(ListJobApplicantsError::JobNotFound)?;

        self.applications
            .list_for_job(job_id)
            .await
            .map_err(ListJobApplicantsError::Repo)
    }
}
