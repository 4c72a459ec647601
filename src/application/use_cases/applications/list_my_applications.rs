use crate::application::access::{Caller, RoleMismatch, require_role};
use crate::application::ports::application_repository::{
    ApplicationRecord, ApplicationRepository,
};
use crate::domain::users::Role;

pub struct ListMyApplications<'a, A: ApplicationRepository + ?Sized> {
    pub applications: &'a A,
}

#[derive(thiserror::Error, Debug)]
pub enum ListMyApplicationsError {
    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),
    #[error("failed to list applications")]
    Repo(#[source] anyhow::Error),
}

impl<'a, A: ApplicationRepository + ?Sized> ListMyApplications<'a, A> {
    pub async fn execute(
        &self,
        caller: &Caller,
    ) -> Result<Vec<ApplicationRecord>, ListMyApplicationsError> {
        require_role(caller, Role::Candidate)?;
        self.applications
            .list_for_candidate(caller.id)
            .await
            .map_err(ListMyApplicationsError::Repo)
    }
}
