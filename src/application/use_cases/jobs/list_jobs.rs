use crate::application::ports::job_repository::{JobRecord, JobRepository};

/// All jobs with poster summaries, any authenticated role.
pub struct ListJobs<'a, R: JobRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: JobRepository + ?Sized> ListJobs<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<JobRecord>> {
        self.repo.list_jobs().await
    }
}
