use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::user_repository::UserSummary;

#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub posted_by: UserSummary,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create_job(
        &self,
        title: &str,
        description: &str,
        posted_by: Uuid,
    ) -> anyhow::Result<Uuid>;
    async fn list_jobs(&self) -> anyhow::Result<Vec<JobRecord>>;
    async fn find_job(&self, id: Uuid) -> anyhow::Result<Option<JobRecord>>;
    /// Like `find_job`, but only when the job belongs to `recruiter`.
    async fn find_owned_job(&self, id: Uuid, recruiter: Uuid)
    -> anyhow::Result<Option<JobRecord>>;
}
