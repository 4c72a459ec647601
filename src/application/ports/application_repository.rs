use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::job_repository::JobRecord;
use crate::application::ports::user_repository::UserSummary;

#[derive(Debug, Clone)]
pub struct ApplicationRecord {
    pub id: Uuid,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub candidate: UserSummary,
    pub job: JobRecord,
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts the (candidate, job) application unless it already exists.
    /// Returns `false` when the pair was already present. The store resolves
    /// concurrent inserts through its unique constraint.
    async fn insert_if_absent(&self, candidate: Uuid, job: Uuid) -> anyhow::Result<bool>;
    async fn list_for_candidate(&self, candidate: Uuid) -> anyhow::Result<Vec<ApplicationRecord>>;
    async fn list_for_job(&self, job: Uuid) -> anyhow::Result<Vec<ApplicationRecord>>;
}
