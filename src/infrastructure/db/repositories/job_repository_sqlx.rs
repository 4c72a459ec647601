use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::job_repository::{JobRecord, JobRepository};
use crate::application::ports::user_repository::UserSummary;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::parse_role;

pub struct SqlxJobRepository {
    pub pool: PgPool,
}

impl SqlxJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const JOB_SELECT: &str = r#"
    SELECT j.id, j.title, j.description, j.created_at,
           u.id AS poster_id, u.email AS poster_email,
           u.name AS poster_name, u.role AS poster_role
    FROM jobs j
    JOIN users u ON u.id = j.posted_by
"#;

pub(crate) fn map_job(row: &sqlx::postgres::PgRow) -> anyhow::Result<JobRecord> {
    Ok(JobRecord {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        posted_by: UserSummary {
            id: row.get("poster_id"),
            email: row.get("poster_email"),
            name: row.get("poster_name"),
            role: parse_role(row.get("poster_role"))?,
        },
    })
}

#[async_trait]
impl JobRepository for SqlxJobRepository {
    async fn create_job(
        &self,
        title: &str,
        description: &str,
        posted_by: Uuid,
    ) -> anyhow::Result<Uuid> {
        let row = sqlx::query(
            r#"INSERT INTO jobs (title, description, posted_by)
               VALUES ($1, $2, $3) RETURNING id"#,
        )
        .bind(title)
        .bind(description)
        .bind(posted_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("id"))
    }

    async fn list_jobs(&self) -> anyhow::Result<Vec<JobRecord>> {
        let rows = sqlx::query(&format!("{JOB_SELECT} ORDER BY j.created_at DESC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_job).collect()
    }

    async fn find_job(&self, id: Uuid) -> anyhow::Result<Option<JobRecord>> {
        let row = sqlx::query(&format!("{JOB_SELECT} WHERE j.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_job).transpose()
    }

    async fn find_owned_job(
        &self,
        id: Uuid,
        recruiter: Uuid,
    ) -> anyhow::Result<Option<JobRecord>> {
        let row = sqlx::query(&format!(
            "{JOB_SELECT} WHERE j.id = $1 AND j.posted_by = $2"
        ))
        .bind(id)
        .bind(recruiter)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_job).transpose()
    }
}
