use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::application_repository::{
    ApplicationRecord, ApplicationRepository,
};
use crate::application::ports::job_repository::JobRecord;
use crate::application::ports::user_repository::UserSummary;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::parse_role;

pub struct SqlxApplicationRepository {
    pub pool: PgPool,
}

impl SqlxApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const APPLICATION_SELECT: &str = r#"
    SELECT a.id, a.applied_at,
           c.id AS candidate_id, c.email AS candidate_email,
           c.name AS candidate_name, c.role AS candidate_role,
           j.id AS job_id, j.title, j.description, j.created_at AS job_created_at,
           p.id AS poster_id, p.email AS poster_email,
           p.name AS poster_name, p.role AS poster_role
    FROM applications a
    JOIN users c ON c.id = a.candidate_id
    JOIN jobs j ON j.id = a.job_id
    JOIN users p ON p.id = j.posted_by
"#;

fn map_application(row: &sqlx::postgres::PgRow) -> anyhow::Result<ApplicationRecord> {
    Ok(ApplicationRecord {
        id: row.get("id"),
        applied_at: row.get("applied_at"),
        candidate: UserSummary {
            id: row.get("candidate_id"),
            email: row.get("candidate_email"),
            name: row.get("candidate_name"),
            role: parse_role(row.get("candidate_role"))?,
        },
        job: JobRecord {
            id: row.get("job_id"),
            title: row.get("title"),
            description: row.get("description"),
            created_at: row.get("job_created_at"),
            posted_by: UserSummary {
                id: row.get("poster_id"),
                email: row.get("poster_email"),
                name: row.get("poster_name"),
                role: parse_role(row.get("poster_role"))?,
            },
        },
    })
}

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepository {
    async fn insert_if_absent(&self, candidate: Uuid, job: Uuid) -> anyhow::Result<bool> {
        // The unique (candidate_id, job_id) constraint decides the race;
        // zero rows affected means the application already existed.
        let res = sqlx::query(
            r#"INSERT INTO applications (candidate_id, job_id) VALUES ($1, $2)
               ON CONFLICT (candidate_id, job_id) DO NOTHING"#,
        )
        .bind(candidate)
        .bind(job)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_for_candidate(&self, candidate: Uuid) -> anyhow::Result<Vec<ApplicationRecord>> {
        let rows = sqlx::query(&format!(
            "{APPLICATION_SELECT} WHERE a.candidate_id = $1 ORDER BY a.applied_at DESC"
        ))
        .bind(candidate)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_application).collect()
    }

    async fn list_for_job(&self, job: Uuid) -> anyhow::Result<Vec<ApplicationRecord>> {
        let rows = sqlx::query(&format!(
            "{APPLICATION_SELECT} WHERE a.job_id = $1 ORDER BY a.applied_at DESC"
        ))
        .bind(job)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_application).collect()
    }
}
