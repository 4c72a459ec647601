//! In-memory port implementations for use-case tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::access::Caller;
use crate::application::ports::application_repository::{
    ApplicationRecord, ApplicationRepository,
};
use crate::application::ports::job_repository::{JobRecord, JobRepository};
use crate::application::ports::mailer::{EmailMessage, Mailer};
use crate::application::ports::token_store::RefreshTokenStore;
use crate::application::ports::user_repository::{UserRepository, UserRow, UserSummary};
use crate::domain::users::Role;

pub fn caller(role: Role) -> Caller {
    let id = Uuid::new_v4();
    Caller {
        id,
        email: format!("{id}@example.test"),
        name: format!("user-{}", &id.to_string()[..8]),
        role,
    }
}

fn summary_for(caller: &Caller) -> UserSummary {
    UserSummary {
        id: caller.id,
        email: caller.email.clone(),
        name: caller.name.clone(),
        role: caller.role,
    }
}

#[derive(Clone, Default)]
struct UserDirectory(Arc<Mutex<HashMap<Uuid, UserSummary>>>);

impl UserDirectory {
    fn insert(&self, caller: &Caller) {
        self.0.lock().unwrap().insert(caller.id, summary_for(caller));
    }

    fn get(&self, id: Uuid) -> Option<UserSummary> {
        self.0.lock().unwrap().get(&id).cloned()
    }

    fn get_or_placeholder(&self, id: Uuid) -> UserSummary {
        self.get(id).unwrap_or(UserSummary {
            id,
            email: format!("{id}@example.test"),
            name: "unknown".into(),
            role: Role::Candidate,
        })
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<Option<UserRow>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.email == email) {
            return Ok(None);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            password_hash: Some(password_hash.to_string()),
        };
        rows.push(row.clone());
        Ok(Some(row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryJobs {
    rows: Arc<Mutex<Vec<JobRecord>>>,
    directory: UserDirectory,
}

impl InMemoryJobs {
    pub fn register_poster(&self, recruiter: &Caller) {
        self.directory.insert(recruiter);
    }
}

#[async_trait]
impl JobRepository for InMemoryJobs {
    async fn create_job(
        &self,
        title: &str,
        description: &str,
        posted_by: Uuid,
    ) -> anyhow::Result<Uuid> {
        let poster = self
            .directory
            .get(posted_by)
            .ok_or_else(|| anyhow::anyhow!("unknown poster {posted_by}"))?;
        let record = JobRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: chrono::Utc::now(),
            posted_by: poster,
        };
        let id = record.id;
        self.rows.lock().unwrap().push(record);
        Ok(id)
    }

    async fn list_jobs(&self) -> anyhow::Result<Vec<JobRecord>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_job(&self, id: Uuid) -> anyhow::Result<Option<JobRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == id)
            .cloned())
    }

    async fn find_owned_job(
        &self,
        id: Uuid,
        recruiter: Uuid,
    ) -> anyhow::Result<Option<JobRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == id && j.posted_by.id == recruiter)
            .cloned())
    }
}

pub struct InMemoryApplications {
    rows: Mutex<Vec<ApplicationRecord>>,
    jobs: Arc<Mutex<Vec<JobRecord>>>,
    directory: UserDirectory,
}

impl InMemoryApplications {
    pub fn new(jobs: &InMemoryJobs) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            jobs: jobs.rows.clone(),
            directory: jobs.directory.clone(),
        }
    }

    /// Makes the candidate's summary resolvable in listed records.
    pub fn register_user(&self, user: &Caller) {
        self.directory.insert(user);
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplications {
    async fn insert_if_absent(&self, candidate: Uuid, job: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|a| a.candidate.id == candidate && a.job.id == job)
        {
            return Ok(false);
        }
        let job_record = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == job)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown job {job}"))?;
        rows.push(ApplicationRecord {
            id: Uuid::new_v4(),
            applied_at: chrono::Utc::now(),
            candidate: self.directory.get_or_placeholder(candidate),
            job: job_record,
        });
        Ok(true)
    }

    async fn list_for_candidate(&self, candidate: Uuid) -> anyhow::Result<Vec<ApplicationRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.candidate.id == candidate)
            .cloned()
            .collect())
    }

    async fn list_for_job(&self, job: Uuid) -> anyhow::Result<Vec<ApplicationRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.job.id == job)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryRevocations {
    jtis: Mutex<HashSet<Uuid>>,
}

#[async_trait]
impl RefreshTokenStore for InMemoryRevocations {
    async fn revoke(
        &self,
        jti: Uuid,
        _expires_at: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()> {
        self.jtis.lock().unwrap().insert(jti);
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> anyhow::Result<bool> {
        Ok(self.jtis.lock().unwrap().contains(&jti))
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        anyhow::bail!("smtp relay refused mail to {}", message.to)
    }
}
