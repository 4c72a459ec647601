use std::sync::Arc;

use uuid::Uuid;

use crate::application::access::{Caller, RoleMismatch, require_role};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::ports::job_repository::{JobRecord, JobRepository};
use crate::application::ports::mailer::{EmailMessage, Mailer};
use crate::domain::users::Role;

pub struct ApplyToJob<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub jobs: &'a J,
    pub applications: &'a A,
    pub mailer: Arc<dyn Mailer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    AlreadyApplied,
}

#[derive(thiserror::Error, Debug)]
pub enum ApplyError {
    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),
    #[error("job not found")]
    JobNotFound,
    #[error("failed to record application")]
    Repo(#[source] anyhow::Error),
}

impl<'a, J, A> ApplyToJob<'a, J, A>
where
    J: JobRepository + ?Sized,
    A: ApplicationRepository + ?Sized,
{
    pub async fn execute(&self, caller: &Caller, job_id: Uuid) -> Result<ApplyOutcome, ApplyError> {
        require_role(caller, Role::Candidate)?;

        let job = self
            .jobs
            .find_job(job_id)
            .await
            .map_err(ApplyError::Repo)?
            .ok_or(ApplyError::JobNotFound)?;

        let created = self
            .applications
            .insert_if_absent(caller.id, job_id)
            .await
            .map_err(ApplyError::Repo)?;
        if !created {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        // Best-effort notifications. The response never waits on them and
        // send failures are only logged.
        let messages = notification_messages(caller, &job);
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            for message in messages {
                if let Err(err) = mailer.send(&message).await {
                    tracing::warn!(error = ?err, to = %message.to, "application notification failed");
                }
            }
        });

        Ok(ApplyOutcome::Applied)
    }
}

fn notification_messages(candidate: &Caller, job: &JobRecord) -> [EmailMessage; 2] {
    let to_candidate = EmailMessage {
        to: candidate.email.clone(),
        subject: format!("Application Submitted: {}", job.title),
        body: format!(
            "Dear {},\n\nYou have successfully applied to the job '{}'.\n\n\
             Job Description:\n{}\n\nRecruiter: {}\n\
             Thank you for using our platform.\n\nBest regards,\nJob Portal Team",
            candidate.name, job.title, job.description, job.posted_by.name,
        ),
    };
    let to_recruiter = EmailMessage {
        to: job.posted_by.email.clone(),
        subject: format!("You have received a new application for '{}'", job.title),
        body: format!(
            "Dear {},\n\nYou have received a new application for your job posting '{}'.\n\n\
             Candidate: {} ({})\nThank you for using our platform.\n\n\
             Best regards,\nJob Portal Team",
            job.posted_by.name, job.title, candidate.name, candidate.email,
        ),
    };
    [to_candidate, to_recruiter]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FailingMailer, InMemoryApplications, InMemoryJobs, RecordingMailer, caller,
    };

    struct Fixture {
        jobs: InMemoryJobs,
        applications: InMemoryApplications,
        recruiter: Caller,
        job_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let jobs = InMemoryJobs::default();
        let recruiter = caller(Role::Recruiter);
        jobs.register_poster(&recruiter);
        let job_id = jobs
            .create_job("Engineer", "Builds things", recruiter.id)
            .await
            .unwrap();
        let applications = InMemoryApplications::new(&jobs);
        Fixture {
            jobs,
            applications,
            recruiter,
            job_id,
        }
    }

    async fn settle() {
        // Lets the spawned notification task run to completion.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn first_apply_creates_and_notifies_both_parties() {
        let fx = fixture().await;
        let candidate = caller(Role::Candidate);
        let mailer = Arc::new(RecordingMailer::default());
        let uc = ApplyToJob {
            jobs: &fx.jobs,
            applications: &fx.applications,
            mailer: mailer.clone(),
        };

        let outcome = uc.execute(&candidate, fx.job_id).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);
        settle().await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, candidate.email);
        assert!(sent[0].subject.contains("Engineer"));
        assert_eq!(sent[1].to, fx.recruiter.email);
    }

    #[tokio::test]
    async fn second_apply_is_idempotent_and_sends_no_mail() {
        let fx = fixture().await;
        let candidate = caller(Role::Candidate);
        let mailer = Arc::new(RecordingMailer::default());
        let uc = ApplyToJob {
            jobs: &fx.jobs,
            applications: &fx.applications,
            mailer: mailer.clone(),
        };

        assert_eq!(
            uc.execute(&candidate, fx.job_id).await.unwrap(),
            ApplyOutcome::Applied
        );
        settle().await;
        assert_eq!(
            uc.execute(&candidate, fx.job_id).await.unwrap(),
            ApplyOutcome::AlreadyApplied
        );
        settle().await;

        assert_eq!(fx.applications.count(), 1);
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn recruiter_cannot_apply() {
        let fx = fixture().await;
        let uc = ApplyToJob {
            jobs: &fx.jobs,
            applications: &fx.applications,
            mailer: Arc::new(RecordingMailer::default()),
        };

        let err = uc.execute(&fx.recruiter, fx.job_id).await.unwrap_err();
        assert!(matches!(err, ApplyError::Forbidden(_)));
        assert_eq!(fx.applications.count(), 0);
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let fx = fixture().await;
        let uc = ApplyToJob {
            jobs: &fx.jobs,
            applications: &fx.applications,
            mailer: Arc::new(RecordingMailer::default()),
        };

        let err = uc
            .execute(&caller(Role::Candidate), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplyError::JobNotFound));
    }

    #[tokio::test]
    async fn mail_failure_does_not_affect_outcome() {
        let fx = fixture().await;
        let uc = ApplyToJob {
            jobs: &fx.jobs,
            applications: &fx.applications,
            mailer: Arc::new(FailingMailer),
        };

        let outcome = uc.execute(&caller(Role::Candidate), fx.job_id).await.unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);
        settle().await;
        assert_eq!(fx.applications.count(), 1);
    }
}
