pub mod list_jobs;
pub mod post_job;
