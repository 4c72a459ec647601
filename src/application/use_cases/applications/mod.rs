pub mod apply_to_job;
pub mod list_job_applicants;
pub mod list_my_applications;
