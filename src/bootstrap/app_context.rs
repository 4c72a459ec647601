use std::sync::Arc;

use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::ports::job_repository::JobRepository;
use crate::application::ports::mailer::Mailer;
use crate::application::ports::token_store::RefreshTokenStore;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    job_repo: Arc<dyn JobRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    mailer: Arc<dyn Mailer>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        job_repo: Arc<dyn JobRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            user_repo,
            job_repo,
            application_repo,
            refresh_tokens,
            mailer,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn job_repo(&self) -> Arc<dyn JobRepository> {
        self.services.job_repo.clone()
    }

    pub fn application_repo(&self) -> Arc<dyn ApplicationRepository> {
        self.services.application_repo.clone()
    }

    pub fn refresh_tokens(&self) -> Arc<dyn RefreshTokenStore> {
        self.services.refresh_tokens.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.services.mailer.clone()
    }
}
