use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use jobboard_api::application::ports::mailer::Mailer;
use jobboard_api::bootstrap::app_context::{AppContext, AppServices};
use jobboard_api::bootstrap::config::Config;
use jobboard_api::infrastructure::db::repositories::application_repository_sqlx::SqlxApplicationRepository;
use jobboard_api::infrastructure::db::repositories::job_repository_sqlx::SqlxJobRepository;
use jobboard_api::infrastructure::db::repositories::revoked_token_repository_sqlx::SqlxRevokedTokenRepository;
use jobboard_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use jobboard_api::infrastructure::email::{HttpApiMailer, NoopMailer};

#[derive(OpenApi)]
#[openapi(
    paths(
        jobboard_api::presentation::http::auth::signup,
        jobboard_api::presentation::http::auth::signin,
        jobboard_api::presentation::http::auth::logout,
        jobboard_api::presentation::http::auth::refresh,
        jobboard_api::presentation::http::jobs::list_jobs,
        jobboard_api::presentation::http::jobs::post_job,
        jobboard_api::presentation::http::applications::apply_to_job,
        jobboard_api::presentation::http::applications::list_my_applications,
        jobboard_api::presentation::http::applications::list_job_applicants,
        jobboard_api::presentation::http::health::health,
    ),
    components(schemas(
        jobboard_api::domain::users::Role,
        jobboard_api::presentation::http::auth::SignupBody,
        jobboard_api::presentation::http::auth::SignupResponse,
        jobboard_api::presentation::http::auth::SigninBody,
        jobboard_api::presentation::http::auth::SigninResponse,
        jobboard_api::presentation::http::auth::RefreshTokenBody,
        jobboard_api::presentation::http::auth::LogoutResponse,
        jobboard_api::presentation::http::auth::RefreshResponse,
        jobboard_api::presentation::http::jobs::UserResponse,
        jobboard_api::presentation::http::jobs::JobResponse,
        jobboard_api::presentation::http::jobs::PostJobBody,
        jobboard_api::presentation::http::jobs::PostJobResponse,
        jobboard_api::presentation::http::applications::ApplicationResponse,
        jobboard_api::presentation::http::applications::ApplyResponse,
        jobboard_api::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Auth", description = "Signup, signin and token lifecycle"),
        (name = "Jobs", description = "Job postings"),
        (name = "Applications", description = "Job applications"),
        (name = "Health", description = "System health checks")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "jobboard_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting job board backend");

    // Database
    let pool = jobboard_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    jobboard_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let job_repo = Arc::new(SqlxJobRepository::new(pool.clone()));
    let application_repo = Arc::new(SqlxApplicationRepository::new(pool.clone()));
    let refresh_tokens = Arc::new(SqlxRevokedTokenRepository::new(pool.clone()));

    let mailer: Arc<dyn Mailer> = match cfg.mail_api_url.as_deref() {
        Some(endpoint) => Arc::new(HttpApiMailer::new(
            endpoint,
            cfg.mail_api_token.clone(),
            &cfg.mail_from,
        )),
        None => {
            tracing::warn!("MAIL_API_URL not set, application notifications are disabled");
            Arc::new(NoopMailer)
        }
    };

    let services = AppServices::new(user_repo, job_repo, application_repo, refresh_tokens, mailer);
    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true),
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
            .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
            .allow_credentials(true),
    };

    let app = Router::new()
        .nest(
            "/api",
            jobboard_api::presentation::http::health::routes(pool.clone()),
        )
        .nest(
            "/api/auth",
            jobboard_api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/api",
            jobboard_api::presentation::http::jobs::routes(ctx.clone()),
        )
        .nest(
            "/api",
            jobboard_api::presentation::http::applications::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}
