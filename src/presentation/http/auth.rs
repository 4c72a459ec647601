use axum::{Router, extract::State, http::StatusCode, routing::post};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::access::Caller;
use crate::application::use_cases::auth::logout::Logout;
use crate::application::use_cases::auth::refresh::RefreshAccess;
use crate::application::use_cases::auth::signin::{Signin, SigninRequest};
use crate::application::use_cases::auth::signup::{Signup, SignupRequest};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::extract::Json;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub status: &'static str,
    pub user_id: Uuid,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SigninBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SigninResponse {
    pub status: &'static str,
    pub user_id: Uuid,
    pub name: String,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshTokenBody {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub access: String,
}

// --- JWT contract ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    fn ttl_secs(&self, cfg: &Config) -> i64 {
        match self {
            TokenKind::Access => cfg.access_token_ttl_secs,
            TokenKind::Refresh => cfg.refresh_token_ttl_secs,
        }
    }
}

/// `kind` keeps the two token classes apart: a refresh token never
/// authenticates a request and an access token never reaches the
/// refresh exchange.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub jti: Uuid,
    pub kind: String,
}

pub(crate) fn issue_token(
    cfg: &Config,
    user_id: Uuid,
    kind: TokenKind,
) -> Result<String, ApiError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + kind.ttl_secs(cfg)) as usize,
        jti: Uuid::new_v4(),
        kind: kind.as_str().to_string(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(anyhow::anyhow!(e)))
}

/// A token that does not parse as a JWT at all, versus one that parses but
/// fails verification (bad signature, expired, wrong kind). Logout reports
/// the former as a validation error and only the latter as unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenError {
    Malformed,
    Invalid,
}

fn decode_claims(cfg: &Config, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            TokenError::Malformed
        }
        _ => TokenError::Invalid,
    })?;
    if data.claims.kind != kind.as_str() {
        return Err(TokenError::Invalid);
    }
    Ok(data.claims)
}

pub(crate) fn decode_token(cfg: &Config, token: &str, kind: TokenKind) -> Result<Claims, ApiError> {
    decode_claims(cfg, token, kind).map_err(|_| ApiError::unauthorized("Invalid or expired token"))
}

/// Decodes the refresh token from a logout body: a malformed token is a
/// bad request, a well-formed but unverifiable one is unauthorized.
pub(crate) fn decode_logout_refresh(cfg: &Config, token: &str) -> Result<Claims, ApiError> {
    decode_claims(cfg, token, TokenKind::Refresh).map_err(|e| match e {
        TokenError::Malformed => ApiError::validation("Invalid refresh token"),
        TokenError::Invalid => ApiError::unauthorized("Invalid or expired token"),
    })
}

fn issue_token_pair(cfg: &Config, user_id: Uuid) -> Result<(String, String), ApiError> {
    Ok((
        issue_token(cfg, user_id, TokenKind::Access)?,
        issue_token(cfg, user_id, TokenKind::Refresh)?,
    ))
}

// --- Bearer extractor ---

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(|t| Bearer(t.to_string()))
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))
    }
}

/// Validates the access token and loads the caller's account, so handlers
/// and use cases see a role-bearing identity rather than a raw token.
pub(crate) async fn authenticate(ctx: &AppContext, bearer: Bearer) -> Result<Caller, ApiError> {
    let claims = decode_token(&ctx.cfg, &bearer.0, TokenKind::Access)?;
    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    let row = ctx
        .user_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;
    Ok(Caller {
        id: row.id,
        email: row.email,
        name: row.name,
        role: row.role,
    })
}

// --- Handlers ---

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/signup", tag = "Auth", request_body = SignupBody, security(()), responses(
    (status = 201, body = SignupResponse)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let repo = ctx.user_repo();
    let uc = Signup {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&SignupRequest {
            name: body.name,
            email: body.email,
            password: body.password,
            user_type: body.user_type,
        })
        .await?;
    let (access, refresh) = issue_token_pair(&ctx.cfg, user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            status: "created",
            user_id: user.id,
            access,
            refresh,
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/signin", tag = "Auth", request_body = SigninBody, security(()), responses(
    (status = 200, body = SigninResponse)
))]
pub async fn signin(
    State(ctx): State<AppContext>,
    Json(body): Json<SigninBody>,
) -> Result<Json<SigninResponse>, ApiError> {
    let repo = ctx.user_repo();
    let uc = Signin {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&SigninRequest {
            email: body.email,
            password: body.password,
        })
        .await?;
    let (access, refresh) = issue_token_pair(&ctx.cfg, user.id)?;
    Ok(Json(SigninResponse {
        status: "logged_in",
        user_id: user.id,
        name: user.name,
        access,
        refresh,
    }))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", request_body = RefreshTokenBody, responses(
    (status = 205, body = LogoutResponse)
))]
pub async fn logout(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(body): Json<RefreshTokenBody>,
) -> Result<(StatusCode, Json<LogoutResponse>), ApiError> {
    authenticate(&ctx, bearer).await?;
    let token = body
        .refresh
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Refresh token required"))?;
    let claims = decode_logout_refresh(&ctx.cfg, token)?;
    let expires_at = chrono::DateTime::from_timestamp(claims.exp as i64, 0)
        .unwrap_or_else(chrono::Utc::now);

    let store = ctx.refresh_tokens();
    Logout {
        tokens: store.as_ref(),
    }
    .execute(claims.jti, expires_at)
    .await?;

    Ok((
        StatusCode::RESET_CONTENT,
        Json(LogoutResponse {
            status: "logged_out",
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/refresh", tag = "Auth", request_body = RefreshTokenBody, security(()), responses(
    (status = 200, body = RefreshResponse)
))]
pub async fn refresh(
    State(ctx): State<AppContext>,
    Json(body): Json<RefreshTokenBody>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = body
        .refresh
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Refresh token required"))?;
    let claims = decode_token(&ctx.cfg, token, TokenKind::Refresh)?;

    let store = ctx.refresh_tokens();
    RefreshAccess {
        tokens: store.as_ref(),
    }
    .execute(claims.jti)
    .await?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    let access = issue_token(&ctx.cfg, user_id, TokenKind::Access)?;
    Ok(Json(RefreshResponse { access }))
}
