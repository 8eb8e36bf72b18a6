//! Authentication HTTP Handlers
//!
//! 랜딩 페이지의 로그인/가입 폼과 소셜 로그인 버튼이 호출하는 엔드포인트입니다.
//! 인증 결과는 실패하더라도 `{success: false, error}` 형태의 본문으로 돌려주며,
//! 상태 코드는 실패 종류(가입 400, 로그인 401)에 맞춰 설정합니다.
//!
//! 로그인에 성공하면 세션 핸들을 HttpOnly `ea_session` 쿠키로 내려줍니다.
//! `sign-out`, `me`, `welcome/resend`는 이 쿠키로만 세션을 찾으며, 쿠키가 없으면 401입니다.
//!
//! # Endpoints
//!
//! - `POST /api/v1/auth/sign-in`
//! - `POST /api/v1/auth/sign-up`
//! - `GET /api/v1/auth/oauth/{provider}/start`
//! - `GET /api/v1/auth/oauth/{provider}/callback`
//! - `POST /api/v1/auth/sign-out`
//! - `GET /api/v1/auth/me`
//! - `POST /api/v1/auth/welcome/resend`
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::container::AppContext;
use crate::domain::{
    Confirmation, CurrentUserResponse, OAuthCallback, OAuthCallbackQuery, OAuthProvider, OAuthStartQuery,
    SessionId, SignInRequest, SignUpRequest,
};
use crate::errors::AppError;
use crate::services::onboarding::AttemptReport;

/// 세션 핸들 쿠키 이름
pub const SESSION_COOKIE: &str = "ea_session";

/// 쿠키는 인증 API에만 전송됩니다
const SESSION_COOKIE_PATH: &str = "/api/v1/auth";

fn session_handle(req: &HttpRequest) -> Option<SessionId> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .map(SessionId::from_raw)
}

fn require_session(req: &HttpRequest, message: &str) -> Result<SessionId, AppError> {
    session_handle(req).ok_or_else(|| AppError::AuthenticationError(message.to_string()))
}

fn session_cookie(ctx: &AppContext, session_id: &SessionId) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.as_str().to_string())
        .path(SESSION_COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(ctx.config.environment.is_production())
        .finish()
}

/// 시도 결과를 응답으로 만들고, 세션이 저장됐으면 쿠키를 설정합니다.
fn attempt_response(ctx: &AppContext, status: StatusCode, report: AttemptReport) -> HttpResponse {
    let mut response = HttpResponse::build(status);
    if let Some(session_id) = &report.session_id {
        response.cookie(session_cookie(ctx, session_id));
    }
    response.json(report.into_response())
}

/// 요청 플래그가 켜져 있으면 발송 결과를 기다리고, 아니면 설정된 기본 모드를 따릅니다.
fn confirmation_for(ctx: &AppContext, await_welcome: bool) -> Confirmation {
    if await_welcome {
        Confirmation::Await
    } else {
        ctx.config.welcome.confirmation
    }
}

fn parse_provider(raw: &str) -> Result<OAuthProvider, AppError> {
    OAuthProvider::from_str(raw).map_err(AppError::ValidationError)
}

/// 이메일 로그인 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/sign-in`
#[post("/sign-in")]
pub async fn sign_in(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    payload: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let confirmation = confirmation_for(&ctx, payload.await_welcome);
    let current = session_handle(&req);
    let report = ctx
        .orchestrator
        .sign_in(current.as_ref(), &payload.email, &payload.password, confirmation)
        .await;

    log::info!("로그인 시도 {} → {:?}", report.attempt_id, report.state);

    let status = if report.result.is_success() { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    Ok(attempt_response(&ctx, status, report))
}

/// 이메일 가입 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/sign-up`
#[post("/sign-up")]
pub async fn sign_up(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let confirmation = confirmation_for(&ctx, payload.await_welcome);
    let current = session_handle(&req);
    let report = ctx
        .orchestrator
        .sign_up(current.as_ref(), &payload.name, &payload.email, &payload.password, confirmation)
        .await;

    log::info!("가입 시도 {} → {:?}", report.attempt_id, report.state);

    let status = if report.result.is_success() { StatusCode::CREATED } else { StatusCode::BAD_REQUEST };
    Ok(attempt_response(&ctx, status, report))
}

/// OAuth 로그인 시작 핸들러
///
/// 프로바이더 인증 페이지 주소를 돌려줍니다. 페이지는 이 주소로 이동합니다.
///
/// # Endpoint
/// `GET /api/v1/auth/oauth/{provider}/start?redirect_to={callback}`
#[get("/oauth/{provider}/start")]
pub async fn oauth_start(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    query: web::Query<OAuthStartQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let redirect_to = query
        .redirect_to
        .clone()
        .unwrap_or_else(|| ctx.config.oauth.redirect_uri_for(provider.as_str()));

    let result = ctx.orchestrator.begin_oauth(provider, &redirect_to).await;

    let status = if result.success { StatusCode::OK } else { StatusCode::BAD_REQUEST };
    Ok(HttpResponse::build(status).json(result))
}

/// OAuth 콜백 처리 핸들러
///
/// 사용자가 동의 화면을 닫거나 거부하면 `error` 쿼리와 함께 호출됩니다.
///
/// # Endpoint
/// `GET /api/v1/auth/oauth/{provider}/callback?state={state}&code={code}`
#[get("/oauth/{provider}/callback")]
pub async fn oauth_callback(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    parse_provider(&path)?;
    query.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let query = query.into_inner();
    let confirmation = confirmation_for(&ctx, query.await_welcome);
    let callback = OAuthCallback {
        state: query.state,
        callback_url: req.full_url().to_string(),
        code: query.code,
        error: query.error,
        error_description: query.error_description,
    };

    let current = session_handle(&req);
    let report = ctx.orchestrator.complete_oauth(current.as_ref(), &callback, confirmation).await;
    log::info!("OAuth 시도 {} → {:?}", report.attempt_id, report.state);

    let status = if report.result.is_success() { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    Ok(attempt_response(&ctx, status, report))
}

/// 로그아웃 핸들러
///
/// 호출자의 세션만 끝내고 쿠키를 지웁니다.
///
/// # Endpoint
/// `POST /api/v1/auth/sign-out`
#[post("/sign-out")]
pub async fn sign_out(ctx: web::Data<AppContext>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let session_id = require_session(&req, "Not signed in")?;
    let result = ctx.auth.sign_out(&session_id).await;

    let mut removal = session_cookie(&ctx, &session_id);
    removal.make_removal();

    Ok(HttpResponse::Ok().cookie(removal).json(result))
}

/// 호출자 세션의 사용자 조회 핸들러
///
/// # Endpoint
/// `GET /api/v1/auth/me`
#[get("/me")]
pub async fn current_user(ctx: web::Data<AppContext>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let session_id = require_session(&req, "Not signed in")?;
    let user = ctx
        .auth
        .get_current_user(&session_id)
        .await
        .ok_or_else(|| AppError::AuthenticationError("Not signed in".to_string()))?;

    Ok(HttpResponse::Ok().json(CurrentUserResponse { user }))
}

/// 환영 메일 재발송 핸들러
///
/// # Endpoint
/// `POST /api/v1/auth/welcome/resend`
#[post("/welcome/resend")]
pub async fn resend_welcome(ctx: web::Data<AppContext>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    const NOT_SIGNED_IN: &str = "User must be signed in to resend welcome email.";

    let session_id = require_session(&req, NOT_SIGNED_IN)?;
    let outcome = ctx
        .orchestrator
        .resend_welcome(&session_id)
        .await
        .ok_or_else(|| AppError::AuthenticationError(NOT_SIGNED_IN.to_string()))?;

    if outcome.sent {
        Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Email sent!" })))
    } else {
        Err(AppError::ExternalServiceError(outcome.error.unwrap_or_default()))
    }
}
