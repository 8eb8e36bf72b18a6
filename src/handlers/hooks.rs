//! Identity Lifecycle Hook Handlers
//!
//! 인증 프로바이더가 새 신원을 만들었을 때 호출하는 백엔드 트리거입니다
//! (Firebase `onCreate` 함수, Supabase Auth Hook).
//! `HOOK_SECRET`이 설정되어 있으면 `Authorization: Bearer {secret}` 헤더를 요구합니다.
use actix_web::http::header;
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use sha2::{Digest, Sha256};
use crate::core::container::AppContext;
use crate::domain::IdentityCreatedPayload;
use crate::domain::WelcomeStatus;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::services::email::Notifier;

/// 길이와 내용에 관계없이 같은 시간이 걸리도록 다이제스트를 바이트 단위로 비교합니다.
fn digest_eq(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    provided
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn verify_secret(req: &HttpRequest, secret: Option<&str>) -> Result<(), AppError> {
    let Some(secret) = secret else {
        return Ok(());
    };

    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if digest_eq(token, secret) => Ok(()),
        _ => Err(AppError::AuthenticationError("Invalid hook secret".to_string())),
    }
}

/// 신원 생성 훅 핸들러
///
/// 이메일이 없는 신원(예: 전화번호 가입)은 발송 없이 `skipped`로 응답합니다.
///
/// # Endpoint
/// `POST /api/hooks/identity-created`
#[post("/identity-created")]
pub async fn identity_created(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
    payload: web::Json<IdentityCreatedPayload>,
) -> Result<HttpResponse, AppError> {
    verify_secret(&req, ctx.config.hook_secret.as_deref())?;

    let payload = payload.into_inner();
    let Some(email) = payload.email else {
        log::info!("신원 {}에 이메일이 없어 환영 메일을 건너뜁니다", payload.uid);
        return Ok(HttpResponse::Ok().json(json!({ "uid": payload.uid, "welcome": WelcomeStatus::Skipped })));
    };

    let user = User::new(payload.uid, email, ctx.auth.backend_kind()).with_display_name(payload.display_name);
    let outcome = ctx.notifier.notify(&user).await;

    Ok(HttpResponse::Ok().json(json!({ "uid": user.uid, "welcome": WelcomeStatus::Completed(outcome) })))
}
