//! Welcome Email Trigger Handlers
//!
//! 페이지나 외부 훅이 직접 호출하는 환영 메일 발송 엔드포인트입니다.
//! 응답 본문은 프론트엔드가 기대하는 `{error}` / `{success, data}` 형태를 그대로 유지하므로
//! `AppError` 변환을 거치지 않고 직접 만듭니다.
//!
//! # Endpoint
//!
//! `POST /api/send-welcome-email` (`OPTIONS`는 CORS preflight, 그 외 메서드는 405)
use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::core::container::AppContext;
use crate::domain::WelcomeEmailRequest;
use crate::domain::entities::users::DEFAULT_DISPLAY_NAME;

/// 환영 메일 발송 핸들러
///
/// 본문이 JSON이 아니거나 비어있어도 "Email is required"로 응답합니다.
pub async fn send_welcome_email(
    ctx: web::Data<AppContext>,
    body: web::Bytes,
) -> HttpResponse {
    if !ctx.notifier.is_configured() {
        log::error!("환영 메일 요청 거부: 이메일 프로바이더가 설정되지 않음");
        return HttpResponse::InternalServerError().json(json!({ "error": "Email service not configured" }));
    }

    let request: WelcomeEmailRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(email) = request.email else {
        return HttpResponse::BadRequest().json(json!({ "error": "Email is required" }));
    };
    let name = request.name.unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

    let outcome = ctx.notifier.send_welcome(&email, &name).await;

    if outcome.sent {
        HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "id": outcome.message_id }
        }))
    } else {
        HttpResponse::InternalServerError().json(json!({ "error": outcome.error.unwrap_or_default() }))
    }
}

/// CORS preflight 응답
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// POST 이외의 메서드
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(json!({ "error": "Method not allowed" }))
}
