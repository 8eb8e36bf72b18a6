//! 인증 응답 DTO

use serde::Serialize;
use crate::domain::entities::users::User;
use crate::domain::models::{AuthResult, EmailDispatchOutcome};

/// 환영 메일 처리 상태
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WelcomeStatus {
    /// 발송 조건에 해당하지 않거나 인증이 실패함
    Skipped,
    /// 백그라운드 작업으로 예약됨
    Scheduled,
    /// 발송을 기다린 결과
    Completed(EmailDispatchOutcome),
}

/// 로그인/가입/OAuth 완료 응답
///
/// ```json
/// { "success": true, "user": { "uid": "..", "email": ".." }, "welcome": { "status": "scheduled" } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub result: AuthResult,
    pub welcome: WelcomeStatus,
}

/// 현재 세션 사용자 응답
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_flattens_result() {
        let response = AuthResponse {
            result: AuthResult::failure("No account found with this email."),
            welcome: WelcomeStatus::Skipped,
        };
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "No account found with this email.");
        assert_eq!(json["welcome"]["status"], "skipped");
    }

    #[test]
    fn test_completed_welcome_status_shape() {
        let status = WelcomeStatus::Completed(EmailDispatchOutcome::not_configured());
        let json = serde_json::to_value(status).unwrap();

        assert_eq!(json, serde_json::json!({"status": "completed", "sent": false, "error": "not configured"}));
    }
}
