//! 인증 요청관련 DTO
//!
//! 이메일 형식이나 비밀번호 정책은 인증 프로바이더가 판정하므로 여기서는
//! 길이 상한만 검사합니다. 빈 값은 인증 어댑터가 사용자 문장으로 돌려줍니다.
use serde::Deserialize;
use validator::Validate;

/// 이메일 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(max = 320, message = "이메일이 너무 깁니다"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(max = 4096, message = "비밀번호가 너무 깁니다"))]
    #[serde(default)]
    pub password: String,

    /// `true`이면 환영 메일 발송 결과까지 기다립니다
    #[serde(default)]
    pub await_welcome: bool,
}

/// 이메일 가입 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(max = 100, message = "이름은 100자 이하여야 합니다"))]
    #[serde(default)]
    pub name: String,

    #[validate(length(max = 320, message = "이메일이 너무 깁니다"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(max = 4096, message = "비밀번호가 너무 깁니다"))]
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub await_welcome: bool,
}

/// OAuth 시작 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct OAuthStartQuery {
    pub redirect_to: Option<String>,
}

/// OAuth 콜백 쿼리 파라미터 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, message = "State가 필요합니다"))]
    #[serde(default)]
    pub state: String,

    pub code: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,

    #[serde(default)]
    pub await_welcome: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_defaults() {
        let req: SignInRequest = serde_json::from_str(r#"{"email":"ava@example.com"}"#).unwrap();

        assert_eq!(req.password, "");
        assert!(!req.await_welcome);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_sign_up_request_rejects_oversized_name() {
        let req = SignUpRequest {
            name: "a".repeat(101),
            email: "ava@example.com".to_string(),
            password: "secret1".to_string(),
            await_welcome: false,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_callback_query_requires_state() {
        let query: OAuthCallbackQuery = serde_json::from_str(r#"{"code":"abc"}"#).unwrap();
        assert!(query.validate().is_err());
    }
}
