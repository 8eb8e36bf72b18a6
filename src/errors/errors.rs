//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 인증 실패 자체(잘못된 비밀번호, 중복 계정 등)는 이 타입으로 표현하지 않습니다.
//! 그런 결과는 `AuthResult::Failure`로 사용자에게 전달되며, `AppError`는
//! 입력 검증 실패, 설정 누락, 외부 서비스 장애처럼 요청 자체를 처리할 수 없는
//! 경우에만 사용됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! fn require_email(email: &str) -> Result<(), AppError> {
//!     if email.is_empty() {
//!         return Err(AppError::ValidationError("Email is required".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 필수 설정 누락 또는 잘못된 설정 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 외부 서비스 에러 (502 Bad Gateway)
    ///
    /// 인증 프로바이더나 이메일 프로바이더 호출 실패 시 사용됩니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("No active session".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_external_service_error_response() {
        let error = AppError::ExternalServiceError("Resend unavailable".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_configuration_error_response() {
        let error = AppError::ConfigurationError("FIREBASE_API_KEY must be set".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_for_every_variant() {
        use actix_web::http::StatusCode;

        let cases = [
            (AppError::ValidationError(String::new()), StatusCode::BAD_REQUEST),
            (AppError::AuthenticationError(String::new()), StatusCode::UNAUTHORIZED),
            (AppError::ConfigurationError(String::new()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::ExternalServiceError(String::new()), StatusCode::BAD_GATEWAY),
            (AppError::InternalError(String::new()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{:?}", error);
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
