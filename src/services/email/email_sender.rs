//! 트랜잭션 이메일 프로바이더 추상화

use async_trait::async_trait;
use crate::domain::models::{EmailMessage, SendReceipt};
use crate::errors::AppResult;

/// `{from, to, subject, html}` 메시지를 보내는 프로바이더
///
/// 전송 실패와 프로바이더 거절은 모두 `AppError::ExternalServiceError`로 보고합니다.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 로그와 헬스 체크에 표시되는 프로바이더 이름
    fn name(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> AppResult<SendReceipt>;
}

/// 프로바이더 에러 응답 본문에서 메시지를 꺼냅니다.
pub(crate) fn provider_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
    });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => format!("email provider returned {}", status),
    }
}
