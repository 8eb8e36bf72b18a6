//! 환영 메일 발송 결과

use serde::Serialize;

/// 발송 설정이 없을 때의 에러 문자열
pub const NOT_CONFIGURED: &str = "not configured";

/// 수신 이메일이 비어 있을 때의 에러 문자열
pub const MISSING_RECIPIENT: &str = "missing recipient";

/// 환영 메일 발송 결과
///
/// 로그로 남길 뿐 사용자에게 실패로 노출하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailDispatchOutcome {
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl EmailDispatchOutcome {
    pub fn sent(message_id: Option<String>) -> Self {
        Self { sent: true, error: None, message_id }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { sent: false, error: Some(error.into()), message_id: None }
    }

    pub fn not_configured() -> Self {
        Self::failed(NOT_CONFIGURED)
    }

    pub fn is_not_configured(&self) -> bool {
        !self.sent && self.error.as_deref() == Some(NOT_CONFIGURED)
    }
}
