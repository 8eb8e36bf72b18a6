//! 트랜잭션 이메일 메시지

use serde::Serialize;

/// 이메일 프로바이더로 전달되는 유일한 발송 계약 (`{from, to, subject, html}`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    /// 수신자 표시 이름 (EmailJS 템플릿 파라미터로만 사용)
    #[serde(skip)]
    pub to_name: String,
}

/// 프로바이더 발송 성공 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SendReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}
