//! EmailJS REST API 발송 (`POST /api/v1.0/email/send`)
//!
//! EmailJS는 대시보드에 등록된 템플릿으로 메일을 만듭니다.
//! 템플릿은 `{{{message_html}}}`로 본문을 그대로 삽입해야 합니다.
//! 성공 응답은 본문이 `OK`인 텍스트이며 메시지 ID를 주지 않습니다.

use async_trait::async_trait;
use serde_json::json;
use crate::config::EmailJsSettings;
use crate::domain::models::{EmailMessage, SendReceipt};
use crate::errors::{AppError, AppResult};
use super::email_sender::{provider_error_message, EmailSender};

pub struct EmailJsSender {
    client: reqwest::Client,
    settings: EmailJsSettings,
}

/// `"Sketzo <onboarding@resend.dev>"` → `"Sketzo"`
fn sender_name(from: &str) -> &str {
    match from.split_once('<') {
        Some((name, _)) if !name.trim().is_empty() => name.trim(),
        _ => from.trim(),
    }
}

impl EmailJsSender {
    pub fn new(client: reqwest::Client, settings: EmailJsSettings) -> Self {
        Self { client, settings }
    }

    fn payload(&self, message: &EmailMessage) -> serde_json::Value {
        let mut payload = json!({
            "service_id": self.settings.service_id,
            "template_id": self.settings.template_id,
            "user_id": self.settings.public_key,
            "template_params": {
                "to_email": message.to,
                "to_name": message.to_name,
                "from_name": sender_name(&message.from),
                "subject": message.subject,
                "message_html": message.html,
            },
        });

        if let Some(private_key) = &self.settings.private_key {
            payload["accessToken"] = json!(private_key);
        }

        payload
    }
}

#[async_trait]
impl EmailSender for EmailJsSender {
    fn name(&self) -> &'static str {
        "emailjs"
    }

    async fn send(&self, message: &EmailMessage) -> AppResult<SendReceipt> {
        let url = format!("{}/api/v1.0/email/send", self.settings.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("EmailJS 요청 실패: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            log::error!("EmailJS 발송 거절 ({}): {}", status, body);
            return Err(AppError::ExternalServiceError(provider_error_message(status, &body)));
        }

        Ok(SendReceipt::default())
    }
}
