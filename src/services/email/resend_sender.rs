//! Resend REST API 발송 (`POST /emails`)

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use crate::config::ResendSettings;
use crate::domain::models::{EmailMessage, SendReceipt};
use crate::errors::{AppError, AppResult};
use super::email_sender::{provider_error_message, EmailSender};

#[derive(Debug, Deserialize)]
struct ResendResponse {
    #[serde(default)]
    id: Option<String>,
}

pub struct ResendSender {
    client: reqwest::Client,
    settings: ResendSettings,
}

impl ResendSender {
    pub fn new(client: reqwest::Client, settings: ResendSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl EmailSender for ResendSender {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, message: &EmailMessage) -> AppResult<SendReceipt> {
        let url = format!("{}/emails", self.settings.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.api_key)
            .json(&json!({
                "from": message.from,
                "to": [message.to],
                "subject": message.subject,
                "html": message.html,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Resend 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Resend 발송 거절 ({}): {}", status, body);
            return Err(AppError::ExternalServiceError(provider_error_message(status, &body)));
        }

        let body = response
            .json::<ResendResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Resend 응답 파싱 실패: {}", e)))?;

        Ok(SendReceipt { id: body.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sender(server: &MockServer) -> ResendSender {
        ResendSender::new(
            reqwest::Client::new(),
            ResendSettings { api_key: "re_test".to_string(), base_url: server.uri() },
        )
    }

    fn message() -> EmailMessage {
        EmailMessage {
            from: "Sketzo <onboarding@resend.dev>".to_string(),
            to: "ava@example.com".to_string(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
            to_name: "Ava".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_send_posts_message_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .and(body_partial_json(json!({ "to": ["ava@example.com"], "subject": "Hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_123" })))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = sender(&server).send(&message()).await.unwrap();
        assert_eq!(receipt.id.as_deref(), Some("msg_123"));
    }

    #[actix_web::test]
    async fn test_rejection_carries_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "statusCode": 403,
                "name": "validation_error",
                "message": "The sketzo.tech domain is not verified."
            })))
            .mount(&server)
            .await;

        let err = sender(&server).send(&message()).await.unwrap_err();
        match err {
            AppError::ExternalServiceError(message) => {
                assert_eq!(message, "The sketzo.tech domain is not verified.")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
