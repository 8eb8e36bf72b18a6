//! 환영 메일 알림
//!
//! 인증된 사용자에게 환영 메일을 한 통 보냅니다. 어떤 실패도 호출자에게 에러로
//! 전파하지 않고 [`EmailDispatchOutcome`]으로 돌려줍니다.

use std::sync::Arc;
use async_trait::async_trait;
use crate::domain::entities::users::User;
use crate::domain::models::{EmailDispatchOutcome, EmailMessage, MISSING_RECIPIENT};
use crate::errors::AppError;
use super::email_sender::EmailSender;
use super::welcome_template::{self, WELCOME_SUBJECT};

/// 사용자에게 환영 메일을 보내는 알림기
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user: &User) -> EmailDispatchOutcome;
}

pub struct WelcomeNotifier {
    sender: Option<Arc<dyn EmailSender>>,
    from: String,
}

impl WelcomeNotifier {
    /// `sender`가 `None`이면 모든 발송이 I/O 없이 "not configured"로 끝납니다.
    pub fn new(sender: Option<Arc<dyn EmailSender>>, from: impl Into<String>) -> Self {
        Self { sender, from: from.into() }
    }

    pub fn is_configured(&self) -> bool {
        self.sender.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.sender.as_ref().map(|sender| sender.name())
    }

    /// 수신자 주소와 이름으로 환영 메일을 보냅니다.
    ///
    /// 공개 발송 엔드포인트처럼 세션 사용자가 아닌 임의 주소로 보낼 때 사용합니다.
    pub async fn send_welcome(&self, email: &str, display_name: &str) -> EmailDispatchOutcome {
        let Some(sender) = &self.sender else {
            log::warn!("이메일 프로바이더가 설정되지 않아 환영 메일을 건너뜁니다");
            return EmailDispatchOutcome::not_configured();
        };

        let email = email.trim();
        if email.is_empty() {
            log::warn!("수신 이메일이 없어 환영 메일을 건너뜁니다");
            return EmailDispatchOutcome::failed(MISSING_RECIPIENT);
        }

        let html = welcome_template::render(display_name);
        let message = EmailMessage {
            from: self.from.clone(),
            to: email.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            to_name: display_name.trim().to_string(),
            html,
        };

        match sender.send(&message).await {
            Ok(receipt) => {
                log::info!(
                    "환영 메일 발송 완료 ({}): {}",
                    sender.name(),
                    receipt.id.as_deref().unwrap_or("-")
                );
                EmailDispatchOutcome::sent(receipt.id)
            }
            Err(e) => {
                log::error!("환영 메일 발송 실패 ({}): {}", sender.name(), e);
                let error = match e {
                    AppError::ExternalServiceError(message) => message,
                    other => other.to_string(),
                };
                EmailDispatchOutcome::failed(error)
            }
        }
    }
}

#[async_trait]
impl Notifier for WelcomeNotifier {
    async fn notify(&self, user: &User) -> EmailDispatchOutcome {
        self.send_welcome(&user.email, user.display_name_or_default()).await
    }
}
