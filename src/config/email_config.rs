//! # Email Configuration Module
//!
//! 환영 메일을 보낼 트랜잭션 이메일 프로바이더 설정입니다.
//! 선택된 프로바이더의 자격 증명이 없으면 발송기는 "설정되지 않음" 상태가 되고,
//! 환영 메일은 네트워크 호출 없이 건너뜁니다. 이는 가입 흐름을 막지 않습니다.
//!
//! ```bash
//! export EMAIL_PROVIDER="resend"              # resend | emailjs
//! export EMAIL_FROM="Sketzo <onboarding@resend.dev>"
//! export RESEND_API_KEY="re_..."
//!
//! # 또는
//! export EMAIL_PROVIDER="emailjs"
//! export EMAILJS_SERVICE_ID="service_..."
//! export EMAILJS_TEMPLATE_ID="template_..."
//! export EMAILJS_PUBLIC_KEY="..."
//! export EMAILJS_PRIVATE_KEY="..."            # 선택
//!
//! # 환영 메일 정책
//! export WELCOME_POLICY="first-session"       # first-session | every-sign-in
//! export WELCOME_CONFIRMATION="background"    # background | await
//! ```

use super::env_source::EnvSource;
use crate::domain::models::{Confirmation, WelcomePolicy};
use crate::errors::errors::AppError;

pub const DEFAULT_SENDER: &str = "Sketzo <onboarding@resend.dev>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProviderKind {
    Resend,
    EmailJs,
}

impl EmailProviderKind {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "resend" => Ok(EmailProviderKind::Resend),
            "emailjs" => Ok(EmailProviderKind::EmailJs),
            _ => Err(format!("Unsupported email provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailProviderKind::Resend => "resend",
            EmailProviderKind::EmailJs => "emailjs",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResendSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct EmailJsSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub enum EmailSenderConfig {
    Resend(ResendSettings),
    EmailJs(EmailJsSettings),
}

impl EmailSenderConfig {
    pub fn kind(&self) -> EmailProviderKind {
        match self {
            EmailSenderConfig::Resend(_) => EmailProviderKind::Resend,
            EmailSenderConfig::EmailJs(_) => EmailProviderKind::EmailJs,
        }
    }
}

/// 이메일 발송 설정
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// `None`이면 발송이 설정되지 않은 상태
    pub sender: Option<EmailSenderConfig>,
    /// 사전 인증된 발신자 주소
    pub from: String,
}

impl EmailConfig {
    /// # Errors
    ///
    /// 알 수 없는 `EMAIL_PROVIDER` 값만 에러로 처리합니다.
    /// 자격 증명 누락은 경고 로그 후 "설정되지 않음"으로 처리합니다.
    pub fn from_source(source: &EnvSource) -> Result<Self, AppError> {
        let from = source.get("EMAIL_FROM").unwrap_or_else(|| DEFAULT_SENDER.to_string());

        let kind = match source.get("EMAIL_PROVIDER") {
            Some(raw) => EmailProviderKind::from_str(&raw).map_err(AppError::ConfigurationError)?,
            None => {
                log::warn!("EMAIL_PROVIDER not set, welcome emails are disabled");
                return Ok(Self { sender: None, from });
            }
        };

        let sender = match kind {
            EmailProviderKind::Resend => source.get("RESEND_API_KEY").map(|api_key| {
                EmailSenderConfig::Resend(ResendSettings {
                    api_key,
                    base_url: base_url(source, "RESEND_BASE_URL", "https://api.resend.com"),
                })
            }),
            EmailProviderKind::EmailJs => match (
                source.get("EMAILJS_SERVICE_ID"),
                source.get("EMAILJS_TEMPLATE_ID"),
                source.get("EMAILJS_PUBLIC_KEY"),
            ) {
                (Some(service_id), Some(template_id), Some(public_key)) => {
                    Some(EmailSenderConfig::EmailJs(EmailJsSettings {
                        service_id,
                        template_id,
                        public_key,
                        private_key: source.get("EMAILJS_PRIVATE_KEY"),
                        base_url: base_url(source, "EMAILJS_BASE_URL", "https://api.emailjs.com"),
                    }))
                }
                _ => None,
            },
        };

        if sender.is_none() {
            log::warn!("{} credentials are missing, welcome emails are disabled", kind.as_str());
        }

        Ok(Self { sender, from })
    }

    pub fn is_configured(&self) -> bool {
        self.sender.is_some()
    }
}

/// 환영 메일 트리거 설정
#[derive(Debug, Clone, Copy, Default)]
pub struct WelcomeConfig {
    pub policy: WelcomePolicy,
    pub confirmation: Confirmation,
}

impl WelcomeConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self, AppError> {
        let policy = match source.get("WELCOME_POLICY") {
            Some(raw) => WelcomePolicy::from_str(&raw).map_err(AppError::ConfigurationError)?,
            None => WelcomePolicy::default(),
        };
        let confirmation = match source.get("WELCOME_CONFIRMATION") {
            Some(raw) => Confirmation::from_str(&raw).map_err(AppError::ConfigurationError)?,
            None => Confirmation::default(),
        };

        if policy == WelcomePolicy::EverySignIn {
            log::warn!("WELCOME_POLICY=every-sign-in: 모든 로그인마다 환영 메일이 발송됩니다");
        }

        Ok(Self { policy, confirmation })
    }
}

fn base_url(source: &EnvSource, key: &str, default: &str) -> String {
    source
        .get(key)
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_provider_means_not_configured() {
        let config = EmailConfig::from_source(&EnvSource::from_pairs(&[])).unwrap();

        assert!(!config.is_configured());
        assert_eq!(config.from, DEFAULT_SENDER);
    }

    #[test]
    fn test_resend_without_key_is_not_configured() {
        let source = EnvSource::from_pairs(&[("EMAIL_PROVIDER", "resend")]);
        assert!(!EmailConfig::from_source(&source).unwrap().is_configured());
    }

    #[test]
    fn test_resend_settings() {
        let source = EnvSource::from_pairs(&[
            ("EMAIL_PROVIDER", "resend"),
            ("RESEND_API_KEY", "re_test"),
            ("EMAIL_FROM", "sketzo.tech@gmail.com"),
        ]);
        let config = EmailConfig::from_source(&source).unwrap();

        assert_eq!(config.from, "sketzo.tech@gmail.com");
        match config.sender {
            Some(EmailSenderConfig::Resend(settings)) => {
                assert_eq!(settings.api_key, "re_test");
                assert_eq!(settings.base_url, "https://api.resend.com");
            }
            other => panic!("Expected Resend sender, got {:?}", other),
        }
    }

    #[test]
    fn test_emailjs_requires_all_identifiers() {
        let partial = EnvSource::from_pairs(&[
            ("EMAIL_PROVIDER", "emailjs"),
            ("EMAILJS_SERVICE_ID", "service_1"),
        ]);
        assert!(!EmailConfig::from_source(&partial).unwrap().is_configured());

        let full = EnvSource::from_pairs(&[
            ("EMAIL_PROVIDER", "emailjs"),
            ("EMAILJS_SERVICE_ID", "service_1"),
            ("EMAILJS_TEMPLATE_ID", "template_1"),
            ("EMAILJS_PUBLIC_KEY", "pk"),
        ]);
        let config = EmailConfig::from_source(&full).unwrap();
        assert_eq!(config.sender.map(|s| s.kind()), Some(EmailProviderKind::EmailJs));
    }

    #[test]
    fn test_unknown_email_provider_is_error() {
        let source = EnvSource::from_pairs(&[("EMAIL_PROVIDER", "sendgrid")]);
        assert!(EmailConfig::from_source(&source).is_err());
    }

    #[test]
    fn test_welcome_config_defaults() {
        let config = WelcomeConfig::from_source(&EnvSource::from_pairs(&[])).unwrap();

        assert_eq!(config.policy, WelcomePolicy::FirstSessionOnly);
        assert_eq!(config.confirmation, Confirmation::Background);
    }
}
