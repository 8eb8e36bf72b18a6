//! 애플리케이션 컨텍스트
//!
//! 시작 시점에 [`AppConfig`]로부터 모든 서비스를 한 번 생성합니다.
//! 외부 HTTP 호출은 하나의 `reqwest::Client`(커넥션 풀)를 공유합니다.

use std::sync::Arc;
use std::time::Duration;
use crate::config::{AppConfig, AuthBackendConfig, EmailSenderConfig};
use crate::errors::{AppResult, ErrorContext};
use crate::services::auth::{AuthBackend, AuthClient, FirebaseAuthBackend, MemoryAuthBackend, SupabaseAuthBackend};
use crate::services::email::{EmailJsSender, EmailSender, Notifier, ResendSender, WelcomeNotifier};
use crate::services::onboarding::AuthOrchestrator;

/// 외부 프로바이더 호출 제한 시간
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AppContext {
    pub config: AppConfig,
    pub auth: Arc<AuthClient>,
    pub notifier: Arc<WelcomeNotifier>,
    pub orchestrator: Arc<AuthOrchestrator>,
}

impl AppContext {
    /// 설정에 맞는 프로바이더 어댑터를 생성해 컨텍스트를 조립합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub fn build(config: AppConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        let backend: Arc<dyn AuthBackend> = match &config.auth {
            AuthBackendConfig::Firebase(settings) => Arc::new(FirebaseAuthBackend::new(http.clone(), settings.clone())),
            AuthBackendConfig::Supabase(settings) => Arc::new(SupabaseAuthBackend::new(http.clone(), settings.clone())),
            AuthBackendConfig::Memory => Arc::new(MemoryAuthBackend::new()),
        };

        let sender: Option<Arc<dyn EmailSender>> = match &config.email.sender {
            Some(EmailSenderConfig::Resend(settings)) => Some(Arc::new(ResendSender::new(http.clone(), settings.clone()))),
            Some(EmailSenderConfig::EmailJs(settings)) => Some(Arc::new(EmailJsSender::new(http, settings.clone()))),
            None => None,
        };

        Ok(Self::from_parts(config, backend, sender))
    }

    /// 이미 생성된 어댑터로 컨텍스트를 조립합니다.
    pub fn from_parts(config: AppConfig, backend: Arc<dyn AuthBackend>, sender: Option<Arc<dyn EmailSender>>) -> Self {
        let auth = Arc::new(AuthClient::new(backend));
        let notifier = Arc::new(WelcomeNotifier::new(sender, config.email.from.clone()));
        let orchestrator = Arc::new(AuthOrchestrator::new(
            auth.clone(),
            notifier.clone() as Arc<dyn Notifier>,
            config.welcome.policy,
        ));

        log::info!(
            "인증 백엔드: {}, 이메일 프로바이더: {}, 환영 메일 정책: {:?}",
            auth.backend_kind().as_str(),
            notifier.provider_name().unwrap_or("not configured"),
            config.welcome.policy
        );

        Self { config, auth, notifier, orchestrator }
    }

    /// 모든 활성 세션을 로그아웃하고 리스너를 정리합니다.
    pub async fn shutdown(&self) {
        let signed_out = self.auth.sign_out_all().await;
        self.auth.clear_listeners();
        log::info!("애플리케이션 컨텍스트 종료 완료 (세션 {}개 정리)", signed_out);
    }
}
