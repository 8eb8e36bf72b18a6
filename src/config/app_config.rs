//! 애플리케이션 전체 설정
//!
//! 시작 시점에 한 번 조립되어 [`crate::core::container::AppContext`]로 전달됩니다.

use super::auth_config::{AuthBackendConfig, OAuthConfig};
use super::data_config::{CorsConfig, Environment, RateLimitConfig, ServerConfig};
use super::email_config::{EmailConfig, WelcomeConfig};
use super::env_source::EnvSource;
use crate::errors::errors::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub auth: AuthBackendConfig,
    pub oauth: OAuthConfig,
    pub email: EmailConfig,
    pub welcome: WelcomeConfig,
    /// 신원 생성 훅 호출 시 요구하는 Bearer 비밀 값
    pub hook_secret: Option<String>,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 읽습니다.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(&EnvSource::Process)
    }

    pub fn from_source(source: &EnvSource) -> Result<Self, AppError> {
        let environment = Environment::from_source(source);

        Ok(Self {
            server: ServerConfig::from_source(source),
            rate_limit: RateLimitConfig::from_source(source),
            cors: CorsConfig::from_source(source),
            auth: AuthBackendConfig::from_source(source, &environment)?,
            oauth: OAuthConfig::from_source(source),
            email: EmailConfig::from_source(source)?,
            welcome: WelcomeConfig::from_source(source)?,
            hook_secret: source.get("HOOK_SECRET"),
            environment,
        })
    }
}
