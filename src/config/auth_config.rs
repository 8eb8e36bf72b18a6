//! # Authentication Configuration Module
//!
//! 신원 공급자(identity provider) 선택과 자격 증명을 관리하는 모듈입니다.
//! 프로세스 시작 시 한 번만 읽어 어떤 백엔드를 사용할지 결정하며,
//! 호출 지점에서는 프로바이더 종류로 분기하지 않습니다.
//!
//! ## 지원하는 백엔드
//!
//! 1. **Firebase**: Identity Toolkit REST API (`FIREBASE_API_KEY`)
//! 2. **Supabase**: GoTrue REST API (`SUPABASE_URL`, `SUPABASE_ANON_KEY`)
//! 3. **Memory**: 로컬 개발용 인메모리 백엔드 (외부 호출 없음)
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export AUTH_PROVIDER="firebase"            # firebase | supabase | memory
//! export FIREBASE_API_KEY="AIza..."
//!
//! # 또는
//! export AUTH_PROVIDER="supabase"
//! export SUPABASE_URL="https://<project>.supabase.co"
//! export SUPABASE_ANON_KEY="sb_publishable_..."
//!
//! # OAuth 리다이렉트 후 돌아올 콜백 (선택)
//! export OAUTH_REDIRECT_URI="http://localhost:8080/api/v1/auth/oauth/{provider}/callback"
//! ```

use serde::{Deserialize, Serialize};
use super::data_config::Environment;
use super::env_source::EnvSource;
use crate::errors::errors::AppError;

/// 인증 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderKind {
    Firebase,
    Supabase,
    Memory,
}

impl AuthProviderKind {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "firebase" => Ok(AuthProviderKind::Firebase),
            "supabase" => Ok(AuthProviderKind::Supabase),
            "memory" | "local" => Ok(AuthProviderKind::Memory),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProviderKind::Firebase => "firebase",
            AuthProviderKind::Supabase => "supabase",
            AuthProviderKind::Memory => "memory",
        }
    }
}

/// Firebase Identity Toolkit 설정
#[derive(Debug, Clone)]
pub struct FirebaseSettings {
    pub api_key: String,
    /// 기본값: `https://identitytoolkit.googleapis.com`
    pub base_url: String,
}

/// Supabase GoTrue 설정
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    /// 프로젝트 URL (끝의 `/` 제거됨)
    pub url: String,
    pub anon_key: String,
}

/// 선택된 인증 백엔드와 그 자격 증명
#[derive(Debug, Clone)]
pub enum AuthBackendConfig {
    Firebase(FirebaseSettings),
    Supabase(SupabaseSettings),
    Memory,
}

impl AuthBackendConfig {
    /// 환경 변수에서 인증 백엔드 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * 알 수 없는 `AUTH_PROVIDER` 값
    /// * 선택된 백엔드의 필수 자격 증명 누락
    pub fn from_source(source: &EnvSource, environment: &Environment) -> Result<Self, AppError> {
        let kind = match source.get("AUTH_PROVIDER") {
            Some(raw) => AuthProviderKind::from_str(&raw).map_err(AppError::ConfigurationError)?,
            None => {
                if environment.is_production() {
                    log::warn!("AUTH_PROVIDER not set, using in-memory backend (not suitable for production!)");
                }
                AuthProviderKind::Memory
            }
        };

        match kind {
            AuthProviderKind::Firebase => Ok(AuthBackendConfig::Firebase(FirebaseSettings {
                api_key: required(source, "FIREBASE_API_KEY")?,
                base_url: source
                    .get("FIREBASE_AUTH_BASE_URL")
                    .unwrap_or_else(|| "https://identitytoolkit.googleapis.com".to_string())
                    .trim_end_matches('/')
                    .to_string(),
            })),
            AuthProviderKind::Supabase => Ok(AuthBackendConfig::Supabase(SupabaseSettings {
                url: required(source, "SUPABASE_URL")?.trim_end_matches('/').to_string(),
                anon_key: required(source, "SUPABASE_ANON_KEY")?,
            })),
            AuthProviderKind::Memory => Ok(AuthBackendConfig::Memory),
        }
    }

    pub fn kind(&self) -> AuthProviderKind {
        match self {
            AuthBackendConfig::Firebase(_) => AuthProviderKind::Firebase,
            AuthBackendConfig::Supabase(_) => AuthProviderKind::Supabase,
            AuthBackendConfig::Memory => AuthProviderKind::Memory,
        }
    }
}

/// OAuth 리다이렉트 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    /// `redirect_to` 쿼리가 없을 때 사용하는 콜백 주소 (`{provider}`는 프로바이더 이름으로 치환)
    pub default_redirect_uri: String,
}

impl OAuthConfig {
    pub fn from_source(source: &EnvSource) -> Self {
        Self {
            default_redirect_uri: source
                .get("OAUTH_REDIRECT_URI")
                .unwrap_or_else(|| "http://localhost:8080/api/v1/auth/oauth/{provider}/callback".to_string()),
        }
    }

    pub fn redirect_uri_for(&self, provider: &str) -> String {
        self.default_redirect_uri.replace("{provider}", provider)
    }
}

fn required(source: &EnvSource, key: &str) -> Result<String, AppError> {
    source
        .get(key)
        .ok_or_else(|| AppError::ConfigurationError(format!("{} must be set", key)))
}
