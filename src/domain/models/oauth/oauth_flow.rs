//! OAuth 시작/완료 모델
//!
//! 브라우저 팝업 대신 서버 측 리다이렉트 플로우를 사용합니다.
//! 시작 단계에서 프로바이더별 비밀 값(Firebase `sessionId`, Supabase PKCE verifier)을
//! `state` 키로 보관했다가 콜백에서 꺼내 사용합니다.

use serde::Serialize;
use super::oauth_provider::OAuthProvider;

/// 백엔드가 시작 단계에서 돌려주는 값
#[derive(Debug, Clone)]
pub struct OAuthStart {
    pub authorize_url: String,
    pub state: String,
    pub pending: PendingOAuth,
}

/// 콜백 때까지 서버에 보관하는 핸드셰이크 정보
#[derive(Clone)]
pub struct PendingOAuth {
    pub provider: OAuthProvider,
    /// Firebase `sessionId` 또는 Supabase PKCE `code_verifier`
    pub secret: String,
}

impl std::fmt::Debug for PendingOAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingOAuth")
            .field("provider", &self.provider)
            .field("secret", &"***")
            .finish()
    }
}

/// 프로바이더 리다이렉트 콜백으로 전달된 값
#[derive(Debug, Clone, Default)]
pub struct OAuthCallback {
    pub state: String,
    /// 쿼리 문자열을 포함한 전체 콜백 URL (Firebase `requestUri`)
    pub callback_url: String,
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 클라이언트에게 반환하는 OAuth 시작 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthStartResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OAuthStartResult {
    pub fn started(authorize_url: String, state: String) -> Self {
        Self { success: true, authorize_url: Some(authorize_url), state: Some(state), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, authorize_url: None, state: None, error: Some(error.into()) }
    }
}
