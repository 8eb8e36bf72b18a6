//! 인증 백엔드 추상화
//!
//! 신원 서비스(Firebase, Supabase, 인메모리)마다 하나씩 구현되며,
//! [`super::auth_client::AuthClient`]가 이 trait만 보고 동작합니다.
//! 백엔드는 세션 상태를 갖지 않습니다. 클라이언트별 세션과 리스너는 `AuthClient`가 관리합니다.

use async_trait::async_trait;
use thiserror::Error;
use crate::config::AuthProviderKind;
use crate::domain::entities::users::User;
use crate::domain::models::{OAuthCallback, OAuthProvider, OAuthStart, PendingOAuth, Session};
use super::error_translator::{self, INVALID_CONTINUE_URI, NETWORK_REQUEST_FAILED};

/// 프로바이더 호출 실패
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// 네트워크/타임아웃 등 전송 계층 실패
    #[error("transport error: {0}")]
    Transport(String),

    /// 프로바이더가 요청을 거절함 (`auth/...` 코드 또는 자유 형식 메시지)
    #[error("rejected: {code}")]
    Rejected { code: String },

    /// 프로바이더 응답을 해석할 수 없음
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn rejected(code: impl Into<String>) -> Self {
        ProviderError::Rejected { code: code.into() }
    }

    /// 사용자에게 보여줄 문장
    ///
    /// 전송 실패와 해석 불가 응답은 구체적인 원인을 숨기고 일반 문장으로 바꿉니다.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Transport(_) => error_translator::translate(NETWORK_REQUEST_FAILED),
            ProviderError::Rejected { code } => error_translator::translate(code),
            ProviderError::InvalidResponse(_) => error_translator::translate(""),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::InvalidResponse(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// URL에 쿼리 파라미터를 하나 추가합니다.
///
/// OAuth 콜백 주소에 `state`를 실어 보내는 데 사용됩니다.
pub fn with_query_param(url: &str, key: &str, value: &str) -> Result<String, ProviderError> {
    let mut parsed = reqwest::Url::parse(url).map_err(|_| ProviderError::rejected(INVALID_CONTINUE_URI))?;
    parsed.query_pairs_mut().append_pair(key, value);
    Ok(parsed.to_string())
}

/// URL 쿼리에서 파라미터 값을 찾습니다.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// 신원 서비스가 제공해야 하는 기능 집합
#[async_trait]
pub trait AuthBackend: Send + Sync {
    fn kind(&self) -> AuthProviderKind;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    /// 새 신원을 생성합니다. 반환된 사용자는 첫 세션으로 표시되어야 합니다.
    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    /// 가입 직후 표시 이름을 설정하는 두 번째 호출
    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<(), ProviderError>;

    /// OAuth 리다이렉트 플로우를 시작합니다.
    async fn begin_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<OAuthStart, ProviderError>;

    /// 콜백 값으로 OAuth 플로우를 완료합니다.
    async fn complete_oauth(&self, pending: &PendingOAuth, callback: &OAuthCallback) -> Result<Session, ProviderError>;

    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError>;

    /// 세션 토큰으로 최신 사용자 정보를 조회합니다.
    async fn fetch_user(&self, session: &Session) -> Result<User, ProviderError>;
}
