//! 인증 세션 모델

use uuid::Uuid;
use crate::domain::entities::users::User;

/// 클라이언트별 세션 핸들
///
/// HTTP 계층에서 쿠키 값으로 전달되는 불투명 식별자입니다. 프로바이더 토큰과 무관하며
/// 무작위 UUID 두 개(244비트)로 만듭니다. 값 자체가 자격 증명이므로 `Debug`에서 가립니다.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()))
    }

    /// 클라이언트가 보낸 값을 그대로 감쌉니다. 존재 여부는 세션 조회에서 판정합니다.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionId(***)")
    }
}

/// 프로바이더가 발급한 현재 세션
///
/// Supabase에서 이메일 확인이 필요한 가입은 토큰 없이 사용자만 반환하므로
/// 토큰 필드는 선택적입니다. 토큰 값은 로그에 남기지 않도록 `Debug`에서 가립니다.
#[derive(Clone)]
pub struct Session {
    pub user: User,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn new(user: User, access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self { user, access_token, refresh_token }
    }

    /// 토큰이 없는 세션 (가입 확인 대기, 메모리 백엔드 등)
    pub fn without_tokens(user: User) -> Self {
        Self::new(user, None, None)
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .finish()
    }
}
