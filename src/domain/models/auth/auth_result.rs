//! 인증 결과 모델
//!
//! 모든 인증 작업은 성공/실패를 태그로 가진 결과 값을 반환합니다.
//! 실패는 에러로 던지지 않고 사용자에게 보여줄 문장을 담은 값으로 전달됩니다.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use crate::domain::entities::users::User;
use super::session::SessionId;

/// 로그인/가입/OAuth 완료 결과
///
/// JSON으로는 `{"success":true,"user":{..}}` 또는
/// `{"success":false,"error":".."}` 형태로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthResult {
    Success { user: User },
    Failure { error: String },
}

impl AuthResult {
    pub fn success(user: User) -> Self {
        AuthResult::Success { user }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        AuthResult::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthResult::Success { user } => Some(user),
            AuthResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthResult::Success { .. } => None,
            AuthResult::Failure { error } => Some(error),
        }
    }
}

impl Serialize for AuthResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AuthResult", 2)?;
        match self {
            AuthResult::Success { user } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("user", user)?;
            }
            AuthResult::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// 세션을 만드는 인증 작업의 결과
///
/// `session_id`는 세션이 저장된 경우에만 있습니다. 실패했거나 이메일 확인 대기 중인
/// 가입처럼 토큰이 없는 성공은 `None`입니다.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub result: AuthResult,
    pub session_id: Option<SessionId>,
}

impl AuthOutcome {
    pub fn signed_in(user: User, session_id: SessionId) -> Self {
        Self { result: AuthResult::success(user), session_id: Some(session_id) }
    }

    pub fn without_session(user: User) -> Self {
        Self { result: AuthResult::success(user), session_id: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { result: AuthResult::failure(error), session_id: None }
    }
}

/// 로그아웃 결과 (`{success, error?}`)
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SignOutResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignOutResult {
    pub fn ok() -> Self {
        Self { success: true, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()) }
    }
}
