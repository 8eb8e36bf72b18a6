//! 인증 상태 변경 이벤트

use std::sync::Arc;
use crate::domain::entities::users::User;

/// 세션 전이 이벤트
///
/// 클라이언트 세션마다 로그인/로그아웃 전이 한 번에 한 번씩 발생합니다.
/// `SignedOut`은 세션을 잃은 사용자를 담습니다.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthStateChange {
    SignedIn(User),
    SignedOut(User),
}

impl AuthStateChange {
    pub fn user(&self) -> &User {
        match self {
            AuthStateChange::SignedIn(user) | AuthStateChange::SignedOut(user) => user,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStateChange::SignedIn(_) => "SIGNED_IN",
            AuthStateChange::SignedOut(_) => "SIGNED_OUT",
        }
    }
}

/// 상태 변경 리스너
pub type AuthStateListener = Arc<dyn Fn(&AuthStateChange) + Send + Sync>;

/// 등록된 리스너를 해제할 때 사용하는 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);
