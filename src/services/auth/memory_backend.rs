//! 인메모리 인증 백엔드
//!
//! 외부 신원 서비스 없이 로컬에서 가입/로그인 흐름을 확인하기 위한 백엔드입니다
//! (`AUTH_PROVIDER=memory`). 프로세스가 종료되면 계정이 사라집니다.
//! 에러는 Firebase SDK와 같은 `auth/...` 코드로 보고합니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::config::AuthProviderKind;
use crate::domain::entities::users::User;
use crate::domain::models::{OAuthCallback, OAuthProvider, OAuthStart, PendingOAuth, Session};
use super::auth_backend::{AuthBackend, ProviderError};
use super::error_translator::{
    EMAIL_ALREADY_IN_USE, INVALID_EMAIL, OPERATION_NOT_ALLOWED, USER_NOT_FOUND, WEAK_PASSWORD, WRONG_PASSWORD,
};

/// Firebase와 Supabase의 기본 비밀번호 정책과 같은 최소 길이
pub const MIN_PASSWORD_LENGTH: usize = 6;

struct Account {
    user: User,
    password_digest: String,
}

#[derive(Default)]
struct MemoryState {
    /// 소문자 이메일 → 계정
    accounts: HashMap<String, Account>,
    /// 액세스 토큰 → 소문자 이메일
    tokens: HashMap<String, String>,
}

#[derive(Default)]
pub struct MemoryAuthBackend {
    state: Mutex<MemoryState>,
}

impl MemoryAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn digest(uid: &str, password: &str) -> String {
        let hash = Sha256::digest(format!("{}:{}", uid, password).as_bytes());
        hash.iter().map(|byte| format!("{:02x}", byte)).collect()
    }

    #[cfg(test)]
    pub(crate) fn active_tokens(&self) -> usize {
        self.state().tokens.len()
    }

    fn issue_session(state: &mut MemoryState, key: &str, user: User) -> Session {
        let token = Uuid::new_v4().simple().to_string();
        state.tokens.insert(token.clone(), key.to_string());
        Session::new(user, Some(token), None)
    }

    fn account_for_session<'a>(state: &'a mut MemoryState, session: &Session) -> Result<&'a mut Account, ProviderError> {
        let key = session
            .access_token
            .as_ref()
            .and_then(|token| state.tokens.get(token))
            .cloned()
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))?;

        state
            .accounts
            .get_mut(&key)
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') && !domain.contains('@')
        }
        None => false,
    }
}

#[async_trait]
impl AuthBackend for MemoryAuthBackend {
    fn kind(&self) -> AuthProviderKind {
        AuthProviderKind::Memory
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let key = email.trim().to_lowercase();
        let mut state = self.state();

        let account = state
            .accounts
            .get_mut(&key)
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))?;

        if account.password_digest != Self::digest(&account.user.uid, password) {
            return Err(ProviderError::rejected(WRONG_PASSWORD));
        }

        account.user.last_sign_in_at = Some(Utc::now());
        let user = account.user.clone();

        Ok(Self::issue_session(&mut state, &key, user))
    }

    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(ProviderError::rejected(INVALID_EMAIL));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ProviderError::rejected(WEAK_PASSWORD));
        }

        let key = email.to_lowercase();
        let mut state = self.state();

        if state.accounts.contains_key(&key) {
            return Err(ProviderError::rejected(EMAIL_ALREADY_IN_USE));
        }

        let uid = Uuid::new_v4().to_string();
        let user = User::new(uid.clone(), email, AuthProviderKind::Memory).mark_new_identity(Utc::now());

        state.accounts.insert(
            key.clone(),
            Account {
                user: user.clone(),
                password_digest: Self::digest(&uid, password),
            },
        );

        Ok(Self::issue_session(&mut state, &key, user))
    }

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<(), ProviderError> {
        let mut state = self.state();
        let account = Self::account_for_session(&mut state, session)?;

        account.user.display_name = Some(display_name.to_string());
        Ok(())
    }

    async fn begin_oauth(&self, _provider: OAuthProvider, _redirect_to: &str) -> Result<OAuthStart, ProviderError> {
        Err(ProviderError::rejected(OPERATION_NOT_ALLOWED))
    }

    async fn complete_oauth(&self, _pending: &PendingOAuth, _callback: &OAuthCallback) -> Result<Session, ProviderError> {
        Err(ProviderError::rejected(OPERATION_NOT_ALLOWED))
    }

    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError> {
        if let Some(token) = &session.access_token {
            self.state().tokens.remove(token);
        }
        Ok(())
    }

    async fn fetch_user(&self, session: &Session) -> Result<User, ProviderError> {
        let mut state = self.state();
        Self::account_for_session(&mut state, session).map(|account| account.user.clone())
    }
}
