//! # 인증 클라이언트
//!
//! 선택된 [`AuthBackend`]를 감싸 클라이언트별 세션, 상태 변경 리스너,
//! 진행 중인 OAuth 핸드셰이크를 관리합니다.
//!
//! 세션은 로그인에 성공할 때 발급하는 [`SessionId`]로 구분합니다. 핸들을 제시하지
//! 않은 호출자는 세션이 없는 것으로 취급하므로 다른 호출자의 세션을 읽거나 끝낼 수 없습니다.
//!
//! 모든 공개 연산은 실패를 `Err`가 아닌 결과 값(`AuthOutcome`, `SignOutResult`)으로 돌려주며,
//! 에러 문장은 항상 에러 번역기를 거친 사용자용 문장입니다.
//!
//! ## 리스너 호출 규칙
//!
//! - 세션이 생기거나 세션의 사용자가 다른 `uid`로 바뀌면 `SignedIn` 한 번
//! - 세션이 로그아웃되거나 유휴 시간 초과로 정리되면 `SignedOut` 한 번
//! - 등록 순서대로, 잠금을 놓은 뒤 호출
//!
//! 같은 핸들로 동시에 들어온 로그인 응답은 나중에 도착한 쪽이 세션을 덮어씁니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockWriteGuard};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use crate::config::AuthProviderKind;
use crate::domain::entities::users::User;
use crate::domain::models::{
    AuthOutcome, AuthStateChange, AuthStateListener, ListenerId, OAuthCallback, OAuthProvider, OAuthStartResult,
    PendingOAuth, Session, SessionId, SignOutResult,
};
use super::auth_backend::AuthBackend;
use super::error_translator::{translate, INVALID_OAUTH_CALLBACK, MISSING_EMAIL, MISSING_PASSWORD, POPUP_CLOSED_BY_USER};

/// 시작 후 콜백을 기다리는 최대 시간
pub const PENDING_OAUTH_TTL: Duration = Duration::from_secs(10 * 60);

/// 마지막 사용 이후 세션을 유지하는 시간
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct PendingEntry {
    pending: PendingOAuth,
    started_at: Instant,
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(session: Session) -> Self {
        Self { session, last_seen: Instant::now() }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

pub struct AuthClient {
    backend: Arc<dyn AuthBackend>,
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    session_ttl: Duration,
    listeners: RwLock<Vec<(ListenerId, AuthStateListener)>>,
    pending_oauth: Mutex<HashMap<String, PendingEntry>>,
    next_listener_id: AtomicU64,
}

fn missing_credentials(email: &str, password: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some(MISSING_EMAIL)
    } else if password.is_empty() {
        Some(MISSING_PASSWORD)
    } else {
        None
    }
}

impl AuthClient {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            sessions: Mutex::new(HashMap::new()),
            session_ttl: SESSION_IDLE_TTL,
            listeners: RwLock::new(Vec::new()),
            pending_oauth: Mutex::new(HashMap::new()),
            next_listener_id: AtomicU64::new(1),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn backend_kind(&self) -> AuthProviderKind {
        self.backend.kind()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn listeners_write(&self) -> RwLockWriteGuard<'_, Vec<(ListenerId, AuthStateListener)>> {
        self.listeners.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, PendingEntry>> {
        self.pending_oauth.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 이메일/비밀번호 로그인
    ///
    /// `current`가 살아있는 세션이면 그 자리에 새 세션을 저장합니다.
    pub async fn sign_in_with_password(&self, current: Option<&SessionId>, email: &str, password: &str) -> AuthOutcome {
        let email = email.trim();
        if let Some(code) = missing_credentials(email, password) {
            return AuthOutcome::failure(translate(code));
        }

        match self.backend.sign_in_with_password(email, password).await {
            Ok(session) => {
                let user = session.user.clone();
                let session_id = self.store_session(current, session).await;
                log::info!("로그인 성공: {} ({})", user.uid, self.backend.kind().as_str());
                AuthOutcome::signed_in(user, session_id)
            }
            Err(e) => {
                log::warn!("로그인 실패: {}", e);
                AuthOutcome::failure(e.user_message())
            }
        }
    }

    /// 이메일/비밀번호 가입 후 표시 이름 설정
    ///
    /// 표시 이름 설정이 실패해도 가입은 성공으로 처리되며, 반환되는 사용자는
    /// 입력한 이름을 가집니다.
    pub async fn sign_up_with_password(
        &self,
        current: Option<&SessionId>,
        name: &str,
        email: &str,
        password: &str,
    ) -> AuthOutcome {
        let email = email.trim();
        if let Some(code) = missing_credentials(email, password) {
            return AuthOutcome::failure(translate(code));
        }

        let mut session = match self.backend.sign_up_with_password(email, password).await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("가입 실패: {}", e);
                return AuthOutcome::failure(e.user_message());
            }
        };

        let name = name.trim();
        if !name.is_empty() {
            if let Err(e) = self.backend.update_display_name(&session, name).await {
                log::warn!("표시 이름 설정 실패 (가입은 유지): {}", e);
            }
            session.user.display_name = Some(name.to_string());
        }

        let user = session.user.clone();
        log::info!("가입 성공: {} ({})", user.uid, self.backend.kind().as_str());

        // 이메일 확인 대기 중인 가입은 토큰이 없으므로 로그인 상태가 되지 않습니다.
        if !session.has_access_token() {
            return AuthOutcome::without_session(user);
        }

        let session_id = self.store_session(current, session).await;
        AuthOutcome::signed_in(user, session_id)
    }

    /// OAuth 리다이렉트 플로우 시작
    pub async fn sign_in_with_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> OAuthStartResult {
        match self.backend.begin_oauth(provider, redirect_to).await {
            Ok(start) => {
                let mut pending = self.pending();
                pending.retain(|_, entry| entry.started_at.elapsed() < PENDING_OAUTH_TTL);
                pending.insert(
                    start.state.clone(),
                    PendingEntry { pending: start.pending, started_at: Instant::now() },
                );
                log::debug!("OAuth 시작: {} (대기 {}건)", provider.as_str(), pending.len());

                OAuthStartResult::started(start.authorize_url, start.state)
            }
            Err(e) => {
                log::warn!("OAuth 시작 실패 ({}): {}", provider.as_str(), e);
                OAuthStartResult::failed(e.user_message())
            }
        }
    }

    /// OAuth 콜백 처리
    ///
    /// `state`는 한 번만 사용할 수 있습니다.
    pub async fn complete_oauth_sign_in(&self, current: Option<&SessionId>, callback: &OAuthCallback) -> AuthOutcome {
        let entry = self.pending().remove(&callback.state);

        let pending = match entry {
            Some(entry) if entry.started_at.elapsed() < PENDING_OAUTH_TTL => entry.pending,
            _ => {
                log::warn!("알 수 없거나 만료된 OAuth state");
                return AuthOutcome::failure(translate(INVALID_OAUTH_CALLBACK));
            }
        };

        if let Some(error) = &callback.error {
            log::info!(
                "OAuth 취소 ({}): {} {}",
                pending.provider.as_str(),
                error,
                callback.error_description.as_deref().unwrap_or("")
            );
            return AuthOutcome::failure(translate(POPUP_CLOSED_BY_USER));
        }

        match self.backend.complete_oauth(&pending, callback).await {
            Ok(session) => {
                let user = session.user.clone();
                let session_id = self.store_session(current, session).await;
                log::info!("OAuth 로그인 성공: {} ({})", user.uid, pending.provider.as_str());
                AuthOutcome::signed_in(user, session_id)
            }
            Err(e) => {
                log::warn!("OAuth 완료 실패: {}", e);
                AuthOutcome::failure(e.user_message())
            }
        }
    }

    /// 로그아웃
    ///
    /// 프로바이더 호출이 실패해도 로컬 세션은 정리됩니다. 모르는 핸들은 이미
    /// 로그아웃된 것으로 봅니다.
    pub async fn sign_out(&self, session_id: &SessionId) -> SignOutResult {
        let Some(entry) = self.sessions().remove(session_id) else {
            return SignOutResult::ok();
        };

        self.emit(AuthStateChange::SignedOut(entry.session.user.clone()));

        match self.backend.sign_out(&entry.session).await {
            Ok(()) => SignOutResult::ok(),
            Err(e) => {
                log::warn!("프로바이더 로그아웃 실패 (로컬 세션은 정리됨): {}", e);
                SignOutResult::failed(e.user_message())
            }
        }
    }

    /// 모든 세션을 로그아웃하고 정리한 세션 수를 돌려줍니다
    pub async fn sign_out_all(&self) -> usize {
        let drained: Vec<Session> = self.sessions().drain().map(|(_, entry)| entry.session).collect();

        for session in &drained {
            self.revoke(session, AuthStateChange::SignedOut(session.user.clone())).await;
        }
        drained.len()
    }

    /// 캐시된 세션 사용자
    pub fn current_user(&self, session_id: &SessionId) -> Option<User> {
        self.touch(session_id).map(|session| session.user)
    }

    /// 프로바이더에서 세션 사용자를 다시 조회합니다. 실패하면 캐시된 사용자를 돌려줍니다.
    pub async fn get_current_user(&self, session_id: &SessionId) -> Option<User> {
        let session = self.touch(session_id)?;

        match self.backend.fetch_user(&session).await {
            Ok(user) => {
                if let Some(entry) = self.sessions().get_mut(session_id) {
                    if entry.session.user.uid == user.uid {
                        entry.session.user = user.clone();
                    }
                }
                Some(user)
            }
            Err(e) => {
                log::warn!("사용자 조회 실패 (캐시 사용): {}", e);
                Some(session.user)
            }
        }
    }

    pub fn session_count(&self) -> usize {
        let ttl = self.session_ttl;
        self.sessions().values().filter(|entry| !entry.is_expired(ttl)).count()
    }

    pub fn on_auth_state_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&AuthStateChange) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners_write().push((id, Arc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners_write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn clear_listeners(&self) {
        self.listeners_write().clear();
    }

    /// 살아있는 세션이면 유휴 타이머를 갱신하고 복사본을 돌려줍니다
    fn touch(&self, session_id: &SessionId) -> Option<Session> {
        let ttl = self.session_ttl;
        let mut sessions = self.sessions();
        let entry = sessions.get_mut(session_id).filter(|entry| !entry.is_expired(ttl))?;

        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    async fn store_session(&self, current: Option<&SessionId>, session: Session) -> SessionId {
        self.evict_expired().await;

        let user = session.user.clone();
        let token = session.access_token.clone();

        let (session_id, previous) = {
            let mut sessions = self.sessions();
            match current.filter(|id| sessions.contains_key(*id)) {
                Some(id) => {
                    let previous = sessions.insert(id.clone(), SessionEntry::new(session));
                    (id.clone(), previous.map(|entry| entry.session))
                }
                None => {
                    let id = SessionId::generate();
                    sessions.insert(id.clone(), SessionEntry::new(session));
                    (id, None)
                }
            }
        };

        match previous {
            None => self.emit(AuthStateChange::SignedIn(user)),
            Some(previous) => {
                if previous.user.uid != user.uid {
                    self.emit(AuthStateChange::SignedOut(previous.user.clone()));
                    self.emit(AuthStateChange::SignedIn(user));
                }
                // 같은 자리에 저장된 새 세션이 이전 프로바이더 세션을 대체합니다.
                if previous.access_token != token {
                    if let Err(e) = self.backend.sign_out(&previous).await {
                        log::warn!("대체된 세션 폐기 실패: {}", e);
                    }
                }
            }
        }

        session_id
    }

    async fn evict_expired(&self) {
        let expired: Vec<Session> = {
            let ttl = self.session_ttl;
            let mut sessions = self.sessions();
            let ids: Vec<SessionId> = sessions
                .iter()
                .filter(|(_, entry)| entry.is_expired(ttl))
                .map(|(id, _)| id.clone())
                .collect();

            ids.iter()
                .filter_map(|id| sessions.remove(id))
                .map(|entry| entry.session)
                .collect()
        };

        if !expired.is_empty() {
            log::info!("만료된 세션 {}개 정리", expired.len());
        }

        for session in &expired {
            self.revoke(session, AuthStateChange::SignedOut(session.user.clone())).await;
        }
    }

    async fn revoke(&self, session: &Session, change: AuthStateChange) {
        self.emit(change);
        if let Err(e) = self.backend.sign_out(session).await {
            log::warn!("세션 폐기 실패 ({}): {}", session.user.uid, e);
        }
    }

    fn emit(&self, change: AuthStateChange) {
        let listeners: Vec<AuthStateListener> = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        log::debug!("인증 상태 변경 {} → 리스너 {}개", change.as_str(), listeners.len());
        for listener in listeners {
            listener(&change);
        }
    }
}
