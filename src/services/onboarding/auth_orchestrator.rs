//! # 인증 오케스트레이터
//!
//! 인증 시도 하나를 끝까지 진행하고, 성공한 경우에만 환영 메일을 보냅니다.
//!
//! ## 발송 규칙
//!
//! - 실패한 시도는 알림기를 호출하지 않습니다.
//! - 가입 성공은 항상 한 번 발송합니다.
//! - 로그인과 OAuth 완료는 [`WelcomePolicy`]에 따릅니다.
//!   기본값 `FirstSessionOnly`에서 비밀번호 로그인은 발송하지 않고(가입 때 이미 보냄),
//!   OAuth 완료는 신원의 첫 세션일 때만 발송합니다.
//! - 발송 결과는 시도의 성공 여부를 바꾸지 않으며, 재시도하지 않습니다.
//!
//! [`Confirmation::Background`]는 발송을 actix 런타임 작업으로 예약하고 바로 반환합니다.
//! 예약된 작업은 [`WelcomeDispatch::outcome`]으로 따로 기다릴 수 있습니다.

use std::sync::Arc;
use actix_web::rt::task::JoinHandle;
use uuid::Uuid;
use crate::domain::dto::auth::{AuthResponse, WelcomeStatus};
use crate::domain::entities::users::User;
use crate::domain::models::{
    AttemptEvent, AttemptState, AuthOutcome, AuthResult, Confirmation, EmailDispatchOutcome, OAuthCallback,
    OAuthProvider, OAuthStartResult, SessionId, WelcomePolicy,
};
use crate::services::auth::AuthClient;
use crate::services::email::Notifier;

/// 환영 메일 처리 상태
#[derive(Debug)]
pub enum WelcomeDispatch {
    Skipped,
    Scheduled(JoinHandle<EmailDispatchOutcome>),
    Completed(EmailDispatchOutcome),
}

impl WelcomeDispatch {
    /// 발송 결과를 기다립니다. 건너뛴 경우 `None`입니다.
    pub async fn outcome(self) -> Option<EmailDispatchOutcome> {
        match self {
            WelcomeDispatch::Skipped => None,
            WelcomeDispatch::Completed(outcome) => Some(outcome),
            WelcomeDispatch::Scheduled(handle) => match handle.await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    log::error!("환영 메일 작업이 완료되지 못했습니다: {}", e);
                    Some(EmailDispatchOutcome::failed(format!("welcome task failed: {}", e)))
                }
            },
        }
    }

    pub fn status(&self) -> WelcomeStatus {
        match self {
            WelcomeDispatch::Skipped => WelcomeStatus::Skipped,
            WelcomeDispatch::Scheduled(_) => WelcomeStatus::Scheduled,
            WelcomeDispatch::Completed(outcome) => WelcomeStatus::Completed(outcome.clone()),
        }
    }
}

/// 인증 시도 한 건의 결과
#[derive(Debug)]
pub struct AttemptReport {
    pub attempt_id: Uuid,
    pub state: AttemptState,
    pub result: AuthResult,
    /// 성공해서 세션이 저장된 경우의 세션 핸들
    pub session_id: Option<SessionId>,
    pub welcome: WelcomeDispatch,
}

impl AttemptReport {
    /// HTTP 응답 DTO로 변환합니다. 예약된 발송 작업은 계속 진행됩니다.
    pub fn into_response(self) -> AuthResponse {
        AuthResponse { welcome: self.welcome.status(), result: self.result }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    SignIn,
    SignUp,
    OAuth,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Trigger::SignIn => "sign_in",
            Trigger::SignUp => "sign_up",
            Trigger::OAuth => "oauth",
        }
    }
}

struct Attempt {
    id: Uuid,
    trigger: Trigger,
    state: AttemptState,
}

impl Attempt {
    fn begin(trigger: Trigger) -> Self {
        let mut attempt = Self { id: Uuid::new_v4(), trigger, state: AttemptState::Idle };
        attempt.apply(AttemptEvent::Begin);
        attempt
    }

    fn apply(&mut self, event: AttemptEvent) {
        match self.state.transition(event) {
            Ok(next) => {
                log::debug!("[{}] {} {:?} → {:?}", self.id, self.trigger.as_str(), self.state, next);
                self.state = next;
            }
            Err(e) => log::error!("[{}] {}", self.id, e),
        }
    }
}

pub struct AuthOrchestrator {
    auth: Arc<AuthClient>,
    notifier: Arc<dyn Notifier>,
    policy: WelcomePolicy,
}

impl AuthOrchestrator {
    pub fn new(auth: Arc<AuthClient>, notifier: Arc<dyn Notifier>, policy: WelcomePolicy) -> Self {
        Self { auth, notifier, policy }
    }

    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    pub fn policy(&self) -> WelcomePolicy {
        self.policy
    }

    pub async fn sign_in(
        &self,
        current: Option<&SessionId>,
        email: &str,
        password: &str,
        confirmation: Confirmation,
    ) -> AttemptReport {
        let attempt = Attempt::begin(Trigger::SignIn);
        let outcome = self.auth.sign_in_with_password(current, email, password).await;
        self.finish(attempt, outcome, confirmation).await
    }

    pub async fn sign_up(
        &self,
        current: Option<&SessionId>,
        name: &str,
        email: &str,
        password: &str,
        confirmation: Confirmation,
    ) -> AttemptReport {
        let attempt = Attempt::begin(Trigger::SignUp);
        let outcome = self.auth.sign_up_with_password(current, name, email, password).await;
        self.finish(attempt, outcome, confirmation).await
    }

    /// OAuth 시작은 인증 시도를 끝내지 않으므로 그대로 전달합니다.
    pub async fn begin_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> OAuthStartResult {
        self.auth.sign_in_with_oauth(provider, redirect_to).await
    }

    pub async fn complete_oauth(
        &self,
        current: Option<&SessionId>,
        callback: &OAuthCallback,
        confirmation: Confirmation,
    ) -> AttemptReport {
        let attempt = Attempt::begin(Trigger::OAuth);
        let outcome = self.auth.complete_oauth_sign_in(current, callback).await;
        self.finish(attempt, outcome, confirmation).await
    }

    /// 세션 사용자에게 환영 메일을 다시 보냅니다. 살아있는 세션이 없으면 `None`입니다.
    pub async fn resend_welcome(&self, session_id: &SessionId) -> Option<EmailDispatchOutcome> {
        let user = self.auth.current_user(session_id)?;
        log::info!("환영 메일 재발송 요청: {}", user.uid);
        Some(self.notifier.notify(&user).await)
    }

    async fn finish(&self, mut attempt: Attempt, outcome: AuthOutcome, confirmation: Confirmation) -> AttemptReport {
        let AuthOutcome { result, session_id } = outcome;
        let welcome = match result.user() {
            Some(user) => {
                attempt.apply(AttemptEvent::Succeed);
                if self.should_welcome(attempt.trigger, user) {
                    self.dispatch(user.clone(), confirmation).await
                } else {
                    WelcomeDispatch::Skipped
                }
            }
            None => {
                attempt.apply(AttemptEvent::Fail);
                WelcomeDispatch::Skipped
            }
        };

        AttemptReport { attempt_id: attempt.id, state: attempt.state, result, session_id, welcome }
    }

    fn should_welcome(&self, trigger: Trigger, user: &User) -> bool {
        let send = match trigger {
            Trigger::SignUp => true,
            // 방금 가입한 신원도 첫 세션으로 보이므로 비밀번호 로그인은 정책만 봅니다.
            Trigger::SignIn => self.policy == WelcomePolicy::EverySignIn,
            Trigger::OAuth => self.policy == WelcomePolicy::EverySignIn || user.is_first_session(),
        };

        log::info!(
            "환영 메일 {} ({}, {:?}, 첫 세션: {})",
            if send { "발송" } else { "건너뜀" },
            trigger.as_str(),
            self.policy,
            user.is_first_session()
        );
        send
    }

    async fn dispatch(&self, user: User, confirmation: Confirmation) -> WelcomeDispatch {
        match confirmation {
            Confirmation::Await => WelcomeDispatch::Completed(self.notifier.notify(&user).await),
            Confirmation::Background => {
                let notifier = self.notifier.clone();
                WelcomeDispatch::Scheduled(actix_web::rt::spawn(async move { notifier.notify(&user).await }))
            }
        }
    }
}
