//! 인증 시도 상태 머신과 환영 메일 정책
//!
//! 한 번의 로그인/가입 시도는 다음 상태를 거칩니다.
//!
//! ```text
//! Idle ──Begin──▶ InFlight ──Succeed──▶ Succeeded
//!                     │
//!                     └─────Fail──────▶ Failed
//! ```
//!
//! `Succeeded`와 `Failed`는 종료 상태이며, 이 계층에서는 재시도하지 않습니다.

use serde::{Deserialize, Serialize};
use crate::errors::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptEvent {
    Begin,
    Succeed,
    Fail,
}

impl AttemptState {
    /// 이벤트를 적용한 다음 상태를 반환합니다.
    ///
    /// 허용되지 않은 전이(종료 상태에서의 전이 포함)는 `InternalError`입니다.
    pub fn transition(self, event: AttemptEvent) -> Result<AttemptState, AppError> {
        match (self, event) {
            (AttemptState::Idle, AttemptEvent::Begin) => Ok(AttemptState::InFlight),
            (AttemptState::InFlight, AttemptEvent::Succeed) => Ok(AttemptState::Succeeded),
            (AttemptState::InFlight, AttemptEvent::Fail) => Ok(AttemptState::Failed),
            (state, event) => Err(AppError::InternalError(format!(
                "허용되지 않은 인증 시도 전이: {:?} --{:?}-->", state, event
            ))),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptState::Succeeded | AttemptState::Failed)
    }
}

/// 호출 측이 환영 메일 발송 결과를 기다릴지 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    /// 발송을 백그라운드 작업으로 예약하고 즉시 반환
    #[default]
    Background,
    /// 발송 결과를 기다린 뒤 반환 (결과가 성공 상태를 바꾸지는 않음)
    Await,
}

impl Confirmation {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "background" | "async" => Ok(Confirmation::Background),
            "await" | "sync" => Ok(Confirmation::Await),
            _ => Err(format!("Unsupported welcome confirmation mode: {}", s)),
        }
    }

    pub fn from_flag(await_welcome: bool) -> Self {
        if await_welcome { Confirmation::Await } else { Confirmation::Background }
    }
}

/// 로그인 경로에서 환영 메일을 보낼 조건
///
/// 가입 경로는 정책과 관계없이 항상 한 번 발송합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WelcomePolicy {
    /// 비밀번호 로그인은 발송하지 않고, OAuth는 신원의 첫 세션(생성 시각 ≈ 마지막 로그인 시각)일 때만 발송
    #[default]
    FirstSessionOnly,
    /// 모든 로그인에서 발송
    EverySignIn,
}

impl WelcomePolicy {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "first-session" | "first_session" => Ok(WelcomePolicy::FirstSessionOnly),
            "every-sign-in" | "every_sign_in" => Ok(WelcomePolicy::EverySignIn),
            _ => Err(format!("Unsupported welcome policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let in_flight = AttemptState::Idle.transition(AttemptEvent::Begin).unwrap();
        assert_eq!(in_flight, AttemptState::InFlight);
        assert_eq!(in_flight.transition(AttemptEvent::Succeed).unwrap(), AttemptState::Succeeded);
        assert_eq!(in_flight.transition(AttemptEvent::Fail).unwrap(), AttemptState::Failed);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        for terminal in [AttemptState::Succeeded, AttemptState::Failed] {
            assert!(terminal.is_terminal());
            assert!(terminal.transition(AttemptEvent::Begin).is_err());
            assert!(terminal.transition(AttemptEvent::Succeed).is_err());
            assert!(terminal.transition(AttemptEvent::Fail).is_err());
        }

        // Idle에서 바로 종료 상태로 갈 수 없음
        assert!(AttemptState::Idle.transition(AttemptEvent::Succeed).is_err());
    }

    #[test]
    fn test_policy_and_confirmation_parsing() {
        assert_eq!(WelcomePolicy::from_str("every-sign-in").unwrap(), WelcomePolicy::EverySignIn);
        assert_eq!(WelcomePolicy::from_str("First-Session").unwrap(), WelcomePolicy::FirstSessionOnly);
        assert!(WelcomePolicy::from_str("never").is_err());

        assert_eq!(Confirmation::from_str("await").unwrap(), Confirmation::Await);
        assert_eq!(Confirmation::from_flag(false), Confirmation::Background);
        assert!(Confirmation::from_str("later").is_err());
    }
}
