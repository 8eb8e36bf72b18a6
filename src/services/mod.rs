//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 [`crate::core::container::AppContext`]에서 한 번 생성되어
//! 명시적으로 주입됩니다.
//!
//! - [`auth`] - 인증 프로바이더 어댑터와 세션 관리
//! - [`email`] - 이메일 발송 프로바이더와 환영 메일 알림
//! - [`onboarding`] - 인증 시도와 환영 메일 발송을 잇는 오케스트레이터
//!
//! # Examples
//!
//! ```rust,ignore
//! let report = ctx.orchestrator.sign_up(None, "Ava", "ava@example.com", "secret1", Confirmation::Await).await;
//! ```

pub mod auth;
pub mod email;
pub mod onboarding;
