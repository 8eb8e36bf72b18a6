//! # Domain Models Module
//!
//! 인증 흐름과 이메일 발송 흐름에서 주고받는 값 객체들입니다.
//!
//! - [`auth`] - `AuthResult`, `Session`, 인증 상태 변경 이벤트, 시도 상태 머신
//! - [`oauth`] - OAuth 리다이렉트 핸드셰이크 모델
//! - [`email`] - 이메일 메시지와 발송 결과

pub mod auth;
pub mod oauth;
pub mod email;

pub use auth::*;
pub use oauth::*;
pub use email::*;
