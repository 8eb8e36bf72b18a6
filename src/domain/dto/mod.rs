//! # Data Transfer Objects
//!
//! HTTP 계층의 요청/응답 계약입니다.
//!
//! - [`auth`] - 로그인, 가입, OAuth 요청과 인증 응답
//! - [`email`] - 환영 메일 트리거 요청

pub mod auth;
pub mod email;

pub use auth::*;
pub use email::*;
