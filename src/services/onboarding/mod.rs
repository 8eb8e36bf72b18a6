//! 인증 시도와 환영 메일 발송을 잇는 오케스트레이션 모듈

pub mod auth_orchestrator;

pub use auth_orchestrator::*;
