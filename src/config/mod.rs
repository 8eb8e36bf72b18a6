//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 시작 시점에 한 번 읽어 [`AppConfig`]로 고정합니다.
//!
//! ## 모듈 구성
//!
//! - [`env_source`] - 환경 변수 조회 추상화 (테스트 주입 지원)
//! - [`data_config`] - 서버, 환경, 레이트 리밋, CORS 설정
//! - [`auth_config`] - 인증 백엔드(Firebase, Supabase, Memory) 선택과 자격 증명
//! - [`email_config`] - 이메일 프로바이더(Resend, EmailJS)와 환영 메일 정책
//! - [`app_config`] - 전체 설정 조립
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 선택된 인증 백엔드의 자격 증명 누락은 시작 실패
//! - 이메일 자격 증명 누락은 기능 비활성화 (가입 흐름은 계속 동작)
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```

pub mod env_source;
pub mod data_config;
pub mod auth_config;
pub mod email_config;
pub mod app_config;

pub use env_source::*;
pub use data_config::*;
pub use auth_config::*;
pub use email_config::*;
pub use app_config::*;
