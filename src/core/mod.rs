//! # Core Module
//!
//! 애플리케이션 구성 요소의 생성과 수명 주기를 담당합니다.
//!
//! ## 모듈 구성
//!
//! ### [`container`] - 애플리케이션 컨텍스트
//! - **AppContext**: 설정으로부터 인증 클라이언트, 알림기, 오케스트레이터를 한 번 조립
//! - **명시적 주입**: 전역 싱글톤 없이 `web::Data<AppContext>`로 핸들러에 전달
//! - **종료 처리**: 활성 세션 로그아웃과 리스너 정리
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::config::AppConfig;
//! use crate::core::container::AppContext;
//!
//! let context = web::Data::new(AppContext::build(AppConfig::from_env()?)?);
//! let app = App::new().app_data(context.clone());
//! ```

pub mod container;

pub use container::*;
