//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//! 인증 프로바이더와 이메일 프로바이더 사이를 오가는 값 객체들을 정의하며,
//! 어떤 프로바이더가 설정되어 있든 동일한 형태를 유지합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - 프로바이더가 소유한 사용자 신원의 읽기 전용 뷰
//! ├── Models        - AuthResult, Session, OAuth 핸드셰이크, 이메일 발송 결과
//! └── DTOs          - HTTP 요청/응답 계약
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! External Providers (Firebase / Supabase, Resend / EmailJS)
//! ```
//!
//! 영속성 계층은 없습니다. 사용자 데이터의 원본은 항상 인증 프로바이더이며,
//! 이 계층의 값들은 한 번의 호출 동안만 살아있습니다.

pub mod entities;
pub mod models;
pub mod dto;

pub use entities::*;
pub use models::*;
pub use dto::*;
