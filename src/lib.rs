//! 얼리 액세스 인증 서비스 백엔드
//!
//! 얼리 액세스 랜딩 페이지의 로그인/가입을 외부 신원 서비스(Firebase Auth, Supabase Auth)에
//! 위임하고, 가입이 끝나면 외부 이메일 프로바이더(Resend, EmailJS)로 환영 메일을 보냅니다.
//! 사용자 데이터는 저장하지 않습니다.
//!
//! # Features
//!
//! - **프로바이더 독립 인증**: 이메일/비밀번호, Google/GitHub OAuth를 하나의 `AuthClient`로 제공
//! - **사용자 친화적 에러**: 프로바이더 에러 코드를 고정된 영어 문장으로 변환
//! - **환영 메일**: 최초 세션에만 발송, 백그라운드 또는 결과 대기 선택
//! - **명시적 DI**: 시작 시점에 `AppContext`를 조립해 `web::Data`로 전달
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Orchestrator   │ ← 인증 결과에 따른 환영 메일 판정
//! └─────────────────┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌──────────┐
//! │ Auth   │ │ Notifier │ ← 프로바이더 어댑터
//! └────────┘ └──────────┘
//!     │         │
//!     ▼         ▼
//!  Firebase    Resend
//!  Supabase    EmailJS
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use early_access_auth::config::AppConfig;
//! use early_access_auth::core::AppContext;
//! use early_access_auth::domain::Confirmation;
//!
//! let ctx = AppContext::build(AppConfig::from_env()?)?;
//! let report = ctx.orchestrator.sign_up(None, "Ava", "ava@example.com", "secret1", Confirmation::Await).await;
//! println!("{:?}", report.welcome.status());
//! ```

pub mod core;
pub mod config;
pub mod domain;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
