//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청을 검증하고 [`AppContext`](crate::core::container::AppContext)의
//! 서비스에 위임한 뒤 결과를 JSON으로 변환하는 얇은 계층입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! HTTP Layer Architecture
//! ┌─────────────────────────────────────────────┐
//!   Landing Page / Provider Hooks
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                           ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   AuthOrchestrator / AuthClient / Notifier     ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Firebase / Supabase, Resend / EmailJS        ← External Providers
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 로그인, 가입, OAuth, 로그아웃, 현재 사용자, 환영 메일 재발송
//! - [`email`] - 공개 환영 메일 발송 엔드포인트
//! - [`hooks`] - 신원 생성 이벤트 훅
//! - [`health`] - 헬스체크
//!
//! ## 응답 규칙
//!
//! 인증 실패는 `AppError`가 아닌 `{success: false, error}` 본문으로 전달합니다.
//! `AppError`는 입력 검증 실패, 세션 없음, 외부 서비스 장애에만 사용합니다.

pub mod auth;
pub mod email;
pub mod hooks;
pub mod health;
