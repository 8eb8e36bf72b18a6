//! # Domain Entities Module
//!
//! 인증 프로바이더가 발급한 사용자 신원을 표현하는 엔티티들입니다.
//! 이 서비스는 사용자 데이터를 저장하지 않으므로, 엔티티는 로그인/가입 호출이
//! 반환한 일시적인 읽기 전용 뷰입니다.

pub mod users;

pub use users::*;
