//! 애플리케이션 전역 에러 모듈
//!
//! - [`errors`] - HTTP 응답으로 변환되는 `AppError`와 보조 trait

pub mod errors;

pub use errors::*;
