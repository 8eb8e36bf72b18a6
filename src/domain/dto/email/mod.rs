//! 이메일 트리거 DTO

pub mod request;

pub use request::*;
