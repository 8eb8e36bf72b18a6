//! 이메일 발송 모델

pub mod email_message;
pub mod dispatch;

pub use email_message::*;
pub use dispatch::*;
