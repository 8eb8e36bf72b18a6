//! 이메일 발송 서비스 모듈
//!
//! - [`email_sender`] - 트랜잭션 이메일 프로바이더 추상화 (`EmailSender`)
//! - [`resend_sender`], [`emailjs_sender`] - 프로바이더 구현
//! - [`welcome_template`] - 환영 메일 HTML
//! - [`welcome_notifier`] - 사용자에게 환영 메일을 보내는 `Notifier`

pub mod email_sender;
pub mod resend_sender;
pub mod emailjs_sender;
pub mod welcome_template;
pub mod welcome_notifier;

pub use email_sender::*;
pub use resend_sender::ResendSender;
pub use emailjs_sender::EmailJsSender;
pub use welcome_notifier::*;
