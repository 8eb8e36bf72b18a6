//! 인증 관련 도메인 모델

pub mod auth_result;
pub mod session;
pub mod auth_state;
pub mod attempt;

pub use auth_result::*;
pub use session::*;
pub use auth_state::*;
pub use attempt::*;
