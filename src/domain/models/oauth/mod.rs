//! OAuth 리다이렉트 핸드셰이크 모델

pub mod oauth_provider;
pub mod oauth_flow;

pub use oauth_provider::*;
pub use oauth_flow::*;
