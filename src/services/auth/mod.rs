//! 인증 서비스 모듈
//!
//! 외부 신원 서비스에 인증을 위임하고, 그 결과를 클라이언트별 세션으로 관리합니다.
//!
//! # Features
//!
//! - 이메일/비밀번호 로그인과 가입 (가입 후 표시 이름 설정)
//! - Google/GitHub OAuth 리다이렉트 플로우
//! - 인증 상태 변경 리스너
//! - 프로바이더 에러 코드를 사용자 문장으로 번역
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::services::auth::{AuthClient, MemoryAuthBackend};
//!
//! let client = AuthClient::new(Arc::new(MemoryAuthBackend::new()));
//! let outcome = client.sign_up_with_password(None, "Ava", "ava@example.com", "secret1").await;
//! assert!(outcome.result.is_success());
//! let user = client.current_user(&outcome.session_id.unwrap());
//! ```

pub mod error_translator;
pub mod auth_backend;
pub mod auth_client;
pub mod firebase_backend;
pub mod supabase_backend;
pub mod memory_backend;

pub use auth_backend::*;
pub use auth_client::*;
pub use firebase_backend::FirebaseAuthBackend;
pub use supabase_backend::SupabaseAuthBackend;
pub use memory_backend::MemoryAuthBackend;
