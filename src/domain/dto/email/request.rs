//! 환영 메일 트리거 요청 DTO

use serde::Deserialize;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/send-welcome-email` 본문 (`{email, name}`)
#[derive(Debug, Default, Deserialize)]
pub struct WelcomeEmailRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
}

/// 신원 생성 이벤트 훅 본문
///
/// Firebase `onCreate` 레코드와 Supabase 훅 페이로드의 필드 이름을 모두 받습니다.
#[derive(Debug, Deserialize)]
pub struct IdentityCreatedPayload {
    #[serde(alias = "id")]
    pub uid: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, alias = "displayName", deserialize_with = "deserialize_optional_string")]
    pub display_name: Option<String>,
}
