//! User Entity Implementation
//!
//! 인증 프로바이더(Firebase, Supabase, 로컬 메모리)가 반환한 사용자 신원을
//! 하나의 형태로 통합한 엔티티입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProviderKind;

/// 표시 이름이 없는 사용자에게 사용하는 기본 이름
pub const DEFAULT_DISPLAY_NAME: &str = "Pixel Friend";

/// 최초 세션 판정 시 허용하는 `created_at`과 `last_sign_in_at`의 최대 차이 (초)
///
/// Supabase는 가입 직후 두 타임스탬프를 밀리초 단위로 다르게 기록합니다.
pub const FIRST_SESSION_TOLERANCE_SECS: i64 = 2;

/// 인증된 사용자 엔티티
///
/// # 필드 설명
///
/// * `uid` - 프로바이더가 부여한 고유 식별자 (Firebase `localId`, Supabase `id`)
/// * `email` - 로그인 이메일
/// * `display_name` - 표시 이름 (없으면 [`DEFAULT_DISPLAY_NAME`] 사용)
/// * `provider` - 신원을 발급한 인증 백엔드
/// * `created_at` / `last_sign_in_at` - 최초 가입과 재로그인을 구분하는 데 사용
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub provider: AuthProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(uid: impl Into<String>, email: impl Into<String>, provider: AuthProviderKind) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
            provider,
            created_at: None,
            last_sign_in_at: None,
        }
    }

    /// 표시 이름을 설정합니다. 공백뿐인 이름은 `None`으로 정리됩니다.
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = crate::utils::string_utils::clean_optional_string(name);
        self
    }

    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        last_sign_in_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.last_sign_in_at = last_sign_in_at;
        self
    }

    /// 방금 생성된 신원으로 표시합니다 (두 타임스탬프를 동일하게 설정).
    pub fn mark_new_identity(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self.last_sign_in_at = Some(at);
        self
    }

    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// 이번 세션이 해당 신원의 첫 세션인지 판정합니다.
    ///
    /// 두 타임스탬프가 모두 있고 그 차이가 [`FIRST_SESSION_TOLERANCE_SECS`] 이내일 때만
    /// `true`입니다. 타임스탬프를 알 수 없으면 재로그인으로 간주합니다.
    pub fn is_first_session(&self) -> bool {
        match (self.created_at, self.last_sign_in_at) {
            (Some(created), Some(last)) => {
                (last - created).num_seconds().abs() <= FIRST_SESSION_TOLERANCE_SECS
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> User {
        User::new("uid-1", "ava@example.com", AuthProviderKind::Memory)
    }

    #[test]
    fn test_display_name_defaults_to_placeholder() {
        assert_eq!(sample().display_name_or_default(), "Pixel Friend");

        let named = sample().with_display_name(Some("Ava".to_string()));
        assert_eq!(named.display_name_or_default(), "Ava");

        // 공백 이름은 없는 것으로 취급
        let blank = sample().with_display_name(Some("   ".to_string()));
        assert_eq!(blank.display_name, None);
        assert_eq!(blank.display_name_or_default(), "Pixel Friend");
    }

    #[test]
    fn test_first_session_detection() {
        let now = Utc::now();

        assert!(sample().mark_new_identity(now).is_first_session());

        let within = sample().with_timestamps(Some(now), Some(now + Duration::milliseconds(800)));
        assert!(within.is_first_session());

        let returning = sample().with_timestamps(Some(now - Duration::days(3)), Some(now));
        assert!(!returning.is_first_session());

        // 타임스탬프를 모르면 재방문으로 판정
        assert!(!sample().is_first_session());
        assert!(!sample().with_timestamps(Some(now), None).is_first_session());
    }

    #[test]
    fn test_serializes_camel_case_without_empty_fields() {
        let json = serde_json::to_value(sample().with_display_name(Some("Ava".to_string()))).unwrap();

        assert_eq!(json["uid"], "uid-1");
        assert_eq!(json["displayName"], "Ava");
        assert_eq!(json["provider"], "memory");
        assert!(json.get("createdAt").is_none());
    }
}
