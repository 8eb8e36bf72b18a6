//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

use serde::Deserialize;

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::clean_optional_string;
///
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// HTML 본문에 삽입할 텍스트를 이스케이프합니다.
///
/// 사용자가 입력한 표시 이름이 메일 템플릿에 마크업으로 해석되지 않도록
/// `& < > " '` 다섯 문자를 엔티티로 치환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(escape_html("<b>Ava</b>"), "&lt;b&gt;Ava&lt;/b&gt;");
/// ```
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// JSON 역직렬화 시 빈 문자열이나 공백만 있는 문자열을 자동으로 None으로 변환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 후 Some으로 반환합니다.
///
/// ```rust,ignore
/// // JSON: {"name": "  Alice  "} → Some("Alice")
/// // JSON: {"name": ""} → None
/// // JSON: {"name": null} → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
