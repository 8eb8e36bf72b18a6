//! 프로바이더 에러 번역기
//!
//! 인증 프로바이더가 돌려준 에러 코드나 메시지를 사용자에게 보여줄 문장으로 바꿉니다.
//!
//! 1. `auth/...` 코드 정확 일치 (Firebase SDK 코드, 다른 백엔드도 이 코드로 정규화)
//! 2. 자유 형식 메시지의 부분 문자열 일치 (Supabase GoTrue 메시지)
//! 3. 일치하는 항목이 없으면 원문 그대로, 원문이 비어 있으면 일반 안내 문장

use std::collections::HashMap;
use once_cell::sync::Lazy;

/// 원문이 비어 있을 때 사용하는 일반 안내 문장
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
pub const INVALID_EMAIL: &str = "auth/invalid-email";
pub const WEAK_PASSWORD: &str = "auth/weak-password";
pub const USER_NOT_FOUND: &str = "auth/user-not-found";
pub const WRONG_PASSWORD: &str = "auth/wrong-password";
pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";
pub const USER_DISABLED: &str = "auth/user-disabled";
pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
pub const MISSING_EMAIL: &str = "auth/missing-email";
pub const MISSING_PASSWORD: &str = "auth/missing-password";
pub const INVALID_OAUTH_CALLBACK: &str = "auth/invalid-oauth-callback";
pub const INVALID_CONTINUE_URI: &str = "auth/invalid-continue-uri";

const DUPLICATE_ACCOUNT_MESSAGE: &str = "This email is already registered. Try signing in!";
const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
const WEAK_PASSWORD_MESSAGE: &str = "Password should be at least 6 characters.";
const BAD_CREDENTIALS_MESSAGE: &str = "Incorrect email or password. Please try again.";
const RATE_LIMITED_MESSAGE: &str = "Too many attempts. Please try again later.";

static CODE_MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (EMAIL_ALREADY_IN_USE, DUPLICATE_ACCOUNT_MESSAGE),
        (INVALID_EMAIL, INVALID_EMAIL_MESSAGE),
        (WEAK_PASSWORD, WEAK_PASSWORD_MESSAGE),
        (USER_NOT_FOUND, "No account found with this email."),
        (WRONG_PASSWORD, "Incorrect password. Please try again."),
        (INVALID_CREDENTIAL, BAD_CREDENTIALS_MESSAGE),
        (TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE),
        (POPUP_CLOSED_BY_USER, "Sign-in was cancelled."),
        (USER_DISABLED, "This account has been disabled."),
        (NETWORK_REQUEST_FAILED, "Network error. Please check your connection and try again."),
        (OPERATION_NOT_ALLOWED, "This sign-in method is not enabled."),
        (MISSING_EMAIL, "Please enter your email address."),
        (MISSING_PASSWORD, "Please enter your password."),
        (INVALID_OAUTH_CALLBACK, "Sign-in could not be completed. Please try again."),
        (INVALID_CONTINUE_URI, "The sign-in redirect address is not valid."),
    ])
});

/// 검사 순서가 의미를 가지므로 맵이 아닌 배열입니다.
const MESSAGE_FRAGMENTS: &[(&str, &str)] = &[
    ("Invalid login credentials", BAD_CREDENTIALS_MESSAGE),
    ("Email not confirmed", "Please check your email to confirm your account."),
    ("User already registered", DUPLICATE_ACCOUNT_MESSAGE),
    ("Password should be at least 6 characters", WEAK_PASSWORD_MESSAGE),
    ("Unable to validate email address: invalid format", INVALID_EMAIL_MESSAGE),
    ("Email rate limit exceeded", RATE_LIMITED_MESSAGE),
];

/// 프로바이더 에러 코드 또는 메시지를 사용자 문장으로 번역합니다.
///
/// 절대 빈 문자열을 반환하지 않으며 패닉하지 않습니다.
///
/// # 예제
///
/// ```rust,ignore
/// assert_eq!(translate("auth/weak-password"), "Password should be at least 6 characters.");
/// assert_eq!(translate("some/unknown-code"), "some/unknown-code");
/// assert_eq!(translate(""), "An error occurred. Please try again.");
/// ```
pub fn translate(code_or_message: &str) -> String {
    let input = code_or_message.trim();

    if input.is_empty() {
        return GENERIC_ERROR.to_string();
    }

    if let Some(message) = CODE_MESSAGES.get(input) {
        return (*message).to_string();
    }

    MESSAGE_FRAGMENTS
        .iter()
        .find(|(fragment, _)| input.contains(fragment))
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(translate("auth/weak-password"), "Password should be at least 6 characters.");
        assert_eq!(translate("auth/email-already-in-use"), "This email is already registered. Try signing in!");
        assert_eq!(translate("auth/invalid-email"), "Please enter a valid email address.");
        assert_eq!(translate("auth/user-not-found"), "No account found with this email.");
        assert_eq!(translate("auth/wrong-password"), "Incorrect password. Please try again.");
        assert_eq!(translate("auth/too-many-requests"), "Too many attempts. Please try again later.");
        assert_eq!(translate("auth/popup-closed-by-user"), "Sign-in was cancelled.");
    }

    #[test]
    fn test_every_code_has_a_non_empty_message() {
        for (code, message) in CODE_MESSAGES.iter() {
            assert!(!message.is_empty(), "{} maps to an empty message", code);
            assert_eq!(translate(code), *message);
        }
    }

    #[test]
    fn test_supabase_fragments() {
        assert_eq!(translate("Invalid login credentials"), "Incorrect email or password. Please try again.");
        assert_eq!(
            translate("AuthApiError: User already registered"),
            "This email is already registered. Try signing in!"
        );
        assert_eq!(
            translate("Password should be at least 6 characters."),
            "Password should be at least 6 characters."
        );
        assert_eq!(
            translate("Unable to validate email address: invalid format"),
            "Please enter a valid email address."
        );
        assert_eq!(translate("Email rate limit exceeded"), "Too many attempts. Please try again later.");
        assert_eq!(translate("Email not confirmed"), "Please check your email to confirm your account.");
    }

    #[test]
    fn test_unknown_code_is_returned_verbatim() {
        assert_eq!(translate("some/unknown-code"), "some/unknown-code");
        assert_eq!(translate("Database error saving new user"), "Database error saving new user");
    }

    #[test]
    fn test_empty_input_falls_back_to_generic_message() {
        assert_eq!(translate(""), GENERIC_ERROR);
        assert_eq!(translate("   "), GENERIC_ERROR);
    }
}
