//! # Firebase Identity Toolkit 백엔드
//!
//! Firebase Authentication REST API(`identitytoolkit.googleapis.com/v1`)를 호출합니다.
//!
//! ## 사용하는 엔드포인트
//!
//! | 동작 | 엔드포인트 |
//! |------|-----------|
//! | 이메일 로그인 | `accounts:signInWithPassword` |
//! | 이메일 가입 | `accounts:signUp` |
//! | 표시 이름 설정 | `accounts:update` |
//! | 사용자 조회 | `accounts:lookup` |
//! | OAuth 시작 | `accounts:createAuthUri` |
//! | OAuth 완료 | `accounts:signInWithIdp` |
//!
//! REST 에러 메시지(`EMAIL_EXISTS` 등)는 SDK와 같은 `auth/...` 코드로 정규화해서
//! 에러 번역기가 그대로 사용할 수 있게 합니다.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;
use crate::config::{AuthProviderKind, FirebaseSettings};
use crate::domain::entities::users::User;
use crate::domain::models::{OAuthCallback, OAuthProvider, OAuthStart, PendingOAuth, Session};
use super::auth_backend::{query_param, with_query_param, AuthBackend, ProviderError};
use super::error_translator::{
    EMAIL_ALREADY_IN_USE, INVALID_CREDENTIAL, INVALID_EMAIL, INVALID_OAUTH_CALLBACK, OPERATION_NOT_ALLOWED,
    TOO_MANY_REQUESTS, USER_DISABLED, USER_NOT_FOUND, WEAK_PASSWORD, WRONG_PASSWORD,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    is_new_user: bool,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    /// 밀리초 단위 epoch 문자열
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    last_login_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAuthUriResponse {
    auth_uri: String,
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// REST 에러 메시지를 SDK 에러 코드로 변환합니다.
///
/// `"WEAK_PASSWORD : Password should be at least 6 characters"`처럼 설명이 붙은 경우
/// 앞부분만 봅니다. 알 수 없는 메시지는 그대로 돌려줍니다.
pub fn sdk_error_code(message: &str) -> String {
    let key = message.split(" : ").next().unwrap_or(message).trim();

    let code = match key {
        "EMAIL_EXISTS" => EMAIL_ALREADY_IN_USE,
        "INVALID_EMAIL" => INVALID_EMAIL,
        "WEAK_PASSWORD" => WEAK_PASSWORD,
        "EMAIL_NOT_FOUND" => USER_NOT_FOUND,
        "INVALID_PASSWORD" => WRONG_PASSWORD,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => INVALID_CREDENTIAL,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => TOO_MANY_REQUESTS,
        "USER_DISABLED" => USER_DISABLED,
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => OPERATION_NOT_ALLOWED,
        _ => return message.trim().to_string(),
    };

    code.to_string()
}

fn parse_millis(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|ms| ms.parse::<i64>().ok())
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

pub struct FirebaseAuthBackend {
    client: reqwest::Client,
    settings: FirebaseSettings,
}

impl FirebaseAuthBackend {
    pub fn new(client: reqwest::Client, settings: FirebaseSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.settings.base_url.trim_end_matches('/'),
            method,
            urlencoding::encode(&self.settings.api_key)
        )
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: serde_json::Value) -> Result<T, ProviderError> {
        let response = self.client.post(self.endpoint(method)).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::debug!("Firebase {} 실패 ({}): {}", method, status, text);
            return Err(Self::rejection(&text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Firebase {} 응답 파싱 실패: {}", method, e)))
    }

    fn rejection(body: &str) -> ProviderError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        ProviderError::rejected(sdk_error_code(&message))
    }

    async fn lookup(&self, id_token: &str) -> Result<User, ProviderError> {
        let response: LookupResponse = self.call("lookup", json!({ "idToken": id_token })).await?;

        let found = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))?;

        Ok(User::new(found.local_id, found.email.unwrap_or_default(), AuthProviderKind::Firebase)
            .with_display_name(found.display_name)
            .with_timestamps(
                parse_millis(found.created_at.as_deref()),
                parse_millis(found.last_login_at.as_deref()),
            ))
    }

    fn session_from(token: TokenResponse) -> Session {
        let mut user = User::new(token.local_id, token.email.unwrap_or_default(), AuthProviderKind::Firebase)
            .with_display_name(token.display_name);

        if token.is_new_user {
            user = user.mark_new_identity(Utc::now());
        }

        Session::new(user, token.id_token, token.refresh_token)
    }

    /// 로그인 응답에는 타임스탬프가 없으므로 `lookup`으로 보강합니다.
    ///
    /// 실패해도 로그인 자체는 성공으로 유지합니다.
    async fn with_lookup_timestamps(&self, mut session: Session) -> Session {
        let Some(id_token) = session.access_token.clone() else {
            return session;
        };

        match self.lookup(&id_token).await {
            Ok(found) => {
                session.user = session.user.with_timestamps(found.created_at, found.last_sign_in_at);
                if session.user.display_name.is_none() {
                    session.user.display_name = found.display_name;
                }
            }
            Err(e) => log::warn!("Firebase 사용자 조회 실패 (타임스탬프 없이 진행): {}", e),
        }

        session
    }
}

#[async_trait]
impl AuthBackend for FirebaseAuthBackend {
    fn kind(&self) -> AuthProviderKind {
        AuthProviderKind::Firebase
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let token: TokenResponse = self
            .call(
                "signInWithPassword",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;

        Ok(self.with_lookup_timestamps(Self::session_from(token)).await)
    }

    async fn sign_up_with_password(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let token: TokenResponse = self
            .call("signUp", json!({ "email": email, "password": password, "returnSecureToken": true }))
            .await?;

        let mut session = Self::session_from(token);
        session.user = session.user.mark_new_identity(Utc::now());
        Ok(session)
    }

    async fn update_display_name(&self, session: &Session, display_name: &str) -> Result<(), ProviderError> {
        let id_token = session
            .access_token
            .as_deref()
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))?;

        let _: serde_json::Value = self
            .call(
                "update",
                json!({ "idToken": id_token, "displayName": display_name, "returnSecureToken": false }),
            )
            .await?;

        Ok(())
    }

    async fn begin_oauth(&self, provider: OAuthProvider, redirect_to: &str) -> Result<OAuthStart, ProviderError> {
        let created: CreateAuthUriResponse = self
            .call(
                "createAuthUri",
                json!({ "providerId": provider.firebase_provider_id(), "continueUri": redirect_to }),
            )
            .await?;

        // IdP가 돌려주는 state를 그대로 키로 사용하고, 없으면 직접 만들어 붙입니다.
        let (authorize_url, state) = match query_param(&created.auth_uri, "state") {
            Some(state) => (created.auth_uri, state),
            None => {
                let state = Uuid::new_v4().simple().to_string();
                (with_query_param(&created.auth_uri, "state", &state)?, state)
            }
        };

        Ok(OAuthStart {
            authorize_url,
            state,
            pending: PendingOAuth { provider, secret: created.session_id },
        })
    }

    async fn complete_oauth(&self, pending: &PendingOAuth, callback: &OAuthCallback) -> Result<Session, ProviderError> {
        if callback.callback_url.trim().is_empty() {
            return Err(ProviderError::rejected(INVALID_OAUTH_CALLBACK));
        }

        let token: TokenResponse = self
            .call(
                "signInWithIdp",
                json!({
                    "requestUri": callback.callback_url,
                    "sessionId": pending.secret,
                    "returnSecureToken": true,
                    "returnIdpCredential": true,
                }),
            )
            .await?;

        if token.is_new_user {
            return Ok(Self::session_from(token));
        }

        Ok(self.with_lookup_timestamps(Self::session_from(token)).await)
    }

    /// Firebase ID 토큰은 서버에서 폐기할 수 없으므로 로컬 세션만 정리됩니다.
    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError> {
        log::debug!("Firebase 로그아웃 (로컬 세션만 정리): {}", session.user.uid);
        Ok(())
    }

    async fn fetch_user(&self, session: &Session) -> Result<User, ProviderError> {
        let id_token = session
            .access_token
            .as_deref()
            .ok_or_else(|| ProviderError::rejected(USER_NOT_FOUND))?;

        self.lookup(id_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param as query_matcher};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> FirebaseAuthBackend {
        FirebaseAuthBackend::new(
            reqwest::Client::new(),
            FirebaseSettings { api_key: "test-key".to_string(), base_url: server.uri() },
        )
    }

    fn error_body(message: &str) -> serde_json::Value {
        json!({ "error": { "code": 400, "message": message } })
    }

    #[test]
    fn test_sdk_error_code_mapping() {
        assert_eq!(sdk_error_code("EMAIL_EXISTS"), "auth/email-already-in-use");
        assert_eq!(
            sdk_error_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            "auth/weak-password"
        );
        assert_eq!(sdk_error_code("INVALID_LOGIN_CREDENTIALS"), "auth/invalid-credential");
        assert_eq!(sdk_error_code("EMAIL_NOT_FOUND"), "auth/user-not-found");
        assert_eq!(sdk_error_code("QUOTA_EXCEEDED"), "QUOTA_EXCEEDED");
    }

    #[test]
    fn test_parse_millis() {
        let parsed = parse_millis(Some("1700000000000")).unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);
        assert!(parse_millis(Some("yesterday")).is_none());
        assert!(parse_millis(None).is_none());
    }

    #[actix_web::test]
    async fn test_sign_up_marks_first_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .and(query_matcher("key", "test-key"))
            .and(body_partial_json(json!({ "email": "ava@example.com", "returnSecureToken": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "fb-1",
                "email": "ava@example.com",
                "idToken": "id-token",
                "refreshToken": "refresh-token"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = backend(&server).sign_up_with_password("ava@example.com", "secret1").await.unwrap();

        assert_eq!(session.user.uid, "fb-1");
        assert!(session.user.is_first_session());
        assert_eq!(session.access_token.as_deref(), Some("id-token"));
    }

    #[actix_web::test]
    async fn test_duplicate_sign_up_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body("EMAIL_EXISTS")))
            .mount(&server)
            .await;

        let err = backend(&server).sign_up_with_password("ava@example.com", "secret1").await.unwrap_err();

        assert_eq!(err, ProviderError::rejected(EMAIL_ALREADY_IN_USE));
        assert_eq!(err.user_message(), "This email is already registered. Try signing in!");
    }

    #[actix_web::test]
    async fn test_sign_in_reads_timestamps_from_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "fb-1",
                "email": "ava@example.com",
                "displayName": "Ava",
                "idToken": "id-token"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .and(body_partial_json(json!({ "idToken": "id-token" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{
                    "localId": "fb-1",
                    "email": "ava@example.com",
                    "createdAt": "1600000000000",
                    "lastLoginAt": "1700000000000"
                }]
            })))
            .mount(&server)
            .await;

        let session = backend(&server).sign_in_with_password("ava@example.com", "secret1").await.unwrap();

        assert_eq!(session.user.display_name.as_deref(), Some("Ava"));
        assert!(session.user.created_at.is_some());
        assert!(!session.user.is_first_session());
    }

    #[actix_web::test]
    async fn test_sign_in_survives_lookup_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "fb-1",
                "email": "ava@example.com",
                "idToken": "id-token"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let session = backend(&server).sign_in_with_password("ava@example.com", "secret1").await.unwrap();

        assert_eq!(session.user.uid, "fb-1");
        assert!(!session.user.is_first_session());
    }

    #[actix_web::test]
    async fn test_wrong_password_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body("INVALID_PASSWORD")))
            .mount(&server)
            .await;

        let err = backend(&server).sign_in_with_password("ava@example.com", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Incorrect password. Please try again.");
    }

    #[actix_web::test]
    async fn test_oauth_round_trip_flags_new_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:createAuthUri"))
            .and(body_partial_json(json!({ "providerId": "google.com" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "authUri": "https://accounts.google.com/o/oauth2/auth?client_id=abc&state=idp-state",
                "sessionId": "session-1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithIdp"))
            .and(body_partial_json(json!({ "sessionId": "session-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "fb-9",
                "email": "nia@example.com",
                "displayName": "Nia",
                "idToken": "id-token",
                "isNewUser": true
            })))
            .mount(&server)
            .await;

        let backend = backend(&server);
        let start = backend
            .begin_oauth(OAuthProvider::Google, "http://localhost:8080/callback")
            .await
            .unwrap();
        assert_eq!(start.state, "idp-state");

        let callback = OAuthCallback {
            state: start.state.clone(),
            callback_url: "http://localhost:8080/callback?state=idp-state&code=xyz".to_string(),
            code: Some("xyz".to_string()),
            ..Default::default()
        };
        let session = backend.complete_oauth(&start.pending, &callback).await.unwrap();

        assert_eq!(session.user.display_name.as_deref(), Some("Nia"));
        assert!(session.user.is_first_session());
    }

    #[actix_web::test]
    async fn test_transport_failure_is_reported() {
        let backend = FirebaseAuthBackend::new(
            reqwest::Client::new(),
            FirebaseSettings { api_key: "k".to_string(), base_url: "http://127.0.0.1:1".to_string() },
        );

        let err = backend.sign_in_with_password("ava@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
